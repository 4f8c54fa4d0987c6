mod pipeline;
mod service;

pub use pipeline::{document_id, embed_in_batches};
pub use service::{IngestReport, IngestService};
