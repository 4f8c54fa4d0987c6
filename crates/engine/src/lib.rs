pub mod chat;
pub mod ingest;

pub use chat::{Answer, ChatService};
pub use ingest::{IngestReport, IngestService};
