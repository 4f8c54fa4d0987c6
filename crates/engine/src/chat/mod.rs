mod service;

pub use service::{Answer, ChatService};
