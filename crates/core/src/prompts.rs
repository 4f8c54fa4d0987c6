//! Prompt templates for summarization and grounded answering.

use crate::models::Message;

pub const SUMMARY_SYSTEM: &str =
    "You are a helpful assistant that summarizes documents accurately and concisely.";

pub const ANSWER_SYSTEM: &str =
    "You are a helpful assistant that answers questions based on the provided context.";

pub fn summary_messages(text: &str) -> Vec<Message> {
    vec![
        Message::system(SUMMARY_SYSTEM),
        Message::user(format!(
            "Please summarize the following text concisely while capturing the key points:\n\n{}",
            text
        )),
    ]
}

pub fn answer_messages<S: AsRef<str>>(
    question: &str,
    contexts: &[S],
    separator: &str,
) -> Vec<Message> {
    let combined = contexts
        .iter()
        .map(|c| c.as_ref())
        .collect::<Vec<_>>()
        .join(separator);
    vec![
        Message::system(ANSWER_SYSTEM),
        Message::user(format!(
            "Context information:\n\n{}\n\nQuestion: {}",
            combined, question
        )),
    ]
}
