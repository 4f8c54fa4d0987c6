//! Reading uploaded documents as plain text.

use crate::error::DocumentError;
use std::fs;
use std::path::{Path, PathBuf};

/// Document formats accepted for upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupportedFormat {
    PlainText,
    Markdown,
    Html,
    /// Recognized, but needs an extraction backend
    Pdf,
    /// Recognized, but needs an extraction backend
    Docx,
}

impl SupportedFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "txt" => Some(Self::PlainText),
            "md" | "markdown" => Some(Self::Markdown),
            "html" | "htm" => Some(Self::Html),
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            _ => None,
        }
    }

    /// Whether the file content can be used as-is
    pub fn is_text(&self) -> bool {
        matches!(self, Self::PlainText | Self::Markdown | Self::Html)
    }
}

/// Read a text-based document. HTML is returned with its markup.
pub fn read_document(path: &Path) -> Result<String, DocumentError> {
    let unsupported = || DocumentError::Unsupported {
        path: path.to_path_buf(),
    };

    let format = SupportedFormat::from_path(path).ok_or_else(unsupported)?;
    if !format.is_text() {
        return Err(unsupported());
    }

    let bytes = fs::read(path).map_err(|source| DocumentError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let text = String::from_utf8(bytes).map_err(|_| DocumentError::Encoding {
        path: PathBuf::from(path),
    })?;
    tracing::debug!("read {} bytes from {}", text.len(), path.display());
    Ok(text)
}
