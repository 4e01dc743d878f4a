use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PdfTextError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid PDF: {0}")]
    InvalidPdf(String),

    #[error("PDF is password protected")]
    PasswordProtected,

    #[error("Text extraction failed: {0}")]
    Extraction(String),
}
