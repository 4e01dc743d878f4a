//! Text and page count from PDF bytes
//!
//! `pdf-extract` produces the text (pages separated by form feeds) and
//! `lopdf` reads the page tree for the page count.

use crate::error::PdfTextError;
use lopdf::Document;
use pdf_extract::extract_text_from_mem;
use shared_types::DocumentMeta;
use std::fs;
use std::path::Path;

/// Extracted text of one PDF
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfText {
    pub text: String,
    pub page_count: u32,
}

impl PdfText {
    /// Metadata to hand to the extractor alongside `text`
    pub fn meta(&self, filename: impl Into<String>) -> DocumentMeta {
        DocumentMeta::new(filename, self.page_count)
    }
}

/// Reads PDFs into [`PdfText`]
pub struct PdfTextSource;

impl PdfTextSource {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<PdfText, PdfTextError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| PdfTextError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(&bytes)
    }

    /// Extract text and page count from PDF bytes.
    ///
    /// # Errors
    /// - `PdfTextError::InvalidPdf` - the bytes are not a readable PDF
    /// - `PdfTextError::PasswordProtected` - the text layer is encrypted
    /// - `PdfTextError::Extraction` - any other extraction failure
    pub fn from_bytes(bytes: &[u8]) -> Result<PdfText, PdfTextError> {
        let pages_in_tree = Self::page_count(bytes)?;

        let text = extract_text_from_mem(bytes).map_err(|e| {
            let message = e.to_string();
            let lower = message.to_lowercase();

            if lower.contains("encrypted") || lower.contains("password") {
                PdfTextError::PasswordProtected
            } else if lower.contains("invalid")
                || lower.contains("malformed")
                || lower.contains("corrupt")
            {
                PdfTextError::InvalidPdf(message)
            } else {
                PdfTextError::Extraction(message)
            }
        })?;

        // Some producers leave the page tree empty; count text pages instead
        let page_count = if pages_in_tree > 0 {
            pages_in_tree
        } else {
            split_pages(&text).len() as u32
        };

        tracing::debug!(pages = page_count, chars = text.len(), "extracted pdf text");
        Ok(PdfText { text, page_count })
    }

    /// Number of pages in the document's page tree
    pub fn page_count(bytes: &[u8]) -> Result<u32, PdfTextError> {
        let document =
            Document::load_mem(bytes).map_err(|e| PdfTextError::InvalidPdf(e.to_string()))?;
        Ok(document.get_pages().len() as u32)
    }
}

/// Splits extracted text on form feeds, dropping blank pages.
///
/// Text without any form feed is a single page (or none, when blank).
pub fn split_pages(text: &str) -> Vec<&str> {
    text.split('\x0C')
        .filter(|page| !page.trim().is_empty())
        .collect()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: no returned page is blank
        #[test]
        fn split_pages_drops_blank_pages(text in "\\PC*") {
            for page in split_pages(&text) {
                prop_assert!(!page.trim().is_empty());
            }
        }
    }
}
