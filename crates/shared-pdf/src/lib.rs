//! PDF text source for the comparison engine
//!
//! Turns PDF bytes into the two things the engine needs: the document text and
//! its page count. No OCR is attempted; a scanned PDF simply yields little or
//! no text and is rejected downstream.

pub mod error;
pub mod text;

pub use error::PdfTextError;
pub use text::{split_pages, PdfText, PdfTextSource};
