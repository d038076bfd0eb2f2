//! PDF text extraction
//!
//! This module turns a PDF into plain text using PDFium.

mod reader;

pub use reader::{extract_text, PdfReader};
