//! PDF reader wrapper for PDFium

use crate::error::{Error, Result};
use pdfium_render::prelude::*;
use std::path::Path;

/// Get PDFium instance (creates new instance each time - PDFium is not thread-safe)
fn create_pdfium() -> Result<Pdfium> {
    // Try a library next to the binary, then the container location, then the system
    let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
        .or_else(|_| {
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(
                "/opt/pdfium/lib",
            ))
        })
        .or_else(|_| Pdfium::bind_to_system_library())
        .map_err(|e| Error::Extraction {
            reason: format!("Failed to initialize PDFium: {}", e),
        })?;

    Ok(Pdfium::new(bindings))
}

/// Plain-text view of a PDF, one string per page in physical order
#[derive(Debug, Clone)]
pub struct PdfReader {
    page_texts: Vec<String>,
}

impl PdfReader {
    /// Open a PDF from a file path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(Error::MissingFile {
                path: path.display().to_string(),
            });
        }

        let data = std::fs::read(path)?;
        Self::open_bytes(&data)
    }

    /// Open a PDF from bytes
    ///
    /// The PDFium document only lives for the duration of this call; all page
    /// text is copied out before it is closed.
    pub fn open_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < 4 || &data[0..4] != b"%PDF" {
            return Err(Error::Extraction {
                reason: "Not a valid PDF file".to_string(),
            });
        }

        let pdfium = create_pdfium()?;
        let document = pdfium
            .load_pdf_from_byte_slice(data, None)
            .map_err(Self::map_pdfium_error)?;

        let page_texts = Self::extract_all_page_texts(&document)?;
        tracing::debug!(pages = page_texts.len(), "extracted page text");

        Ok(Self { page_texts })
    }

    fn extract_all_page_texts(document: &PdfDocument) -> Result<Vec<String>> {
        let pages = document.pages();
        let mut texts = Vec::with_capacity(pages.len() as usize);

        for (index, page) in pages.iter().enumerate() {
            let text = page.text().map_err(|e| Error::Extraction {
                reason: format!("Failed to read text of page {}: {}", index + 1, e),
            })?;
            texts.push(text.all());
        }

        Ok(texts)
    }

    /// Map PDFium errors to our error type
    fn map_pdfium_error(err: PdfiumError) -> Error {
        match err {
            PdfiumError::PdfiumLibraryInternalError(PdfiumInternalError::PasswordError) => {
                Error::PasswordRequired
            }
            _ => Error::Extraction {
                reason: format!("{}", err),
            },
        }
    }

    /// Get the number of pages
    pub fn page_count(&self) -> u32 {
        u32::try_from(self.page_texts.len()).unwrap_or(u32::MAX)
    }

    /// Text of a specific page (1-indexed)
    pub fn page_text(&self, page_num: u32) -> Option<&str> {
        if page_num < 1 {
            return None;
        }
        self.page_texts
            .get((page_num - 1) as usize)
            .map(String::as_str)
    }

    /// All page texts concatenated in page order, one newline after each page
    pub fn full_text(&self) -> String {
        let capacity = self.page_texts.iter().map(|t| t.len() + 1).sum();
        let mut text = String::with_capacity(capacity);
        for page in &self.page_texts {
            text.push_str(page);
            text.push('\n');
        }
        text
    }

    #[cfg(test)]
    pub(crate) fn from_pages(pages: Vec<String>) -> Self {
        Self { page_texts: pages }
    }
}

/// Open `path` and return its full text
pub fn extract_text<P: AsRef<Path>>(path: P) -> Result<String> {
    PdfReader::open(path).map(|reader| reader.full_text())
}
