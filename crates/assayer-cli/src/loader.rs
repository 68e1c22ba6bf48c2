//! Document loaders
//!
//! PDFs are read page by page with `pdf-extract`; plain-text exports use the
//! form-feed character as page separator.

use assayer_domain::traits::DocumentLoader;
use assayer_domain::PageIndex;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Errors while loading a document
#[derive(Debug, Error)]
pub enum LoaderError {
    /// File could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        /// Offending file
        path: String,
        /// Underlying error
        source: std::io::Error,
    },

    /// PDF text extraction failed
    #[error("Failed to extract text from PDF {path}: {message}")]
    Pdf {
        /// Offending file
        path: String,
        /// Extractor message
        message: String,
    },

    /// Extension not handled by any loader
    #[error("Unsupported document type: {0}")]
    Unsupported(String),
}

/// One page per PDF page, in document order
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfLoader;

impl DocumentLoader for PdfLoader {
    type Error = LoaderError;

    fn load(&self, path: &Path) -> Result<PageIndex, Self::Error> {
        let pages = pdf_extract::extract_text_by_pages(path).map_err(|e| LoaderError::Pdf {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        debug!("Loaded {} page(s) from {}", pages.len(), path.display());
        Ok(PageIndex::from_texts(pages))
    }
}

/// Plain text with pages separated by form feeds (`\x0c`)
#[derive(Debug, Clone, Copy, Default)]
pub struct TextLoader;

impl TextLoader {
    /// Split already-read text into pages
    pub fn split_pages(text: &str) -> PageIndex {
        let trimmed = text.strip_suffix('\x0c').unwrap_or(text);
        PageIndex::from_texts(trimmed.split('\x0c'))
    }
}

impl DocumentLoader for TextLoader {
    type Error = LoaderError;

    fn load(&self, path: &Path) -> Result<PageIndex, Self::Error> {
        let text = fs::read_to_string(path).map_err(|source| LoaderError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let pages = Self::split_pages(&text);
        debug!("Loaded {} page(s) from {}", pages.len(), path.display());
        Ok(pages)
    }
}

/// Picks the loader from the file extension
#[derive(Debug, Clone, Copy, Default)]
pub struct FileLoader;

impl DocumentLoader for FileLoader {
    type Error = LoaderError;

    fn load(&self, path: &Path) -> Result<PageIndex, Self::Error> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "pdf" => PdfLoader.load(path),
            "txt" => TextLoader.load(path),
            _ => Err(LoaderError::Unsupported(path.display().to_string())),
        }
    }
}

/// Load a document with the extension-based loader
pub fn load_document(path: &Path) -> Result<PageIndex, LoaderError> {
    FileLoader.load(path)
}
