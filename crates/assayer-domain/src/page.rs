//! Page records and the per-document page index

use crate::DomainError;
use serde::{Deserialize, Serialize};

/// A single page of extracted document text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Zero-based position in the document
    pub index: usize,

    /// Text layer of the page
    pub text: String,
}

/// Ordered, immutable page sequence for one document
///
/// Other components refer to pages by index only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageIndex {
    pages: Vec<Page>,
}

impl PageIndex {
    /// Build an index from page records
    ///
    /// Fails unless the records are numbered `0..n` in order.
    pub fn new(pages: Vec<Page>) -> Result<Self, DomainError> {
        for (expected, page) in pages.iter().enumerate() {
            if page.index != expected {
                return Err(DomainError::PageOutOfOrder {
                    expected,
                    found: page.index,
                });
            }
        }
        Ok(Self { pages })
    }

    /// Build an index from page texts in document order
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let pages = texts
            .into_iter()
            .enumerate()
            .map(|(index, text)| Page {
                index,
                text: text.into(),
            })
            .collect();
        Self { pages }
    }

    /// Number of pages
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Whether the document has no pages
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Look up a page by index
    pub fn get(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    /// Iterate pages in document order
    pub fn iter(&self) -> impl Iterator<Item = &Page> {
        self.pages.iter()
    }

    /// Return a new index with every page text passed through `f`
    pub fn map_text<F>(&self, f: F) -> Self
    where
        F: Fn(&str) -> String,
    {
        Self::from_texts(self.pages.iter().map(|p| f(&p.text)))
    }

    /// Render a page subset with `=== PAGE <i> ===` markers
    ///
    /// Blocks are joined by a blank line. Indices past the end are skipped.
    pub fn render(&self, indices: &[usize]) -> String {
        indices
            .iter()
            .filter_map(|&i| self.get(i))
            .map(|page| format!("=== PAGE {} ===\n{}", page.index, page.text))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
