//! Scan command implementation.

use crate::cli::ScanArgs;
use crate::config::Config;
use crate::error::Result;
use crate::loader::load_document;
use crate::output::Formatter;
use assayer_domain::normalize::clean_page_text;
use assayer_domain::{ExtractionCategory, PageIndex};
use assayer_locator::{PageCategory, PageClassifier, PageSelector};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Pages carrying one tag
#[derive(Debug, Clone, Serialize)]
pub struct TagPages {
    /// Tag
    pub tag: PageCategory,
    /// Ascending page indices
    pub pages: Vec<usize>,
}

/// Pages one extraction would read
#[derive(Debug, Clone, Serialize)]
pub struct Selection {
    /// Extraction category
    pub category: ExtractionCategory,
    /// Page budget
    pub max_pages: usize,
    /// Selected page indices
    pub pages: Vec<usize>,
}

/// Classification and selection of one document
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    /// Scanned file
    pub source: PathBuf,
    /// Pages in the document
    pub total_pages: usize,
    /// Tagged (page, tag) pairs
    pub total_tags: usize,
    /// Page map per tag
    pub tags: Vec<TagPages>,
    /// Selection per category
    pub selections: Vec<Selection>,
}

/// Classify and select pages the same way extraction does.
pub fn build_scan(source: &Path, pages: &PageIndex, config: &Config) -> ScanReport {
    let cleaned;
    let pages = if config.extractor.clean_page_text {
        cleaned = pages.map_text(clean_page_text);
        &cleaned
    } else {
        pages
    };

    let classifier = PageClassifier::new(config.classifier.clone());
    let selector = PageSelector::new(config.selector.clone());
    let tag_map = classifier.classify(pages);

    let tags = tag_map
        .iter()
        .map(|(tag, set)| TagPages {
            tag,
            pages: set.iter().copied().collect(),
        })
        .collect();

    let selections = ExtractionCategory::ALL
        .iter()
        .map(|&category| {
            let max_pages = config.extractor.max_pages(category);
            Selection {
                category,
                max_pages,
                pages: selector.select(&tag_map, pages.len(), category, max_pages),
            }
        })
        .collect();

    ScanReport {
        source: source.to_path_buf(),
        total_pages: pages.len(),
        total_tags: tag_map.total_tags(),
        tags,
        selections,
    }
}

/// Execute the scan command.
pub fn execute_scan(args: ScanArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let pages = load_document(&args.file)?;
    let scan = build_scan(&args.file, &pages, config);

    println!("{}", formatter.format_scan(&scan)?);

    Ok(())
}
