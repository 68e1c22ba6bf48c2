//! Page relevance classifier

use crate::{CategoryTagMap, ClassifierConfig, PageCategory};
use assayer_domain::PageIndex;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeSet;
use tracing::debug;

lazy_static! {
    /// `TABLE 14-1`, `Table 2.3`; captures the leading number
    static ref TABLE_CITATION: Regex = Regex::new(r"(?i)TABLE\s+(\d+)[-.]\d+").unwrap();
}

/// Tags pages by table citations and keyword groups
///
/// Each page is scanned once; cost is linear in pages × keywords.
#[derive(Debug, Clone)]
pub struct PageClassifier {
    config: ClassifierConfig,
    /// Keyword groups with upper-cased keywords
    groups: Vec<(Vec<String>, Vec<PageCategory>)>,
}

impl PageClassifier {
    /// Create a classifier with the given configuration
    pub fn new(config: ClassifierConfig) -> Self {
        let groups = config
            .keyword_groups
            .iter()
            .map(|g| {
                let keywords = g.keywords.iter().map(|k| k.to_uppercase()).collect();
                (keywords, g.categories.clone())
            })
            .collect();
        Self { config, groups }
    }

    /// Access the configuration
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Build the tag map for a whole document
    pub fn classify(&self, pages: &PageIndex) -> CategoryTagMap {
        let mut map = CategoryTagMap::new();
        for page in pages.iter() {
            for category in self.classify_page(&page.text) {
                map.insert(category, page.index);
            }
        }

        for (category, tagged) in map.iter() {
            debug!("{:<20} {} page(s)", category.as_str(), tagged.len());
        }
        debug!(
            "Classified {} pages, {} tags total",
            pages.len(),
            map.total_tags()
        );

        map
    }

    /// Tags for a single page of text
    pub fn classify_page(&self, text: &str) -> BTreeSet<PageCategory> {
        let mut tags = BTreeSet::new();

        for number in cited_tables(text) {
            for rule in self.config.table_rules.iter().filter(|r| r.matches(number)) {
                tags.extend(rule.categories.iter().copied());
            }
        }

        let upper = text.to_uppercase();
        for (keywords, categories) in &self.groups {
            if keywords.iter().any(|k| upper.contains(k.as_str())) {
                tags.extend(categories.iter().copied());
            }
        }

        tags
    }
}

impl Default for PageClassifier {
    fn default() -> Self {
        Self::new(ClassifierConfig::default())
    }
}

/// Distinct leading numbers of the tables cited on a page
///
/// Numbers too large for `u32` are ignored.
fn cited_tables(text: &str) -> BTreeSet<u32> {
    TABLE_CITATION
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .filter_map(|m| m.as_str().parse().ok())
        .collect()
}
