//! Per-category page selection

use crate::{CategoryTagMap, PageCategory, PageRange, SelectorConfig};
use assayer_domain::ExtractionCategory;
use std::collections::BTreeSet;
use tracing::debug;

/// Chooses the pages sent to the model for each extraction category
#[derive(Debug, Clone, Default)]
pub struct PageSelector {
    config: SelectorConfig,
}

impl PageSelector {
    /// Create a selector with the given configuration
    pub fn new(config: SelectorConfig) -> Self {
        Self { config }
    }

    /// Access the configuration
    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    /// Select pages for one category
    ///
    /// The result is ascending, duplicate-free and at most `max_pages` long;
    /// truncation keeps the lowest indices. An empty result is valid.
    pub fn select(
        &self,
        tags: &CategoryTagMap,
        total_pages: usize,
        category: ExtractionCategory,
        max_pages: usize,
    ) -> Vec<usize> {
        use PageCategory::*;

        let pages: BTreeSet<usize> = match category {
            ExtractionCategory::Metadata => {
                let mut pages = union(tags, &[MetadataTables, QualifiedPersons, ProjectDescription]);
                pages.extend(0..self.config.metadata_leading_pages.min(total_pages));
                pages
            }
            ExtractionCategory::Resources => with_fallback(
                union(tags, &[ResourceTables, MineralResources, DrillingTables, SamplingTables]),
                self.config.resources_fallback,
                total_pages,
            ),
            ExtractionCategory::Reserves => with_fallback(
                union(tags, &[ReserveTables, MineralReserves]),
                self.config.reserves_fallback,
                total_pages,
            ),
            ExtractionCategory::Economics => with_fallback(
                union(tags, &[EconomicTables, Costs, Budget, Metallurgy]),
                self.config.economics_fallback,
                total_pages,
            ),
        };

        let selected: Vec<usize> = pages.into_iter().take(max_pages).collect();
        debug!(
            "Selected {} page(s) for {} (max {})",
            selected.len(),
            category,
            max_pages
        );
        selected
    }
}

fn union(tags: &CategoryTagMap, categories: &[PageCategory]) -> BTreeSet<usize> {
    categories
        .iter()
        .flat_map(|&c| tags.pages(c).iter().copied())
        .collect()
}

fn with_fallback(pages: BTreeSet<usize>, fallback: PageRange, total_pages: usize) -> BTreeSet<usize> {
    if pages.is_empty() {
        debug!(
            "No tagged pages, falling back to {}..{}",
            fallback.start, fallback.end
        );
        fallback.clamp(total_pages).collect()
    } else {
        pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PageClassifier;
    use assayer_domain::PageIndex;

    fn blank_document(total: usize) -> (PageIndex, CategoryTagMap) {
        let pages = PageIndex::from_texts(vec!["nothing relevant"; total]);
        let tags = PageClassifier::default().classify(&pages);
        (pages, tags)
    }

    #[test]
    fn test_resources_fallback() {
        let (pages, tags) = blank_document(100);
        let selected =
            PageSelector::default().select(&tags, pages.len(), ExtractionCategory::Resources, 30);
        assert_eq!(selected, (20..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_fallback_truncated_to_document() {
        let (pages, tags) = blank_document(45);
        let selector = PageSelector::default();
        assert_eq!(
            selector.select(&tags, pages.len(), ExtractionCategory::Reserves, 20),
            (30..45).collect::<Vec<_>>()
        );
        assert_eq!(
            selector.select(&tags, pages.len(), ExtractionCategory::Economics, 30),
            (40..45).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_fallback_empty_for_short_document() {
        let (pages, tags) = blank_document(10);
        let selected =
            PageSelector::default().select(&tags, pages.len(), ExtractionCategory::Reserves, 20);
        assert!(selected.is_empty());
    }

    #[test]
    fn test_metadata_includes_leading_pages() {
        let mut texts = vec!["filler".to_string(); 40];
        texts[30] = "Qualified Person certificate".to_string();
        let pages = PageIndex::from_texts(texts);
        let tags = PageClassifier::default().classify(&pages);

        let selected =
            PageSelector::default().select(&tags, pages.len(), ExtractionCategory::Metadata, 25);

        let mut expected: Vec<usize> = (0..15).collect();
        expected.push(30);
        assert_eq!(selected, expected);
    }

    #[test]
    fn test_metadata_short_document() {
        let (pages, tags) = blank_document(4);
        let selected =
            PageSelector::default().select(&tags, pages.len(), ExtractionCategory::Metadata, 25);
        assert_eq!(selected, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_tagged_pages_skip_fallback() {
        let mut texts = vec!["filler".to_string(); 100];
        texts[70] = "Mineral Reserve statement".to_string();
        texts[5] = "TABLE 15-1".to_string();
        let pages = PageIndex::from_texts(texts);
        let tags = PageClassifier::default().classify(&pages);

        let selected =
            PageSelector::default().select(&tags, pages.len(), ExtractionCategory::Reserves, 20);
        assert_eq!(selected, vec![5, 70]);
    }

    #[test]
    fn test_truncation_keeps_lowest() {
        let texts: Vec<String> = (0..50).map(|_| "Operating cost".to_string()).collect();
        let pages = PageIndex::from_texts(texts);
        let tags = PageClassifier::default().classify(&pages);

        let selected =
            PageSelector::default().select(&tags, pages.len(), ExtractionCategory::Economics, 10);
        assert_eq!(selected, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_custom_fallback() {
        let (pages, tags) = blank_document(100);
        let selector = PageSelector::new(SelectorConfig {
            resources_fallback: PageRange::new(5, 8),
            ..SelectorConfig::default()
        });
        assert_eq!(
            selector.select(&tags, pages.len(), ExtractionCategory::Resources, 30),
            vec![5, 6, 7]
        );
    }
}
