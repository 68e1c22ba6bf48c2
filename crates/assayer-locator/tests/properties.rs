//! Property tests for classification and selection

use assayer_domain::{ExtractionCategory, PageIndex};
use assayer_locator::{CategoryTagMap, PageCategory, PageClassifier, PageSelector};
use proptest::prelude::*;
use std::collections::BTreeSet;

/// Page text built from fragments that trigger (or nearly trigger) tags
fn page_text() -> impl Strategy<Value = String> {
    let fragment = prop_oneof![
        Just("TABLE 14-1".to_string()),
        Just("Table 3.2".to_string()),
        Just("TABLE 15-2".to_string()),
        Just("TABLE 21-1".to_string()),
        Just("TABLE 7-1".to_string()),
        Just("Qualified Person".to_string()),
        Just("Mineral Reserve".to_string()),
        Just("inferred".to_string()),
        Just("CAPEX".to_string()),
        Just("drilling".to_string()),
        Just("lorem ipsum".to_string()),
        "[a-z ]{0,20}",
    ];
    prop::collection::vec(fragment, 0..6).prop_map(|parts| parts.join(" "))
}

fn document() -> impl Strategy<Value = PageIndex> {
    prop::collection::vec(page_text(), 0..120).prop_map(PageIndex::from_texts)
}

fn category() -> impl Strategy<Value = ExtractionCategory> {
    prop_oneof![
        Just(ExtractionCategory::Metadata),
        Just(ExtractionCategory::Resources),
        Just(ExtractionCategory::Reserves),
        Just(ExtractionCategory::Economics),
    ]
}

/// Pages carrying any of `categories`, ascending
fn tagged(tags: &CategoryTagMap, categories: &[PageCategory]) -> BTreeSet<usize> {
    categories
        .iter()
        .flat_map(|&c| tags.pages(c).iter().copied())
        .collect()
}

/// Tagged pages, or the clamped fallback range when nothing was tagged
fn or_fallback(pages: BTreeSet<usize>, start: usize, end: usize, total: usize) -> Vec<usize> {
    if pages.is_empty() {
        (start.min(total)..end.min(total)).collect()
    } else {
        pages.into_iter().collect()
    }
}

proptest! {
    #[test]
    fn classification_is_deterministic(pages in document()) {
        let classifier = PageClassifier::default();
        prop_assert_eq!(classifier.classify(&pages), classifier.classify(&pages));
    }

    #[test]
    fn tagged_pages_exist(pages in document()) {
        let tags = PageClassifier::default().classify(&pages);
        for (_, tagged) in tags.iter() {
            prop_assert!(tagged.iter().all(|&i| i < pages.len()));
        }
    }

    #[test]
    fn selection_is_sorted_bounded_and_in_range(
        pages in document(),
        category in category(),
        max_pages in 0usize..40,
    ) {
        let tags = PageClassifier::default().classify(&pages);
        let selected = PageSelector::default().select(&tags, pages.len(), category, max_pages);

        prop_assert!(selected.len() <= max_pages);
        prop_assert!(selected.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(selected.iter().all(|&i| i < pages.len()));
    }

    #[test]
    fn reserves_union_is_exact(pages in document()) {
        let tags = PageClassifier::default().classify(&pages);
        let selected = PageSelector::default()
            .select(&tags, pages.len(), ExtractionCategory::Reserves, usize::MAX);

        let expected = or_fallback(
            tagged(&tags, &[PageCategory::ReserveTables, PageCategory::MineralReserves]),
            30,
            60,
            pages.len(),
        );
        prop_assert_eq!(selected, expected);
    }

    #[test]
    fn resources_union_is_exact(pages in document()) {
        let tags = PageClassifier::default().classify(&pages);
        let selected = PageSelector::default()
            .select(&tags, pages.len(), ExtractionCategory::Resources, usize::MAX);

        let expected = or_fallback(
            tagged(
                &tags,
                &[
                    PageCategory::ResourceTables,
                    PageCategory::MineralResources,
                    PageCategory::DrillingTables,
                    PageCategory::SamplingTables,
                ],
            ),
            20,
            50,
            pages.len(),
        );
        prop_assert_eq!(selected, expected);
    }

    #[test]
    fn economics_union_is_exact(pages in document()) {
        let tags = PageClassifier::default().classify(&pages);
        let selected = PageSelector::default()
            .select(&tags, pages.len(), ExtractionCategory::Economics, usize::MAX);

        let expected = or_fallback(
            tagged(
                &tags,
                &[
                    PageCategory::EconomicTables,
                    PageCategory::Costs,
                    PageCategory::Budget,
                    PageCategory::Metallurgy,
                ],
            ),
            40,
            80,
            pages.len(),
        );
        prop_assert_eq!(selected, expected);
    }

    #[test]
    fn metadata_is_leading_pages_plus_tags(pages in document(), max_pages in 0usize..60) {
        let tags = PageClassifier::default().classify(&pages);
        let selected = PageSelector::default()
            .select(&tags, pages.len(), ExtractionCategory::Metadata, max_pages);

        let mut expected = tagged(
            &tags,
            &[
                PageCategory::MetadataTables,
                PageCategory::QualifiedPersons,
                PageCategory::ProjectDescription,
            ],
        );
        expected.extend(0..15.min(pages.len()));
        let expected: Vec<usize> = expected.into_iter().take(max_pages).collect();
        prop_assert_eq!(selected, expected);
    }
}
