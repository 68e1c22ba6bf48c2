//! Integration tests for the Extractor

#[cfg(test)]
mod tests {
    use crate::{instructions_for, Extractor, ExtractorConfig};
    use assayer_domain::{ExtractionCategory, PageIndex, ValidationStatus};
    use assayer_gatekeeper::Gatekeeper;
    use assayer_llm::MockOracle;
    use std::sync::Arc;
    use std::time::Duration;

    const METADATA_JSON: &str = r#"{
        "project_info": {"project_name": "Segovia", "company_name": "Aris Mining", "status": "Producing"},
        "location": {"country": "Colombia", "region": "Antioquia"},
        "report_details": {"effective_date": "2023-12-31", "qualified_persons": ["J. Doe, P.Geo."]}
    }"#;

    const RESOURCES_JSON: &str = r#"{
        "summary": {"commodity": "Gold", "unit": "g/t Au", "contained_unit": "koz Au"},
        "data": [
            {"area": "El Silencio", "category": "Indicated", "tonnes": 1000000, "grade": 10.0, "contained_metal": 321.5}
        ]
    }"#;

    const RESERVES_JSON: &str = r#"{
        "summary": {"mining_method": "Cut and fill"},
        "data": [
            {"area": "El Silencio", "category": "Probable", "tonnes": "1.2 Mt", "grade": 8.0, "contained_metal": 308.6}
        ]
    }"#;

    const ECONOMICS_JSON: &str = r#"{
        "cost_structure": {"capex": {"total": 1500000}},
        "valuation": {"npv": 0}
    }"#;

    fn sample_pages() -> PageIndex {
        PageIndex::from_texts([
            "NI 43-101 Technical Report\nTABLE 3-2 Mining Titles",
            "Certificate of Qualified Person",
            "TABLE 14-1 Mineral Resource Estimate",
            "TABLE 15-1 Mineral Reserve Estimate",
            "TABLE 21-1 Operating Costs (OPEX)",
        ])
    }

    fn scripted_oracle() -> MockOracle {
        let mut oracle = MockOracle::new("{}");
        oracle.add_response(instructions_for(ExtractionCategory::Metadata), METADATA_JSON);
        oracle.add_response(instructions_for(ExtractionCategory::Resources), RESOURCES_JSON);
        oracle.add_response(instructions_for(ExtractionCategory::Reserves), RESERVES_JSON);
        oracle.add_response(instructions_for(ExtractionCategory::Economics), ECONOMICS_JSON);
        oracle
    }

    fn extractor(oracle: MockOracle) -> Extractor<MockOracle> {
        Extractor::new(
            Arc::new(oracle),
            Gatekeeper::default_config(),
            ExtractorConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_full_extraction_flow() {
        let oracle = Arc::new(scripted_oracle());
        let extractor = Extractor::new(
            Arc::clone(&oracle),
            Gatekeeper::default_config(),
            ExtractorConfig::default(),
        );

        let result = extractor.extract("segovia", &sample_pages()).await;

        assert_eq!(oracle.call_count(), 4);
        assert!(result.failed_categories().is_empty());
        assert_eq!(result.metadata.total_pages, 5);

        let report = &result.report;
        assert_eq!(report.metadata.project_info.project_name.as_deref(), Some("Segovia"));
        assert_eq!(report.mineral_resources.data.len(), 1);
        assert_eq!(report.mineral_reserves.data[0].tonnes, 1_200_000.0);
        assert_eq!(report.economics.valuation.npv, Some(0.0));
    }

    #[tokio::test]
    async fn test_reserves_exceeding_resources_is_error() {
        let result = extractor(scripted_oracle())
            .extract("segovia", &sample_pages())
            .await;

        let validation = &result.report.validation;
        assert_eq!(validation.status, ValidationStatus::Error);
        assert!(validation
            .errors
            .iter()
            .any(|e| e.contains("exceed")));
    }

    #[tokio::test]
    async fn test_category_order_and_page_selection() {
        let result = extractor(scripted_oracle())
            .extract("segovia", &sample_pages())
            .await;

        let order: Vec<ExtractionCategory> = result.categories.iter().map(|c| c.category).collect();
        assert_eq!(order, ExtractionCategory::ALL.to_vec());

        // Metadata always includes the leading pages
        assert_eq!(result.categories[0].pages_selected, 5);
        // Reserves: only the TABLE 15-1 page
        assert_eq!(result.categories[2].pages_selected, 1);
    }

    #[tokio::test]
    async fn test_failure_isolation() {
        let mut oracle = scripted_oracle();
        oracle.add_error(instructions_for(ExtractionCategory::Reserves));

        let result = extractor(oracle).extract("segovia", &sample_pages()).await;

        assert_eq!(result.failed_categories(), vec![ExtractionCategory::Reserves]);
        assert!(result.categories[2]
            .failure
            .as_deref()
            .is_some_and(|f| f.contains("Oracle error")));

        let report = &result.report;
        assert!(report.mineral_reserves.data.is_empty());
        assert_eq!(report.mineral_resources.data.len(), 1);
        assert_eq!(report.metadata.location.country.as_deref(), Some("Colombia"));
        assert_eq!(report.economics.cost_structure.capex.total, Some(1_500_000.0));

        // Empty reserves on a producing project is only a warning
        assert_eq!(report.validation.status, ValidationStatus::Warning);
    }

    #[tokio::test]
    async fn test_invalid_json_yields_empty_record() {
        let mut oracle = scripted_oracle();
        oracle.add_response(
            instructions_for(ExtractionCategory::Economics),
            "This is not JSON",
        );

        let result = extractor(oracle).extract("segovia", &sample_pages()).await;

        assert_eq!(result.failed_categories(), vec![ExtractionCategory::Economics]);
        assert_eq!(result.report.economics, Default::default());
        assert!(!result.report.validation.summary.economics.has_npv);
    }

    #[tokio::test]
    async fn test_non_object_output_yields_empty_record() {
        let mut oracle = scripted_oracle();
        oracle.add_response(instructions_for(ExtractionCategory::Metadata), "[]");

        let result = extractor(oracle).extract("segovia", &sample_pages()).await;

        assert_eq!(result.failed_categories(), vec![ExtractionCategory::Metadata]);
        assert_eq!(result.report.metadata, Default::default());
    }

    #[tokio::test]
    async fn test_timeout_yields_empty_record() {
        let mut oracle = scripted_oracle();
        oracle.add_delayed_response(
            instructions_for(ExtractionCategory::Resources),
            Duration::from_millis(2500),
            RESOURCES_JSON,
        );

        let config = ExtractorConfig {
            extraction_timeout_secs: 1,
            ..ExtractorConfig::default()
        };
        let extractor = Extractor::new(Arc::new(oracle), Gatekeeper::default_config(), config);

        let result = extractor.extract("segovia", &sample_pages()).await;

        assert_eq!(result.failed_categories(), vec![ExtractionCategory::Resources]);
        assert!(result.categories[1]
            .failure
            .as_deref()
            .is_some_and(|f| f.contains("timeout")));
        assert!(result.report.mineral_resources.data.is_empty());
        assert_eq!(result.report.mineral_reserves.data.len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_items_are_skipped_and_counted() {
        let mut oracle = scripted_oracle();
        oracle.add_response(
            instructions_for(ExtractionCategory::Resources),
            r#"```json
{
    "data": [
        {"category": "Measured", "tonnes": "1,515 kt", "grade": 14.31, "contained_metal": 697},
        {"category": "Indicated"},
        {"category": "Inferred", "tonnes": 2000000, "grade": "9.5", "contained_metal": "611"}
    ]
}
```"#,
        );

        let result = extractor(oracle).extract("segovia", &sample_pages()).await;

        assert!(result.failed_categories().is_empty());
        assert_eq!(result.categories[1].skipped_items, 1);
        assert_eq!(result.skipped_items(), 1);

        let data = &result.report.mineral_resources.data;
        assert_eq!(data.len(), 2);
        assert_eq!(data[0].tonnes, 1_515_000.0);
        assert_eq!(data[1].grade, 9.5);
    }

    #[tokio::test]
    async fn test_page_cleaning_keeps_classification() {
        let oracle = scripted_oracle();
        let config = ExtractorConfig {
            clean_page_text: true,
            ..ExtractorConfig::default()
        };
        let extractor = Extractor::new(Arc::new(oracle), Gatekeeper::default_config(), config);

        let pages = PageIndex::from_texts([
            "Page 1 of 3\nIntroduction",
            "Page 2 of 3\nTABLE 15-1   Mineral   Reserve Estimate",
            "Page 3 of 3\nReferences",
        ]);
        let result = extractor.extract("cleaned", &pages).await;

        assert_eq!(result.categories[2].pages_selected, 1);
    }

    #[tokio::test]
    async fn test_empty_document() {
        let oracle = Arc::new(MockOracle::new("{}"));
        let extractor = Extractor::new(
            Arc::clone(&oracle),
            Gatekeeper::default_config(),
            ExtractorConfig::default(),
        );

        let result = extractor.extract("empty", &PageIndex::default()).await;

        assert_eq!(oracle.call_count(), 4);
        assert!(result.categories.iter().all(|c| c.pages_selected == 0));
        // No resources on a non-exploration project
        assert_eq!(result.report.validation.status, ValidationStatus::Error);
    }
}
