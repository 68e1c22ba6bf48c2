//! End-to-end batch runs against a mock oracle.

use assayer_cli::pipeline::read_report;
use assayer_cli::{build_extractor, run_batch, BatchOptions, Config, FileLoader};
use assayer_domain::{ExtractionCategory, ValidationStatus};
use assayer_extractor::instructions_for;
use assayer_llm::MockOracle;
use std::fs;
use std::path::Path;
use std::sync::Arc;

const METADATA: &str = r#"{
    "project_info": {"project_name": "Eagle Gold", "company_name": "Northern Metals"},
    "report_details": {"effective_date": "2023-06-30", "qualified_persons": ["J. Smith, P.Geo."]}
}"#;

const RESOURCES: &str = r#"{
    "summary": {"commodity": "Gold", "unit": "g/t Au"},
    "data": [
        {"area": "Main", "category": "Indicated", "tonnes": "1.0 Mt", "grade": 4.5, "contained_metal": 145000},
        {"area": "Main", "category": "Inferred", "tonnes": 600000, "grade": "3.9", "contained_metal": 75000}
    ]
}"#;

const RESERVES: &str = r#"```json
{"data": [{"area": "Main", "category": "Probable", "tonnes": 900000, "grade": 4.1, "contained_metal": 118000}]}
```"#;

fn oracle() -> MockOracle {
    let mut oracle = MockOracle::new("{}");
    oracle.add_response(instructions_for(ExtractionCategory::Metadata), METADATA);
    oracle.add_response(instructions_for(ExtractionCategory::Resources), RESOURCES);
    oracle.add_response(instructions_for(ExtractionCategory::Reserves), RESERVES);
    oracle
}

fn write_document(dir: &Path, name: &str) {
    let pages = [
        "Eagle Gold Project NI 43-101 Technical Report",
        "TABLE 3-2 Mining titles",
        "Qualified Person certificate",
        "TABLE 14-1 Mineral Resource Estimate",
        "TABLE 15-1 Mineral Reserve Estimate",
        "TABLE 21-1 Capital costs",
    ];
    fs::write(dir.join(name), pages.join("\x0c")).unwrap();
}

fn options(input: &Path, output: &Path, jobs: usize) -> BatchOptions {
    BatchOptions::from_settings(&Config::default().batch).with_overrides(
        Some(input.to_path_buf()),
        Some(output.to_path_buf()),
        Some(jobs),
    )
}

#[tokio::test(flavor = "multi_thread")]
async fn test_batch_writes_one_report_per_good_document() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let out_dir = output.path().join("reports");

    write_document(input.path(), "eagle.txt");
    write_document(input.path(), "falcon.txt");
    fs::write(input.path().join("broken.pdf"), "not a pdf").unwrap();
    fs::write(input.path().join("notes.md"), "ignored").unwrap();

    let extractor = Arc::new(build_extractor(Arc::new(oracle()), &Config::default()));
    let summary = run_batch(extractor, Arc::new(FileLoader), &options(input.path(), &out_dir, 2))
        .await
        .unwrap();

    assert_eq!(summary.documents.len(), 2);
    assert_eq!(summary.failures.len(), 1);
    assert!(summary.failures[0].source.ends_with("broken.pdf"));

    let mut written: Vec<String> = fs::read_dir(&out_dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    written.sort();
    assert_eq!(
        written,
        vec!["mining_report_eagle.json", "mining_report_falcon.json"]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_persisted_report_layout() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_document(input.path(), "eagle.txt");

    let extractor = Arc::new(build_extractor(Arc::new(oracle()), &Config::default()));
    let summary = run_batch(extractor, Arc::new(FileLoader), &options(input.path(), output.path(), 1))
        .await
        .unwrap();
    let document = &summary.documents[0];

    let text = fs::read_to_string(&document.output).unwrap();
    assert!(text.starts_with("{\n    \"validation\": {"));

    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
    for key in ["validation", "metadata", "mineral_resources", "mineral_reserves", "economics"] {
        assert!(keys.contains(&key), "missing {}", key);
    }

    let report = read_report(&document.output).unwrap();
    assert_eq!(report.mineral_resources.data.len(), 2);
    assert_eq!(report.mineral_resources.data[0].tonnes, 1_000_000.0);
    assert_eq!(report.mineral_reserves.data.len(), 1);
    assert_eq!(
        report.metadata.project_info.project_name.as_deref(),
        Some("Eagle Gold")
    );
    assert_ne!(report.validation.status, ValidationStatus::Error);
    assert_eq!(report.validation, document.validation);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_failed_category_does_not_fail_document() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_document(input.path(), "eagle.txt");

    let mut oracle = oracle();
    oracle.add_error(instructions_for(ExtractionCategory::Economics));

    let extractor = Arc::new(build_extractor(Arc::new(oracle), &Config::default()));
    let summary = run_batch(extractor, Arc::new(FileLoader), &options(input.path(), output.path(), 1))
        .await
        .unwrap();

    assert!(summary.failures.is_empty());
    let document = &summary.documents[0];
    let failed: Vec<_> = document
        .categories
        .iter()
        .filter(|c| c.failure.is_some())
        .map(|c| c.category)
        .collect();
    assert_eq!(failed, vec![ExtractionCategory::Economics]);

    let report = read_report(&document.output).unwrap();
    assert_eq!(report.mineral_resources.data.len(), 2);
}

#[tokio::test]
async fn test_missing_input_directory_is_an_error() {
    let output = tempfile::tempdir().unwrap();
    let extractor = Arc::new(build_extractor(Arc::new(MockOracle::default()), &Config::default()));

    let result = run_batch(
        extractor,
        Arc::new(FileLoader),
        &options(Path::new("/nonexistent/assayer-input"), output.path(), 1),
    )
    .await;

    assert!(result.is_err());
}
