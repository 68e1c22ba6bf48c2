//! Batch pipeline: discover documents, extract each one, persist the reports.

use crate::config::{BatchSettings, Config};
use crate::error::{CliError, Result};
use assayer_domain::traits::{DocumentLoader, ExtractionOracle};
use assayer_domain::{MiningReport, ValidationReport};
use assayer_extractor::{CategoryReport, Extractor};
use assayer_gatekeeper::Gatekeeper;
use assayer_locator::{PageClassifier, PageSelector};
use serde::Serialize;
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

/// Where to read, where to write, how many at once
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Directory scanned for reports
    pub input_dir: PathBuf,
    /// Directory receiving the JSON reports
    pub output_dir: PathBuf,
    /// Output file name prefix
    pub file_prefix: String,
    /// Accepted extensions, lowercase without dot
    pub extensions: Vec<String>,
    /// Documents processed concurrently
    pub jobs: usize,
}

impl BatchOptions {
    /// Start from the configured batch defaults
    pub fn from_settings(settings: &BatchSettings) -> Self {
        Self {
            input_dir: settings.input_dir.clone(),
            output_dir: settings.output_dir.clone(),
            file_prefix: settings.file_prefix.clone(),
            extensions: settings.extensions.clone(),
            jobs: settings.jobs,
        }
    }

    /// Apply command-line overrides
    pub fn with_overrides(
        mut self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        jobs: Option<usize>,
    ) -> Self {
        if let Some(input) = input {
            self.input_dir = input;
        }
        if let Some(output) = output {
            self.output_dir = output;
        }
        if let Some(jobs) = jobs {
            self.jobs = jobs;
        }
        self
    }

    /// `<output_dir>/<prefix><stem>.json`
    pub fn output_path(&self, source: &Path) -> PathBuf {
        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "report".to_string());
        self.output_dir
            .join(format!("{}{}.json", self.file_prefix, stem))
    }
}

/// One successfully processed document
#[derive(Debug, Clone, Serialize)]
pub struct DocumentReport {
    /// Input file
    pub source: PathBuf,
    /// Written JSON file
    pub output: PathBuf,
    /// Pages in the document
    pub total_pages: usize,
    /// Validation outcome
    pub validation: ValidationReport,
    /// Per-category outcomes
    pub categories: Vec<CategoryReport>,
    /// Wall time in milliseconds
    pub processing_time_ms: u64,
}

/// One document that produced no report
#[derive(Debug, Clone, Serialize)]
pub struct DocumentFailure {
    /// Input file
    pub source: PathBuf,
    /// Why it was skipped
    pub reason: String,
}

/// Outcome of a whole run
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchSummary {
    /// Processed documents, in input order
    pub documents: Vec<DocumentReport>,
    /// Skipped documents, in input order
    pub failures: Vec<DocumentFailure>,
    /// Wall time in milliseconds
    pub elapsed_ms: u64,
}

impl BatchSummary {
    /// Documents seen
    pub fn total(&self) -> usize {
        self.documents.len() + self.failures.len()
    }
}

/// Assemble an extractor from every configured layer
pub fn build_extractor<O>(oracle: Arc<O>, config: &Config) -> Extractor<O>
where
    O: ExtractionOracle + Send + Sync + 'static,
    O::Error: Display,
{
    Extractor::new(
        oracle,
        Gatekeeper::new(config.validation.clone()),
        config.extractor.clone(),
    )
    .with_classifier(PageClassifier::new(config.classifier.clone()))
    .with_selector(PageSelector::new(config.selector.clone()))
}

/// Files in `dir` whose extension is in `extensions`, sorted by name
pub fn discover_documents(dir: &Path, extensions: &[String]) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(CliError::InvalidInput(format!(
            "Input directory not found: {}",
            dir.display()
        )));
    }

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let accepted = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| extensions.iter().any(|x| x.eq_ignore_ascii_case(e)))
            .unwrap_or(false);
        if accepted {
            paths.push(path);
        }
    }

    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(paths)
}

/// Write a report as UTF-8 JSON with 4-space indentation
pub fn write_report(path: &Path, report: &MiningReport) -> Result<()> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    report.serialize(&mut ser)?;
    buf.push(b'\n');
    fs::write(path, buf)?;
    Ok(())
}

/// Read a persisted report
pub fn read_report(path: &Path) -> Result<MiningReport> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Run the pipeline over every document in the input directory
///
/// Fails only when the input directory is missing or the output directory
/// cannot be created. Per-document failures land in
/// [`BatchSummary::failures`].
pub async fn run_batch<O, L>(
    extractor: Arc<Extractor<O>>,
    loader: Arc<L>,
    options: &BatchOptions,
) -> Result<BatchSummary>
where
    O: ExtractionOracle + Send + Sync + 'static,
    O::Error: Display,
    L: DocumentLoader + Send + Sync + 'static,
    L::Error: Display,
{
    let start = Instant::now();
    let paths = discover_documents(&options.input_dir, &options.extensions)?;
    fs::create_dir_all(&options.output_dir)?;

    if paths.is_empty() {
        warn!("No documents found in {}", options.input_dir.display());
    } else {
        info!(
            "Processing {} document(s) from {} with {} job(s)",
            paths.len(),
            options.input_dir.display(),
            options.jobs
        );
    }

    let semaphore = Arc::new(Semaphore::new(options.jobs.max(1)));
    let mut handles = Vec::with_capacity(paths.len());

    for path in paths {
        let extractor = Arc::clone(&extractor);
        let loader = Arc::clone(&loader);
        let semaphore = Arc::clone(&semaphore);
        let output = options.output_path(&path);

        handles.push((
            path.clone(),
            tokio::spawn(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(e) => return Err(e.to_string()),
                };
                process_document(&extractor, loader, path, output).await
            }),
        ));
    }

    let mut summary = BatchSummary::default();
    for (source, handle) in handles {
        let outcome = match handle.await {
            Ok(outcome) => outcome,
            Err(e) => Err(format!("document task failed: {}", e)),
        };

        match outcome {
            Ok(report) => summary.documents.push(report),
            Err(reason) => {
                error!("Skipping {}: {}", source.display(), reason);
                summary.failures.push(DocumentFailure { source, reason });
            }
        }
    }

    summary.elapsed_ms = start.elapsed().as_millis() as u64;
    info!(
        "Batch finished: {} processed, {} failed in {} ms",
        summary.documents.len(),
        summary.failures.len(),
        summary.elapsed_ms
    );
    Ok(summary)
}

async fn process_document<O, L>(
    extractor: &Extractor<O>,
    loader: Arc<L>,
    source: PathBuf,
    output: PathBuf,
) -> std::result::Result<DocumentReport, String>
where
    O: ExtractionOracle + Send + Sync + 'static,
    O::Error: Display,
    L: DocumentLoader + Send + Sync + 'static,
    L::Error: Display,
{
    let start = Instant::now();
    info!("Loading {}", source.display());

    let load_path = source.clone();
    let pages = tokio::task::spawn_blocking(move || {
        loader.load(&load_path).map_err(|e| e.to_string())
    })
    .await
    .map_err(|e| format!("load task failed: {}", e))??;

    let source_id = source
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let result = extractor.extract(&source_id, &pages).await;

    write_report(&output, &result.report).map_err(|e| e.to_string())?;
    info!(
        "Wrote {} ({})",
        output.display(),
        result.report.validation.status
    );

    Ok(DocumentReport {
        source,
        output,
        total_pages: result.metadata.total_pages,
        validation: result.report.validation,
        categories: result.categories,
        processing_time_ms: start.elapsed().as_millis() as u64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(dir: &Path) -> BatchOptions {
        BatchOptions::from_settings(&BatchSettings::default())
            .with_overrides(Some(dir.to_path_buf()), Some(dir.join("out")), Some(2))
    }

    #[test]
    fn test_output_path_uses_prefix_and_stem() {
        let opts = options(Path::new("/data"));
        assert_eq!(
            opts.output_path(Path::new("/data/Eagle Project.pdf")),
            PathBuf::from("/data/out/mining_report_Eagle Project.json")
        );
    }

    #[test]
    fn test_overrides_replace_settings() {
        let opts = options(Path::new("in"));
        assert_eq!(opts.input_dir, PathBuf::from("in"));
        assert_eq!(opts.jobs, 2);
        assert_eq!(opts.file_prefix, "mining_report_");
    }

    #[test]
    fn test_discover_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.pdf", "a.TXT", "notes.md", "c.txt"] {
            fs::write(dir.path().join(name), "x").unwrap();
        }
        fs::create_dir(dir.path().join("sub.pdf")).unwrap();

        let found = discover_documents(dir.path(), &["pdf".into(), "txt".into()]).unwrap();
        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.TXT", "b.pdf", "c.txt"]);
    }

    #[test]
    fn test_discover_missing_dir() {
        let result = discover_documents(Path::new("/nonexistent/assayer"), &["pdf".into()]);
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
    }

    #[test]
    fn test_report_written_with_four_space_indent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("r.json");
        write_report(&path, &MiningReport::default()).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("{\n    \"validation\""));
        assert_eq!(read_report(&path).unwrap(), MiningReport::default());
    }
}
