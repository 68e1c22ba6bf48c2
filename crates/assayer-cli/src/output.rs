//! Output formatting for the CLI.

use crate::commands::scan::ScanReport;
use crate::config::OutputFormat;
use crate::error::Result;
use crate::pipeline::{BatchSummary, DocumentReport};
use assayer_domain::{ValidationReport, ValidationStatus};
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format one processed document.
    pub fn format_document(&self, report: &DocumentReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
            OutputFormat::Quiet => Ok(format!(
                "{} {}",
                report.output.display(),
                report.validation.status
            )),
            OutputFormat::Table => Ok(self.format_document_table(report)),
        }
    }

    fn format_document_table(&self, report: &DocumentReport) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Category", "Pages", "Skipped items", "Result", "Time (ms)"]);

        for category in &report.categories {
            let result = match &category.failure {
                Some(reason) => self.colorize(reason, "red"),
                None => self.colorize("ok", "green"),
            };
            builder.push_record([
                category.category.to_string(),
                category.pages_selected.to_string(),
                category.skipped_items.to_string(),
                result,
                category.elapsed_ms.to_string(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        let mut out = format!(
            "{} ({} pages) -> {}\n{}\n{}",
            report.source.display(),
            report.total_pages,
            report.output.display(),
            table,
            self.validation_block(&report.validation)
        );
        out.push_str(&format!("\nProcessed in {} ms", report.processing_time_ms));
        out
    }

    /// Format the end-of-run summary.
    pub fn format_batch(&self, summary: &BatchSummary) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(summary)?),
            OutputFormat::Quiet => {
                let lines: Vec<String> = summary
                    .documents
                    .iter()
                    .map(|d| format!("{} {}", d.output.display(), d.validation.status))
                    .chain(
                        summary
                            .failures
                            .iter()
                            .map(|f| format!("{} FAILED", f.source.display())),
                    )
                    .collect();
                Ok(lines.join("\n"))
            }
            OutputFormat::Table => Ok(self.format_batch_table(summary)),
        }
    }

    fn format_batch_table(&self, summary: &BatchSummary) -> String {
        if summary.total() == 0 {
            return self.colorize("No documents found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Document", "Status", "Errors", "Warnings", "Failed categories", "Time (ms)"]);

        for doc in &summary.documents {
            let failed: Vec<&str> = doc
                .categories
                .iter()
                .filter(|c| c.failure.is_some())
                .map(|c| c.category.as_str())
                .collect();
            builder.push_record([
                file_name(&doc.source),
                self.status(doc.validation.status),
                doc.validation.errors.len().to_string(),
                doc.validation.warnings.len().to_string(),
                if failed.is_empty() { "-".to_string() } else { failed.join(", ") },
                doc.processing_time_ms.to_string(),
            ]);
        }
        for failure in &summary.failures {
            builder.push_record([
                file_name(&failure.source),
                self.colorize("FAILED", "red"),
                "-".to_string(),
                "-".to_string(),
                failure.reason.clone(),
                "-".to_string(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        let line = format!(
            "{} of {} document(s) processed in {} ms",
            summary.documents.len(),
            summary.total(),
            summary.elapsed_ms
        );
        let footer = if summary.failures.is_empty() {
            self.success(&line)
        } else {
            self.warning(&format!("{}, {} failed", line, summary.failures.len()))
        };

        format!("{}\n{}", table, footer)
    }

    /// Format the page map of a scanned document.
    pub fn format_scan(&self, scan: &ScanReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(scan)?),
            OutputFormat::Quiet => Ok(scan
                .selections
                .iter()
                .map(|s| format!("{} {}", s.category, compact_pages(&s.pages)))
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                let mut tags = Builder::default();
                tags.push_record(["Tag", "Pages"]);
                for t in &scan.tags {
                    tags.push_record([t.tag.to_string(), compact_pages(&t.pages)]);
                }
                let mut tags = tags.build();
                tags.with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));

                let mut selections = Builder::default();
                selections.push_record(["Category", "Selected", "Limit", "Pages"]);
                for s in &scan.selections {
                    selections.push_record([
                        s.category.to_string(),
                        s.pages.len().to_string(),
                        s.max_pages.to_string(),
                        compact_pages(&s.pages),
                    ]);
                }
                let mut selections = selections.build();
                selections
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));

                Ok(format!(
                    "{}\n{}\n{}",
                    self.info(&format!(
                        "{}: {} pages, {} tag(s)",
                        scan.source.display(),
                        scan.total_pages,
                        scan.total_tags
                    )),
                    tags,
                    selections
                ))
            }
        }
    }

    /// Format a validation report.
    pub fn format_validation(&self, report: &ValidationReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
            OutputFormat::Quiet => Ok(report.status.to_string()),
            OutputFormat::Table => {
                let s = &report.summary;
                let mut builder = Builder::default();
                builder.push_record(["Field", "Value"]);
                builder.push_record(["Project", s.metadata.project.as_str()]);
                builder.push_record(["Company", s.metadata.company.as_str()]);
                builder.push_record(["Country", s.metadata.country.as_str()]);
                builder.push_record(["Effective date", s.metadata.effective_date.as_str()]);
                builder.push_record([
                    "Qualified persons".to_string(),
                    s.metadata.qualified_persons.to_string(),
                ]);
                match &s.mineral_resources {
                    Some(r) => builder.push_record([
                        "Resources".to_string(),
                        format!("{} row(s), {:.0} t, {}", r.count, r.total_tonnes, r.categories.join(", ")),
                    ]),
                    None => builder.push_record(["Resources", "N/A"]),
                }
                match &s.mineral_reserves {
                    Some(r) => builder.push_record([
                        "Reserves".to_string(),
                        format!("{} row(s), {:.0} t, {}", r.count, r.total_tonnes, r.categories.join(", ")),
                    ]),
                    None => builder.push_record(["Reserves", "N/A"]),
                }
                builder.push_record(["Capex (total)", s.economics.capex_total.as_str()]);
                builder.push_record(["Gold price", s.economics.gold_price.as_str()]);

                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));

                Ok(format!("{}\n{}", table, self.validation_block(report)))
            }
        }
    }

    fn validation_block(&self, report: &ValidationReport) -> String {
        let mut lines = vec![format!("Status: {}", self.status(report.status))];
        lines.extend(report.errors.iter().map(|e| self.error(e)));
        lines.extend(report.warnings.iter().map(|w| self.warning(w)));
        lines.join("\n")
    }

    /// Colored validation status.
    pub fn status(&self, status: ValidationStatus) -> String {
        let color = match status {
            ValidationStatus::Ok => "green",
            ValidationStatus::Warning => "yellow",
            ValidationStatus::Error => "red",
        };
        self.colorize(status.as_str(), color)
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

/// Render ascending page indices as ranges: `0-4, 12, 20-22`
pub fn compact_pages(pages: &[usize]) -> String {
    if pages.is_empty() {
        return "-".to_string();
    }

    let mut parts = Vec::new();
    let mut start = pages[0];
    let mut prev = pages[0];
    for &page in &pages[1..] {
        if page == prev + 1 {
            prev = page;
            continue;
        }
        parts.push(range_label(start, prev));
        start = page;
        prev = page;
    }
    parts.push(range_label(start, prev));
    parts.join(", ")
}

fn range_label(start: usize, end: usize) -> String {
    if start == end {
        start.to_string()
    } else {
        format!("{}-{}", start, end)
    }
}

fn file_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::DocumentFailure;
    use assayer_domain::ExtractionCategory;
    use assayer_extractor::CategoryReport;
    use std::path::PathBuf;

    fn document(status: ValidationStatus) -> DocumentReport {
        DocumentReport {
            source: PathBuf::from("data/eagle.pdf"),
            output: PathBuf::from("outputs/mining_report_eagle.json"),
            total_pages: 120,
            validation: ValidationReport {
                status,
                warnings: vec!["Mineral reserves empty".to_string()],
                errors: Vec::new(),
                summary: Default::default(),
            },
            categories: ExtractionCategory::ALL
                .iter()
                .map(|&category| CategoryReport {
                    category,
                    pages_selected: 10,
                    skipped_items: 0,
                    failure: None,
                    elapsed_ms: 5,
                })
                .collect(),
            processing_time_ms: 42,
        }
    }

    #[test]
    fn test_compact_pages() {
        assert_eq!(compact_pages(&[]), "-");
        assert_eq!(compact_pages(&[3]), "3");
        assert_eq!(compact_pages(&[0, 1, 2, 3, 4, 12, 20, 21, 22]), "0-4, 12, 20-22");
    }

    #[test]
    fn test_document_table_lists_categories() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter
            .format_document(&document(ValidationStatus::Warning))
            .unwrap();
        for name in ["metadata", "resources", "reserves", "economics"] {
            assert!(output.contains(name));
        }
        assert!(output.contains("Status: WARNING"));
        assert!(output.contains("⚠ Mineral reserves empty"));
    }

    #[test]
    fn test_quiet_document() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let output = formatter.format_document(&document(ValidationStatus::Ok)).unwrap();
        assert_eq!(output, "outputs/mining_report_eagle.json OK");
    }

    #[test]
    fn test_batch_table_includes_failures() {
        let summary = BatchSummary {
            documents: vec![document(ValidationStatus::Ok)],
            failures: vec![DocumentFailure {
                source: PathBuf::from("data/broken.pdf"),
                reason: "invalid PDF".to_string(),
            }],
            elapsed_ms: 100,
        };

        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_batch(&summary).unwrap();
        assert!(output.contains("eagle.pdf"));
        assert!(output.contains("broken.pdf"));
        assert!(output.contains("FAILED"));
        assert!(output.contains("1 of 2 document(s) processed"));
    }

    #[test]
    fn test_batch_json() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_batch(&BatchSummary::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert!(value["documents"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_validation_quiet_is_status() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let report = ValidationReport {
            status: ValidationStatus::Error,
            ..Default::default()
        };
        assert_eq!(formatter.format_validation(&report).unwrap(), "ERROR");
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("done"), "✓ done");
        assert_eq!(formatter.status(ValidationStatus::Error), "ERROR");
    }
}
