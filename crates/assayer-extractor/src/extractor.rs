//! Core Extractor implementation

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::parser::{parse_record, FromModelOutput};
use crate::prompt::instructions_for;
use crate::types::{CategoryOutcome, ExtractionMetadata, ExtractionResult};
use assayer_domain::normalize::clean_page_text;
use assayer_domain::traits::ExtractionOracle;
use assayer_domain::{
    Economics, ExtractionCategory, MineralReserves, MineralResources, MiningReport, PageIndex,
    ProjectMetadata,
};
use assayer_gatekeeper::Gatekeeper;
use assayer_locator::{CategoryTagMap, PageClassifier, PageSelector};
use std::borrow::Cow;
use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Runs the four category extractions for a document and validates the result
pub struct Extractor<O>
where
    O: ExtractionOracle,
{
    oracle: Arc<O>,
    classifier: PageClassifier,
    selector: PageSelector,
    gatekeeper: Gatekeeper,
    config: ExtractorConfig,
}

impl<O> Extractor<O>
where
    O: ExtractionOracle + Send + Sync + 'static,
    O::Error: std::fmt::Display,
{
    /// Create a new Extractor with the default classifier and selector
    pub fn new(oracle: Arc<O>, gatekeeper: Gatekeeper, config: ExtractorConfig) -> Self {
        Self {
            oracle,
            classifier: PageClassifier::default(),
            selector: PageSelector::default(),
            gatekeeper,
            config,
        }
    }

    /// Replace the page classifier
    pub fn with_classifier(mut self, classifier: PageClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Replace the page selector
    pub fn with_selector(mut self, selector: PageSelector) -> Self {
        self.selector = selector;
        self
    }

    /// Access the configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract and validate one document
    ///
    /// Never fails: a category whose oracle call or parse fails contributes
    /// its empty record, and the reason is kept in
    /// [`ExtractionResult::categories`].
    pub async fn extract(&self, source_id: &str, pages: &PageIndex) -> ExtractionResult {
        let start_time = Instant::now();

        info!(
            "Starting extraction for '{}' ({} pages)",
            source_id,
            pages.len()
        );

        let pages: Cow<'_, PageIndex> = if self.config.clean_page_text {
            Cow::Owned(pages.map_text(clean_page_text))
        } else {
            Cow::Borrowed(pages)
        };

        let tags = self.classifier.classify(&pages);
        debug!("Classifier produced {} tag(s)", tags.total_tags());

        let (metadata, resources, reserves, economics) = tokio::join!(
            self.run_category::<ProjectMetadata>(ExtractionCategory::Metadata, &pages, &tags),
            self.run_category::<MineralResources>(ExtractionCategory::Resources, &pages, &tags),
            self.run_category::<MineralReserves>(ExtractionCategory::Reserves, &pages, &tags),
            self.run_category::<Economics>(ExtractionCategory::Economics, &pages, &tags),
        );

        let categories = vec![
            metadata.report(),
            resources.report(),
            reserves.report(),
            economics.report(),
        ];

        let validation = self.gatekeeper.validate(
            &metadata.record,
            &resources.record,
            &reserves.record,
            &economics.record,
        );

        let processing_time_ms = start_time.elapsed().as_millis() as u64;
        let failed = categories.iter().filter(|c| c.failure.is_some()).count();

        info!(
            "Extraction complete for '{}': status {}, {} failed categor{}, {} ms",
            source_id,
            validation.status,
            failed,
            if failed == 1 { "y" } else { "ies" },
            processing_time_ms
        );

        let metadata_info = ExtractionMetadata {
            source_id: source_id.to_string(),
            total_pages: pages.len(),
            total_tags: tags.total_tags(),
            processing_time_ms,
            timestamp: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
        };

        ExtractionResult {
            report: MiningReport {
                validation,
                metadata: metadata.record,
                mineral_resources: resources.record,
                mineral_reserves: reserves.record,
                economics: economics.record,
            },
            categories,
            metadata: metadata_info,
        }
    }

    /// Select, render, call and parse one category
    async fn run_category<T>(
        &self,
        category: ExtractionCategory,
        pages: &PageIndex,
        tags: &CategoryTagMap,
    ) -> CategoryOutcome<T>
    where
        T: FromModelOutput,
    {
        let start_time = Instant::now();

        let selected = self
            .selector
            .select(tags, pages.len(), category, self.config.max_pages(category));
        let content = pages.render(&selected);

        debug!(
            "{}: sending {} page(s), {} chars",
            category,
            selected.len(),
            content.len()
        );

        let outcome = self
            .call_oracle(category, content)
            .await
            .and_then(|response| parse_record::<T>(&response));

        let (record, skipped_items, failure) = match outcome {
            Ok((record, skipped)) => {
                if skipped > 0 {
                    warn!("{}: skipped {} malformed item(s)", category, skipped);
                }
                (record, skipped, None)
            }
            Err(e) => {
                warn!("{}: extraction failed, using empty record: {}", category, e);
                (T::default(), 0, Some(e))
            }
        };

        CategoryOutcome {
            category,
            record,
            pages: selected,
            skipped_items,
            failure,
            elapsed_ms: start_time.elapsed().as_millis() as u64,
        }
    }

    /// Run the blocking oracle call on the blocking pool, bounded by the timeout
    async fn call_oracle(
        &self,
        category: ExtractionCategory,
        content: String,
    ) -> Result<String, ExtractorError> {
        let oracle = Arc::clone(&self.oracle);
        let instructions = instructions_for(category);

        let task = tokio::task::spawn_blocking(move || {
            oracle
                .extract(&instructions, &content)
                .map_err(|e| e.to_string())
        });

        match timeout(self.config.extraction_timeout(), task).await {
            Err(_) => Err(ExtractorError::Timeout(self.config.extraction_timeout_secs)),
            Ok(Err(join_error)) => Err(ExtractorError::Oracle(format!(
                "extraction task failed: {}",
                join_error
            ))),
            Ok(Ok(Err(message))) => Err(ExtractorError::Oracle(message)),
            Ok(Ok(Ok(response))) => {
                debug!("{}: response length {} chars", category, response.len());
                Ok(response)
            }
        }
    }
}
