//! Configuration for the Extractor

use assayer_domain::ExtractionCategory;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the Extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Page budget for the metadata pass
    pub metadata_max_pages: usize,

    /// Page budget for the resources pass
    pub resources_max_pages: usize,

    /// Page budget for the reserves pass
    pub reserves_max_pages: usize,

    /// Page budget for the economics pass
    pub economics_max_pages: usize,

    /// Maximum time for a single oracle call (seconds)
    pub extraction_timeout_secs: u64,

    /// Strip page footers and running headers before sending text
    pub clean_page_text: bool,
}

impl ExtractorConfig {
    /// Get the extraction timeout as a Duration
    pub fn extraction_timeout(&self) -> Duration {
        Duration::from_secs(self.extraction_timeout_secs)
    }

    /// Page budget for a category
    pub fn max_pages(&self, category: ExtractionCategory) -> usize {
        match category {
            ExtractionCategory::Metadata => self.metadata_max_pages,
            ExtractionCategory::Resources => self.resources_max_pages,
            ExtractionCategory::Reserves => self.reserves_max_pages,
            ExtractionCategory::Economics => self.economics_max_pages,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        for category in ExtractionCategory::ALL {
            if self.max_pages(category) == 0 {
                return Err(format!("{}_max_pages must be greater than 0", category));
            }
        }
        if self.extraction_timeout_secs == 0 {
            return Err("extraction_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for ExtractorConfig {
    /// Default configuration with balanced settings
    fn default() -> Self {
        Self {
            metadata_max_pages: 25,
            resources_max_pages: 30,
            reserves_max_pages: 20,
            economics_max_pages: 30,
            extraction_timeout_secs: 120,
            clean_page_text: false,
        }
    }
}

impl ExtractorConfig {
    /// Aggressive preset: fewer pages and shorter timeouts for cheaper runs
    pub fn aggressive() -> Self {
        Self {
            metadata_max_pages: 15,
            resources_max_pages: 20,
            reserves_max_pages: 12,
            economics_max_pages: 20,
            extraction_timeout_secs: 60,
            clean_page_text: true,
        }
    }

    /// Lenient preset: more pages and longer timeouts for better recall
    pub fn lenient() -> Self {
        Self {
            metadata_max_pages: 40,
            resources_max_pages: 50,
            reserves_max_pages: 30,
            economics_max_pages: 50,
            extraction_timeout_secs: 300,
            clean_page_text: false,
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
