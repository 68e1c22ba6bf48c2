//! Extraction categories

use crate::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four independent extraction passes run per document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionCategory {
    /// Project, location and report details
    Metadata,
    /// Mineral resource estimates
    Resources,
    /// Mineral reserve estimates
    Reserves,
    /// Costs, valuation and processing
    Economics,
}

impl ExtractionCategory {
    /// All categories in pipeline order
    pub const ALL: [ExtractionCategory; 4] = [
        ExtractionCategory::Metadata,
        ExtractionCategory::Resources,
        ExtractionCategory::Reserves,
        ExtractionCategory::Economics,
    ];

    /// Get the category name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionCategory::Metadata => "metadata",
            ExtractionCategory::Resources => "resources",
            ExtractionCategory::Reserves => "reserves",
            ExtractionCategory::Economics => "economics",
        }
    }
}

impl fmt::Display for ExtractionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ExtractionCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "metadata" => Ok(ExtractionCategory::Metadata),
            "resources" => Ok(ExtractionCategory::Resources),
            "reserves" => Ok(ExtractionCategory::Reserves),
            "economics" => Ok(ExtractionCategory::Economics),
            _ => Err(DomainError::UnknownCategory(s.to_string())),
        }
    }
}
