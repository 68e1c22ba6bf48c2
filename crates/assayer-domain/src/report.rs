//! Validation report and the consolidated per-document output

use crate::records::{Economics, MineralReserves, MineralResources, ProjectMetadata};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Overall validation status
///
/// Ordered by severity: `Ok < Warning < Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ValidationStatus {
    /// No findings
    #[default]
    Ok,
    /// Warnings only
    Warning,
    /// At least one error
    Error,
}

impl ValidationStatus {
    /// Reduce findings to a status: ERROR > WARNING > OK
    pub fn from_findings(errors: &[String], warnings: &[String]) -> Self {
        if !errors.is_empty() {
            ValidationStatus::Error
        } else if !warnings.is_empty() {
            ValidationStatus::Warning
        } else {
            ValidationStatus::Ok
        }
    }

    /// Get the status name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationStatus::Ok => "OK",
            ValidationStatus::Warning => "WARNING",
            ValidationStatus::Error => "ERROR",
        }
    }
}

impl fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived, read-only validation outcome for one document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Overall status, a pure function of `errors` and `warnings`
    pub status: ValidationStatus,

    /// Non-fatal findings
    pub warnings: Vec<String>,

    /// Fatal findings
    pub errors: Vec<String>,

    /// Per-category summaries
    pub summary: ReportSummary,
}

/// Per-category summaries
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Always present
    pub metadata: MetadataSummary,

    /// Present when resource rows were extracted
    pub mineral_resources: Option<ResourcesSummary>,

    /// Present when reserve rows were extracted
    pub mineral_reserves: Option<ReservesSummary>,

    /// Always present
    pub economics: EconomicsSummary,
}

/// Metadata summary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataSummary {
    /// Project name or `N/A`
    pub project: String,
    /// Company or `N/A`
    pub company: String,
    /// Country or `N/A`
    pub country: String,
    /// Region or `N/A`
    pub region: String,
    /// Effective date or `N/A`
    pub effective_date: String,
    /// Number of qualified persons
    pub qualified_persons: usize,
    /// Number of mining titles
    pub mining_titles_count: usize,
    /// Number of vein records
    pub veins_count: usize,
}

/// Resource summary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourcesSummary {
    /// Number of rows
    pub count: usize,
    /// Sum of row tonnes
    pub total_tonnes: f64,
    /// Sum of row contained metal
    pub total_metal: f64,
    /// Distinct categories, sorted
    pub categories: Vec<String>,
    /// Distinct named areas
    pub areas_count: usize,
    /// Commodity or `N/A`
    pub commodity: String,
    /// Drilling campaigns
    pub drilling_campaigns: usize,
    /// Cut-off grade rows
    pub cut_off_grades_count: usize,
    /// Data availability rows
    pub data_availability_count: usize,
    /// Block model rows
    pub block_model_stats_count: usize,
    /// Sample statistic rows
    pub sample_statistics_count: usize,
}

/// Reserve summary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReservesSummary {
    /// Number of rows
    pub count: usize,
    /// Sum of row tonnes
    pub total_tonnes: f64,
    /// Sum of row contained metal
    pub total_metal: f64,
    /// Distinct categories, sorted
    pub categories: Vec<String>,
    /// Mining method or `N/A`
    pub mining_method: String,
    /// Life of mine (years)
    pub life_of_mine_years: Option<f64>,
    /// Reserve cut-off rows
    pub cut_off_grades_count: usize,
    /// Whether a reserve cut-off table was extracted
    pub has_cut_off_table: bool,
}

/// Economics summary with display strings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EconomicsSummary {
    /// Total capex
    pub capex_total: String,
    /// Sustaining capex
    pub capex_sustaining: String,
    /// Non-sustaining capex
    pub capex_non_sustaining: String,
    /// Mining cost per tonne
    pub mining_cost_per_t: String,
    /// Processing cost per tonne
    pub processing_cost_per_t: String,
    /// G&A cost per tonne
    pub ga_cost_per_t: String,
    /// Gold price assumption
    pub gold_price: String,
    /// NPV present (zero counts)
    pub has_npv: bool,
    /// IRR present (zero counts)
    pub has_irr: bool,
    /// Operating cost lines
    pub opex_detail_count: usize,
    /// Capital cost lines
    pub capex_detail_count: usize,
    /// Years of metallurgy history
    pub metallurgy_years: usize,
    /// Credit lines
    pub credits_count: usize,
}

/// Consolidated, persisted output for one document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MiningReport {
    /// Validation outcome
    pub validation: ValidationReport,
    /// Metadata record
    pub metadata: ProjectMetadata,
    /// Resources record
    pub mineral_resources: MineralResources,
    /// Reserves record
    pub mineral_reserves: MineralReserves,
    /// Economics record
    pub economics: Economics,
}
