//! Cross-category validation and aggregation

use crate::ValidationConfig;
use assayer_domain::records::CutOffGrade;
use assayer_domain::{
    Economics, EconomicsSummary, MetadataSummary, MineralReserves, MineralResources, MiningReport,
    ProjectMetadata, ReportSummary, ReservesSummary, ResourceItem, ResourcesSummary,
    ValidationReport, ValidationStatus,
};
use std::collections::BTreeSet;
use tracing::debug;

const NOT_AVAILABLE: &str = "N/A";

/// The Gatekeeper derives the validation report for one document
///
/// Pure function of its inputs: no I/O and no state between calls.
#[derive(Debug, Clone, Default)]
pub struct Gatekeeper {
    config: ValidationConfig,
}

impl Gatekeeper {
    /// Create a new Gatekeeper with the given configuration
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Create a Gatekeeper with default configuration
    pub fn default_config() -> Self {
        Self::new(ValidationConfig::default())
    }

    /// Access the configuration
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validate the four records of one document
    pub fn validate(
        &self,
        metadata: &ProjectMetadata,
        resources: &MineralResources,
        reserves: &MineralReserves,
        economics: &Economics,
    ) -> ValidationReport {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        let exploration = self
            .config
            .is_exploration(metadata.project_info.status.as_deref());

        // 1. Metadata
        let metadata_summary = summarize_metadata(metadata);
        if self.config.warn_missing_qualified_persons && metadata_summary.qualified_persons == 0 {
            warnings.push("Qualified persons not extracted".to_string());
        }

        // 2. Resources
        let resources_summary = if resources.data.is_empty() {
            if exploration {
                warnings.push("No NI 43-101 resources defined (exploration-stage project)".to_string());
            } else {
                errors.push("Mineral resources empty (project is not early-stage exploration)".to_string());
            }
            None
        } else {
            self.flag_low_tonnage(
                "resource",
                &resources.data,
                Some(self.config.low_tonnage_threshold),
                &mut warnings,
            );
            Some(summarize_resources(resources))
        };

        // 3. Reserves
        let reserves_summary = if reserves.data.is_empty() {
            if !exploration {
                warnings.push("Mineral reserves empty".to_string());
            }
            None
        } else {
            self.flag_low_tonnage(
                "reserve",
                &reserves.data,
                self.config.reserve_low_tonnage_threshold,
                &mut warnings,
            );

            let summary = summarize_reserves(reserves);
            let resource_tonnes = total_tonnes(&resources.data);
            if summary.total_tonnes > resource_tonnes {
                errors.push(format!(
                    "Reserve tonnage ({} t) exceeds resource tonnage ({} t)",
                    group_thousands(summary.total_tonnes, 0),
                    group_thousands(resource_tonnes, 0)
                ));
            }
            Some(summary)
        };

        // 4. Economics
        let economics_summary = summarize_economics(economics);

        // 5. Range checks
        check_ranges("resource", &resources.data, &mut errors);
        check_ranges("reserve", &reserves.data, &mut errors);

        let status = ValidationStatus::from_findings(&errors, &warnings);
        debug!(
            "Validation finished: {} ({} error(s), {} warning(s))",
            status,
            errors.len(),
            warnings.len()
        );

        ValidationReport {
            status,
            warnings,
            errors,
            summary: ReportSummary {
                metadata: metadata_summary,
                mineral_resources: resources_summary,
                mineral_reserves: reserves_summary,
                economics: economics_summary,
            },
        }
    }

    /// Re-derive the validation of a persisted report
    pub fn validate_report(&self, report: &MiningReport) -> ValidationReport {
        self.validate(
            &report.metadata,
            &report.mineral_resources,
            &report.mineral_reserves,
            &report.economics,
        )
    }

    fn flag_low_tonnage(
        &self,
        kind: &str,
        items: &[ResourceItem],
        threshold: Option<f64>,
        warnings: &mut Vec<String>,
    ) {
        let Some(threshold) = threshold else {
            return;
        };

        for (idx, item) in items.iter().enumerate() {
            if item.tonnes < threshold {
                warnings.push(format!(
                    "Low tonnage {} {}: {} t (below {} t)",
                    kind,
                    label(idx, item),
                    group_thousands(item.tonnes, 0),
                    group_thousands(threshold, 0)
                ));
            }
        }
    }
}

fn label(idx: usize, item: &ResourceItem) -> String {
    match &item.area {
        Some(area) => format!("'{}' ({})", area, item.category),
        None => format!("row {} ({})", idx + 1, item.category),
    }
}

fn total_tonnes(items: &[ResourceItem]) -> f64 {
    items.iter().map(|i| i.tonnes).sum()
}

fn total_metal(items: &[ResourceItem]) -> f64 {
    items.iter().map(|i| i.contained_metal).sum()
}

fn distinct_categories(items: &[ResourceItem]) -> Vec<String> {
    items
        .iter()
        .map(|i| i.category.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn check_ranges(kind: &str, items: &[ResourceItem], errors: &mut Vec<String>) {
    for (idx, item) in items.iter().enumerate() {
        let fields = [
            ("tonnes", item.tonnes),
            ("grade", item.grade),
            ("contained metal", item.contained_metal),
        ];
        for (field, value) in fields {
            if value < 0.0 {
                errors.push(format!(
                    "Negative {} in {} {}: {}",
                    field,
                    kind,
                    label(idx, item),
                    value
                ));
            }
        }
    }
}

fn text_or_na(value: Option<&String>) -> String {
    value
        .map(String::as_str)
        .unwrap_or(NOT_AVAILABLE)
        .to_string()
}

fn summarize_metadata(metadata: &ProjectMetadata) -> MetadataSummary {
    MetadataSummary {
        project: text_or_na(metadata.project_info.project_name.as_ref()),
        company: text_or_na(metadata.project_info.company_name.as_ref()),
        country: text_or_na(metadata.location.country.as_ref()),
        region: text_or_na(metadata.location.region.as_ref()),
        effective_date: text_or_na(metadata.report_details.effective_date.as_ref()),
        qualified_persons: metadata.report_details.qualified_persons.len(),
        mining_titles_count: metadata.mining_titles.len(),
        veins_count: metadata.vein_dimensions.len(),
    }
}

fn summarize_resources(resources: &MineralResources) -> ResourcesSummary {
    let areas: BTreeSet<&str> = resources
        .data
        .iter()
        .filter_map(|i| i.area.as_deref())
        .collect();

    ResourcesSummary {
        count: resources.data.len(),
        total_tonnes: total_tonnes(&resources.data),
        total_metal: total_metal(&resources.data),
        categories: distinct_categories(&resources.data),
        areas_count: areas.len(),
        commodity: text_or_na(resources.summary.commodity.as_ref()),
        drilling_campaigns: resources.drilling_summary.len(),
        cut_off_grades_count: resources.cut_off_grades.len(),
        data_availability_count: resources.data_availability.len(),
        block_model_stats_count: resources.block_model_stats.len(),
        sample_statistics_count: resources.sample_statistics.len(),
    }
}

fn summarize_reserves(reserves: &MineralReserves) -> ReservesSummary {
    let cut_offs: &[CutOffGrade] = &reserves.cut_off_grades_reserves;

    ReservesSummary {
        count: reserves.data.len(),
        total_tonnes: total_tonnes(&reserves.data),
        total_metal: total_metal(&reserves.data),
        categories: distinct_categories(&reserves.data),
        mining_method: text_or_na(reserves.summary.mining_method.as_ref()),
        life_of_mine_years: reserves.summary.life_of_mine_years,
        cut_off_grades_count: cut_offs.len(),
        has_cut_off_table: !cut_offs.is_empty(),
    }
}

fn summarize_economics(economics: &Economics) -> EconomicsSummary {
    let capex = &economics.cost_structure.capex;
    let opex = &economics.cost_structure.opex;
    let prices = &economics.cost_structure.metal_prices;

    EconomicsSummary {
        capex_total: dollars(capex.total, 0),
        capex_sustaining: dollars(capex.sustaining, 0),
        capex_non_sustaining: dollars(capex.non_sustaining, 0),
        mining_cost_per_t: dollars(opex.mining_cost_per_tonne, 2),
        processing_cost_per_t: dollars(opex.processing_cost_per_tonne, 2),
        ga_cost_per_t: dollars(opex.ga_cost_per_tonne, 2),
        gold_price: prices
            .gold_price_assumption
            .map(|p| format!("${}/oz", group_thousands(p, 0)))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        has_npv: economics.valuation.npv.is_some(),
        has_irr: economics.valuation.irr.is_some(),
        opex_detail_count: economics.operating_costs_detail.len(),
        capex_detail_count: economics.capital_costs_detail.len(),
        metallurgy_years: economics.metallurgy_history.len(),
        credits_count: economics.credits.len(),
    }
}

/// `$` display string, `N/A` when absent
fn dollars(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) if v < 0.0 => format!("-${}", group_thousands(-v, decimals)),
        Some(v) => format!("${}", group_thousands(v, decimals)),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Format with `,` thousands separators
fn group_thousands(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && formatted.chars().any(|c| c != '0' && c != '.') {
        "-"
    } else {
        ""
    };

    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}
