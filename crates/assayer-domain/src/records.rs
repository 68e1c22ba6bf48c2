//! Typed extraction records
//!
//! One record type per [`ExtractionCategory`](crate::ExtractionCategory).
//! Every optional numeric field is `Option<f64>` so that "absent" and "zero"
//! stay distinct. List items with required fields fail deserialization on
//! their own; the extractor skips them individually.

use crate::lenient;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Metadata
// ---------------------------------------------------------------------------

/// Project, location and report details
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Project identity and development stage
    #[serde(default)]
    pub project_info: ProjectInfo,

    /// Where the project is
    #[serde(default)]
    pub location: Location,

    /// Report type, dates and authors
    #[serde(default)]
    pub report_details: ReportDetails,

    /// Mining titles / concessions
    #[serde(default)]
    pub mining_titles: Vec<MiningTitle>,

    /// Documented vein geometry
    #[serde(default)]
    pub vein_dimensions: Vec<VeinDimension>,
}

/// Project identity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectInfo {
    /// Project name
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub project_name: Option<String>,

    /// Owning company
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub company_name: Option<String>,

    /// Development stage (Producing, Development, Exploration, ...)
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub status: Option<String>,
}

/// Project location
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Country
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub country: Option<String>,

    /// Region or province
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub region: Option<String>,

    /// Free-form coordinates or location description
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub coordinates: Option<String>,

    /// Municipalities covered by the project
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub municipalities: Vec<String>,
}

/// Report identity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportDetails {
    /// Report type, e.g. "NI 43-101"
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub report_type: Option<String>,

    /// Publication date
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub report_date: Option<String>,

    /// Effective date of the estimates
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub effective_date: Option<String>,

    /// Qualified persons with credentials
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub qualified_persons: Vec<String>,
}

/// A mining title or concession
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MiningTitle {
    /// Title number
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub number: Option<String>,

    /// Area name
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub area_name: Option<String>,

    /// Concession type
    #[serde(rename = "type", default, deserialize_with = "lenient::opt_text")]
    pub title_type: Option<String>,

    /// Area in hectares
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub area_ha: Option<f64>,

    /// Expiry date
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub expiry: Option<String>,
}

/// Geometry of a single vein
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VeinDimension {
    /// Vein name
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub vein: Option<String>,

    /// Average dip as quoted
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub average_dip: Option<String>,

    /// Strike length in km
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub strike_length_km: Option<f64>,

    /// Down-dip length in km
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub down_dip_length_km: Option<f64>,

    /// Average width in m
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub average_vein_width_m: Option<f64>,
}

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

/// Mineral resource estimates with supporting tables
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MineralResources {
    /// Commodity and units
    #[serde(default)]
    pub summary: ResourceSummary,

    /// One row per area and category
    #[serde(default)]
    pub data: Vec<ResourceItem>,

    /// Cut-off grade derivations per area
    #[serde(default)]
    pub cut_off_grades: Vec<CutOffGrade>,

    /// Drilling campaigns
    #[serde(default)]
    pub drilling_summary: Vec<DrillingCampaign>,

    /// Channel and drillhole data per area
    #[serde(default)]
    pub data_availability: Vec<DataAvailability>,

    /// Block model notes per vein
    #[serde(default)]
    pub block_model_stats: Vec<BlockModelStat>,

    /// Sample statistics per vein
    #[serde(default)]
    pub sample_statistics: Vec<SampleStatistic>,

    /// Totals as stated in the report
    #[serde(default)]
    pub totals: ResourceTotals,
}

/// Commodity and reporting units
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceSummary {
    /// Commodity, e.g. "Gold"
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub commodity: Option<String>,

    /// Grade unit, e.g. "g/t Au"
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub unit: Option<String>,

    /// Contained metal unit, e.g. "koz Au"
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub contained_unit: Option<String>,
}

/// One resource estimate row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceItem {
    /// Area or deposit
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub area: Option<String>,

    /// Measured / Indicated / Inferred
    #[serde(deserialize_with = "lenient::text")]
    pub category: String,

    /// Tonnes
    #[serde(deserialize_with = "lenient::tonnes")]
    pub tonnes: f64,

    /// Grade in the summary unit
    #[serde(deserialize_with = "lenient::number")]
    pub grade: f64,

    /// Contained metal in the summary contained unit
    #[serde(deserialize_with = "lenient::number")]
    pub contained_metal: f64,
}

/// One reserve estimate row
pub type ReserveItem = ResourceItem;

/// Cut-off grade derivation for one area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutOffGrade {
    /// Area name
    #[serde(deserialize_with = "lenient::text")]
    pub area: String,

    /// Assumed gold price (USD/oz)
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub gold_price: Option<f64>,

    /// Smelting and refining cost
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub smelting_and_refining: Option<f64>,

    /// Royalties
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub royalties: Option<f64>,

    /// Processing recovery (%)
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub gold_processing_recovery_pct: Option<f64>,

    /// Mining cost
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub mining_cost: Option<f64>,

    /// Processing cost
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub processing_cost: Option<f64>,

    /// G&A cost
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub ga_cost: Option<f64>,

    /// Tailings sustaining cost
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub tailings_sustaining_cost: Option<f64>,

    /// By-product credits
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub credits: Option<f64>,

    /// Resulting cut-off grade
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub final_cut_off_grade: Option<f64>,
}

/// One drilling campaign
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrillingCampaign {
    /// Drilling target
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub target: Option<String>,

    /// Number of holes
    #[serde(default, deserialize_with = "lenient::opt_count")]
    pub number_of_holes: Option<u64>,

    /// Total metres drilled
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub total_metres: Option<f64>,
}

/// Channel and drillhole data for one area
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataAvailability {
    /// Area name
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub area: Option<String>,

    /// Channel samples
    #[serde(default, deserialize_with = "lenient::opt_count")]
    pub channel_count: Option<u64>,

    /// Channel metres
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub channel_metres: Option<f64>,

    /// Drillholes
    #[serde(default, deserialize_with = "lenient::opt_count")]
    pub drillhole_count: Option<u64>,

    /// Drillhole metres
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub drillhole_metres: Option<f64>,
}

/// Block model note for one vein
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockModelStat {
    /// Vein name
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub vein: Option<String>,

    /// Number of fault blocks
    #[serde(default, deserialize_with = "lenient::opt_count")]
    pub fault_blocks: Option<u64>,

    /// Free-form notes
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub notes: Option<String>,
}

/// Sample statistics for one vein
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SampleStatistic {
    /// Vein name
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub vein: Option<String>,

    /// Coefficient of variation
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub coefficient_of_variation: Option<f64>,

    /// Mean grade
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub mean_grade: Option<f64>,

    /// Free-form notes
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub notes: Option<String>,
}

/// Resource totals as stated in the report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceTotals {
    /// Measured tonnes
    #[serde(default, deserialize_with = "lenient::opt_tonnes")]
    pub measured_tonnes: Option<f64>,
    /// Indicated tonnes
    #[serde(default, deserialize_with = "lenient::opt_tonnes")]
    pub indicated_tonnes: Option<f64>,
    /// Inferred tonnes
    #[serde(default, deserialize_with = "lenient::opt_tonnes")]
    pub inferred_tonnes: Option<f64>,
    /// Measured + Indicated tonnes
    #[serde(default, deserialize_with = "lenient::opt_tonnes")]
    pub measured_indicated_tonnes: Option<f64>,
    /// Measured metal (koz)
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub measured_metal_koz: Option<f64>,
    /// Indicated metal (koz)
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub indicated_metal_koz: Option<f64>,
    /// Inferred metal (koz)
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub inferred_metal_koz: Option<f64>,
    /// Measured + Indicated metal (koz)
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub measured_indicated_metal_koz: Option<f64>,
    /// Drillholes
    #[serde(default, deserialize_with = "lenient::opt_count")]
    pub total_drilling_holes: Option<u64>,
    /// Drilled metres
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub total_drilling_metres: Option<f64>,
    /// Channel samples
    #[serde(default, deserialize_with = "lenient::opt_count")]
    pub total_channel_samples: Option<u64>,
    /// Channel metres
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub total_channel_metres: Option<f64>,
}

// ---------------------------------------------------------------------------
// Reserves
// ---------------------------------------------------------------------------

/// Mineral reserve estimates
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MineralReserves {
    /// Mining method and parameters
    #[serde(default)]
    pub summary: ReserveSummary,

    /// One row per area and category
    #[serde(default)]
    pub data: Vec<ReserveItem>,

    /// Reserve cut-off derivations per area
    #[serde(default)]
    pub cut_off_grades_reserves: Vec<CutOffGrade>,

    /// Totals as stated in the report
    #[serde(default)]
    pub totals: ReserveTotals,
}

/// Mining parameters behind the reserve
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReserveSummary {
    /// Mining method
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub mining_method: Option<String>,

    /// Life of mine (years)
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub life_of_mine_years: Option<f64>,

    /// Mining rate (t/d)
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub mining_rate_tpd: Option<f64>,

    /// Dilution (%)
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub dilution_pct: Option<f64>,

    /// Mining recovery (%)
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub mining_recovery_pct: Option<f64>,
}

/// Reserve totals as stated in the report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReserveTotals {
    /// Proven tonnes
    #[serde(default, deserialize_with = "lenient::opt_tonnes")]
    pub proven_tonnes: Option<f64>,
    /// Probable tonnes
    #[serde(default, deserialize_with = "lenient::opt_tonnes")]
    pub probable_tonnes: Option<f64>,
    /// Proven + Probable tonnes
    #[serde(default, deserialize_with = "lenient::opt_tonnes")]
    pub proven_probable_tonnes: Option<f64>,
    /// Proven metal (koz)
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub proven_metal_koz: Option<f64>,
    /// Probable metal (koz)
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub probable_metal_koz: Option<f64>,
    /// Proven + Probable metal (koz)
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub proven_probable_metal_koz: Option<f64>,
    /// Average grade
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub average_grade: Option<f64>,
}

// ---------------------------------------------------------------------------
// Economics
// ---------------------------------------------------------------------------

/// Valuation, costs and processing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Economics {
    /// NPV / IRR / payback
    #[serde(default)]
    pub valuation: Valuation,

    /// Capex, opex and price assumptions
    #[serde(default)]
    pub cost_structure: CostStructure,

    /// Operating cost lines
    #[serde(default)]
    pub operating_costs_detail: Vec<OperatingCost>,

    /// Capital cost lines
    #[serde(default)]
    pub capital_costs_detail: Vec<CapitalCost>,

    /// Historical plant performance
    #[serde(default)]
    pub metallurgy_history: Vec<MetallurgyRecord>,

    /// By-product credits
    #[serde(default)]
    pub credits: Vec<Credit>,

    /// Processing plant
    #[serde(default)]
    pub processing_info: ProcessingInfo,
}

/// Project valuation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Valuation {
    /// Net present value
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub npv: Option<f64>,

    /// Internal rate of return (%)
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub irr: Option<f64>,

    /// Discount rate (%)
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub discount_rate: Option<f64>,

    /// Currency
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub currency: Option<String>,

    /// Payback (years)
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub payback_period_years: Option<f64>,
}

/// Capex, opex and metal price assumptions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CostStructure {
    /// Capital costs
    #[serde(default)]
    pub capex: Capex,

    /// Unit operating costs
    #[serde(default)]
    pub opex: Opex,

    /// Price assumptions
    #[serde(default)]
    pub metal_prices: MetalPrices,
}

/// Capital cost totals
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Capex {
    /// Sustaining capital
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub sustaining: Option<f64>,

    /// Non-sustaining capital
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub non_sustaining: Option<f64>,

    /// Total capital
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub total: Option<f64>,
}

/// Unit operating costs per tonne
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Opex {
    /// Mining cost per tonne
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub mining_cost_per_tonne: Option<f64>,

    /// Processing cost per tonne
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub processing_cost_per_tonne: Option<f64>,

    /// G&A cost per tonne
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub ga_cost_per_tonne: Option<f64>,

    /// Total cost per tonne
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub total_cost_per_tonne: Option<f64>,
}

/// Metal price assumptions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetalPrices {
    /// Gold (USD/oz)
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub gold_price_assumption: Option<f64>,

    /// Silver (USD/oz)
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub silver_price_assumption: Option<f64>,
}

fn default_unit() -> String {
    "USD".to_string()
}

fn unit_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(lenient::opt_text(deserializer)?.unwrap_or_else(default_unit))
}

/// One operating cost line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatingCost {
    /// Description
    #[serde(deserialize_with = "lenient::text")]
    pub description: String,

    /// Amount
    #[serde(deserialize_with = "lenient::number")]
    pub amount: f64,

    /// Unit
    #[serde(default = "default_unit", deserialize_with = "unit_or_default")]
    pub unit: String,
}

/// One capital cost line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapitalCost {
    /// Sustaining / Non-sustaining
    #[serde(deserialize_with = "lenient::text")]
    pub category: String,

    /// Description
    #[serde(deserialize_with = "lenient::text")]
    pub description: String,

    /// Amount
    #[serde(deserialize_with = "lenient::number")]
    pub amount: f64,
}

/// One year of plant performance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetallurgyRecord {
    /// Year
    #[serde(deserialize_with = "lenient::text")]
    pub year: String,

    /// Tonnes processed
    #[serde(deserialize_with = "lenient::number")]
    pub tonnes_processed: f64,

    /// Head grade (g/t Au)
    #[serde(deserialize_with = "lenient::number")]
    pub head_grade_au: f64,

    /// Recovery (%)
    #[serde(deserialize_with = "lenient::number")]
    pub recovery_pct: f64,

    /// Gold produced (oz)
    #[serde(deserialize_with = "lenient::number")]
    pub gold_produced_oz: f64,
}

/// One by-product credit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Credit {
    /// Description
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub description: Option<String>,

    /// Amount
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub amount: Option<f64>,

    /// Unit
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub unit: Option<String>,
}

/// Processing plant description
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessingInfo {
    /// Plant name
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub plant_name: Option<String>,

    /// Nominal capacity (t/d)
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub nominal_capacity_tpd: Option<f64>,

    /// Process type
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub process_type: Option<String>,

    /// Recovery (%)
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub recovery_rate_pct: Option<f64>,
}
