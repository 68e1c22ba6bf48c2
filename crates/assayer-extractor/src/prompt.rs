//! Per-category extraction instructions
//!
//! Each category gets a fixed system instruction: role, target tables, the
//! JSON schema to fill and shared output rules. Page text travels separately
//! as the oracle's content argument.

use assayer_domain::ExtractionCategory;

/// Builds the instruction text for one extraction category
pub struct PromptBuilder {
    category: ExtractionCategory,
}

impl PromptBuilder {
    /// Create a new prompt builder
    pub fn new(category: ExtractionCategory) -> Self {
        Self { category }
    }

    /// Build the complete instruction text
    pub fn build(&self) -> String {
        let (task, schema, hints) = match self.category {
            ExtractionCategory::Metadata => (METADATA_TASK, METADATA_SCHEMA, METADATA_HINTS),
            ExtractionCategory::Resources => (RESOURCES_TASK, RESOURCES_SCHEMA, RESOURCES_HINTS),
            ExtractionCategory::Reserves => (RESERVES_TASK, RESERVES_SCHEMA, RESERVES_HINTS),
            ExtractionCategory::Economics => (ECONOMICS_TASK, ECONOMICS_SCHEMA, ECONOMICS_HINTS),
        };

        let mut prompt = String::new();
        prompt.push_str(ROLE);
        prompt.push_str("\n\n");
        prompt.push_str(task);
        prompt.push_str("\n\n");
        prompt.push_str(PAGE_MARKERS);
        prompt.push_str("\n\n");
        prompt.push_str("Return a JSON object with this structure:\n\n");
        prompt.push_str(schema);
        prompt.push_str("\n\n");
        prompt.push_str(hints);
        prompt.push_str("\n\n");
        prompt.push_str(OUTPUT_RULES);
        prompt
    }
}

/// Instruction text for a category
pub fn instructions_for(category: ExtractionCategory) -> String {
    PromptBuilder::new(category).build()
}

const ROLE: &str = "You are an expert at exhaustive data extraction from NI 43-101 mining technical reports.";

const PAGE_MARKERS: &str = r#"The content contains pages delimited by "=== PAGE N ===" markers. Scan every page."#;

const METADATA_TASK: &str = "Extract the complete project metadata.";

const METADATA_SCHEMA: &str = r#"{
  "project_info": {
    "project_name": "project name",
    "company_name": "company name",
    "status": "Producing/Development/Exploration"
  },
  "location": {
    "country": "country",
    "region": "region or province",
    "coordinates": "location description",
    "municipalities": ["municipality names"]
  },
  "report_details": {
    "report_type": "NI 43-101",
    "report_date": "publication date",
    "effective_date": "effective date",
    "qualified_persons": ["full names with credentials"]
  },
  "mining_titles": [
    {
      "number": "title number",
      "area_name": "area name",
      "type": "concession type",
      "area_ha": 123.45,
      "expiry": "expiry date"
    }
  ],
  "vein_dimensions": [
    {
      "vein": "vein name",
      "average_dip": "dip angle",
      "strike_length_km": 2.8,
      "down_dip_length_km": 2.7,
      "average_vein_width_m": 1.3
    }
  ]
}"#;

const METADATA_HINTS: &str = r#"Tables to look for:
- Table 4-1 or similar: mining titles
- Table 7-1 or similar: vein dimensions
- Section 2 or the certificates: qualified persons"#;

const RESOURCES_TASK: &str = r#"Extract all mineral resource information.
Look for numbered tables ("TABLE 14-X", "TABLE 10-X", "TABLE 13-X"), sections titled
"MINERAL RESOURCES" or "RESOURCE ESTIMATE", and the words Measured, Indicated,
Inferred, Cut-off Grade and Drilling.
If the project is at an early exploration stage with no NI 43-101 resources, return
empty arrays for "data" but still extract sampling and drilling tables."#;

const RESOURCES_SCHEMA: &str = r#"{
  "summary": {
    "commodity": "Gold/Copper/Silver",
    "unit": "g/t Au",
    "contained_unit": "koz Au"
  },
  "data": [
    {
      "area": "area or deposit",
      "category": "Measured/Indicated/Inferred",
      "tonnes": 4100000.0,
      "grade": 14.31,
      "contained_metal": 1893.0
    }
  ],
  "cut_off_grades": [
    {
      "area": "area name",
      "gold_price": 1850.0,
      "smelting_and_refining": 9.25,
      "royalties": 3.52,
      "gold_processing_recovery_pct": 95.2,
      "mining_cost": 114.0,
      "processing_cost": 34.0,
      "ga_cost": 25.0,
      "tailings_sustaining_cost": 1.5,
      "credits": 23.0,
      "final_cut_off_grade": 2.8
    }
  ],
  "drilling_summary": [
    {"target": "target name", "number_of_holes": 790, "total_metres": 163547.0}
  ],
  "data_availability": [
    {
      "area": "area name",
      "channel_count": 94416,
      "channel_metres": 96380.0,
      "drillhole_count": 790,
      "drillhole_metres": 163547.0
    }
  ],
  "block_model_stats": [
    {"vein": "vein name", "fault_blocks": 61, "notes": "notes"}
  ],
  "sample_statistics": [
    {"vein": "vein name", "coefficient_of_variation": 1.2, "mean_grade": 14.5, "notes": "notes"}
  ],
  "totals": {
    "measured_tonnes": 0.0,
    "indicated_tonnes": 0.0,
    "inferred_tonnes": 0.0,
    "measured_indicated_tonnes": 0.0,
    "measured_metal_koz": 0.0,
    "indicated_metal_koz": 0.0,
    "inferred_metal_koz": 0.0,
    "measured_indicated_metal_koz": 0.0,
    "total_drilling_holes": 0,
    "total_drilling_metres": 0.0,
    "total_channel_samples": 0,
    "total_channel_metres": 0.0
  }
}"#;

const RESOURCES_HINTS: &str = r#"Unit conversion:
- "4.1 Mt" -> 4100000.0 tonnes
- "500 kt" -> 500000.0 tonnes
- "1,893 koz" -> 1893.0 (keep contained metal in koz)"#;

const RESERVES_TASK: &str = r#"Extract all mineral reserve information.
Look for "TABLE 15-X", sections titled "MINERAL RESERVES" or "RESERVE ESTIMATE",
and the words Proven and Probable. If no reserves are declared, return empty arrays."#;

const RESERVES_SCHEMA: &str = r#"{
  "summary": {
    "mining_method": "mining method",
    "life_of_mine_years": 10.0,
    "mining_rate_tpd": 1200.0,
    "dilution_pct": 15.0,
    "mining_recovery_pct": 95.0
  },
  "data": [
    {
      "area": "area or deposit",
      "category": "Proven/Probable",
      "tonnes": 1200000.0,
      "grade": 9.8,
      "contained_metal": 378.0
    }
  ],
  "cut_off_grades_reserves": [
    {
      "area": "area name",
      "gold_price": 1700.0,
      "smelting_and_refining": 9.25,
      "royalties": 3.52,
      "gold_processing_recovery_pct": 95.2,
      "mining_cost": 114.0,
      "processing_cost": 34.0,
      "ga_cost": 25.0,
      "tailings_sustaining_cost": 1.5,
      "credits": 23.0,
      "final_cut_off_grade": 3.1
    }
  ],
  "totals": {
    "proven_tonnes": 0.0,
    "probable_tonnes": 0.0,
    "proven_probable_tonnes": 0.0,
    "proven_metal_koz": 0.0,
    "probable_metal_koz": 0.0,
    "proven_probable_metal_koz": 0.0,
    "average_grade": 0.0
  }
}"#;

const RESERVES_HINTS: &str = r#"Table 15-1 or similar usually holds the reserve cut-off derivation.
Use the same unit conversions as for resources: tonnes in tonnes, metal in koz."#;

const ECONOMICS_TASK: &str = r#"Extract all economic information: valuation, capital and operating costs,
metal price assumptions, plant history and processing details."#;

const ECONOMICS_SCHEMA: &str = r#"{
  "valuation": {
    "npv": 250000000.0,
    "irr": 35.0,
    "discount_rate": 5.0,
    "currency": "USD",
    "payback_period_years": 2.5
  },
  "cost_structure": {
    "capex": {"sustaining": 0.0, "non_sustaining": 0.0, "total": 0.0},
    "opex": {
      "mining_cost_per_tonne": 0.0,
      "processing_cost_per_tonne": 0.0,
      "ga_cost_per_tonne": 0.0,
      "total_cost_per_tonne": 0.0
    },
    "metal_prices": {"gold_price_assumption": 1700.0, "silver_price_assumption": 21.0}
  },
  "operating_costs_detail": [
    {"description": "cost line", "amount": 114.0, "unit": "USD/t"}
  ],
  "capital_costs_detail": [
    {"category": "Sustaining/Non-sustaining", "description": "cost line", "amount": 1000000.0}
  ],
  "metallurgy_history": [
    {
      "year": "2019",
      "tonnes_processed": 250000.0,
      "head_grade_au": 9.1,
      "recovery_pct": 95.2,
      "gold_produced_oz": 69000.0
    }
  ],
  "credits": [
    {"description": "silver credit", "amount": 23.0, "unit": "USD/oz"}
  ],
  "processing_info": {
    "plant_name": "plant name",
    "nominal_capacity_tpd": 1500.0,
    "process_type": "CIL/flotation/...",
    "recovery_rate_pct": 95.0
  }
}"#;

const ECONOMICS_HINTS: &str = r#"Tables to look for:
- Table 21-1 or similar: operating costs
- Table 21-4 or similar: capital costs
- Table 21-5 or similar: by-product credits
- Table 13-1 or similar: historical plant performance
Amounts in parentheses are negative."#;

const OUTPUT_RULES: &str = r#"Rules:
- Extract EVERY row of EVERY table you find
- Use numbers for numeric fields, not strings
- If a field is not in the text use null; if a table is missing use []
- Do NOT invent data that is not in the text
- Return ONLY the JSON object, no markdown, no explanations"#;
