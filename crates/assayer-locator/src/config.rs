//! Classifier and selector configuration
//!
//! Defaults reproduce the heuristics tuned for NI 43-101 reports. Both
//! structs load from TOML so other report layouts can be tried without a
//! rebuild.

use crate::PageCategory;
use serde::{Deserialize, Serialize};

/// Maps a cited table's leading number to page tags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRule {
    /// Lowest leading number (inclusive)
    pub from: u32,

    /// Highest leading number (inclusive); `None` for open-ended
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<u32>,

    /// Tags applied on match
    pub categories: Vec<PageCategory>,
}

impl TableRule {
    /// Whether a leading table number falls in this rule
    pub fn matches(&self, number: u32) -> bool {
        number >= self.from && self.to.is_none_or(|to| number <= to)
    }
}

/// Keyword group; any keyword found on a page applies every tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordGroup {
    /// Group label used in logs
    pub name: String,

    /// Keywords, matched case-insensitively as substrings
    pub keywords: Vec<String>,

    /// Tags applied on match
    pub categories: Vec<PageCategory>,
}

impl KeywordGroup {
    fn new(name: &str, keywords: &[&str], categories: &[PageCategory]) -> Self {
        Self {
            name: name.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            categories: categories.to_vec(),
        }
    }
}

/// Configuration for the page classifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Table-number rules
    pub table_rules: Vec<TableRule>,

    /// Keyword groups
    pub keyword_groups: Vec<KeywordGroup>,
}

impl Default for ClassifierConfig {
    /// Table numbers 5-9 and 16-19 are left untagged.
    fn default() -> Self {
        use PageCategory::*;

        let rule = |from: u32, to: Option<u32>, categories: &[PageCategory]| TableRule {
            from,
            to,
            categories: categories.to_vec(),
        };

        Self {
            table_rules: vec![
                rule(0, Some(4), &[MetadataTables]),
                rule(10, Some(13), &[DrillingTables, SamplingTables]),
                rule(14, Some(14), &[ResourceTables]),
                rule(15, Some(15), &[ReserveTables]),
                rule(20, None, &[EconomicTables]),
            ],
            keyword_groups: vec![
                KeywordGroup::new(
                    "qualified_persons",
                    &["QUALIFIED PERSON", "AUTHOR", "P.GEO", "P.ENG"],
                    &[QualifiedPersons],
                ),
                KeywordGroup::new(
                    "project_description",
                    &["PROJECT DESCRIPTION", "LOCATION", "CLIMATE", "MINING TITLE", "CONCESSION"],
                    &[ProjectDescription],
                ),
                KeywordGroup::new(
                    "mineral_resources",
                    &["MINERAL RESOURCE", "RESOURCE ESTIMATE", "MEASURED", "INDICATED", "INFERRED"],
                    &[MineralResources],
                ),
                KeywordGroup::new(
                    "mineral_reserves",
                    &["MINERAL RESERVE", "RESERVE ESTIMATE", "PROVEN", "PROBABLE"],
                    &[MineralReserves],
                ),
                KeywordGroup::new(
                    "cut_off_grade",
                    &["CUT-OFF GRADE", "CUTOFF GRADE", "CUT OFF GRADE"],
                    &[ResourceTables, ReserveTables],
                ),
                KeywordGroup::new(
                    "drilling",
                    &["DRILL", "DRILLING", "DIAMOND DRILL", "CORE"],
                    &[DrillingTables],
                ),
                KeywordGroup::new(
                    "sampling",
                    &["SAMPLING", "SAMPLE", "ASSAY", "CHANNEL"],
                    &[SamplingTables],
                ),
                KeywordGroup::new(
                    "costs",
                    &["CAPEX", "CAPITAL COST", "OPEX", "OPERATING COST"],
                    &[Costs, EconomicTables],
                ),
                KeywordGroup::new(
                    "budget",
                    &["BUDGET", "EXPLORATION BUDGET", "PROPOSED WORK"],
                    &[Budget, EconomicTables],
                ),
                KeywordGroup::new(
                    "metallurgy",
                    &["METALLURG", "RECOVERY", "PROCESSING", "PLANT"],
                    &[Metallurgy],
                ),
                KeywordGroup::new(
                    "valuation",
                    &["NPV", "IRR", "ECONOMIC ANALYSIS", "PAYBACK"],
                    &[EconomicTables],
                ),
            ],
        }
    }
}

impl ClassifierConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        for (idx, rule) in self.table_rules.iter().enumerate() {
            if let Some(to) = rule.to {
                if to < rule.from {
                    return Err(format!(
                        "table rule {} has an empty range ({}..={})",
                        idx, rule.from, to
                    ));
                }
            }
            if rule.categories.is_empty() {
                return Err(format!("table rule {} tags no categories", idx));
            }
        }
        for group in &self.keyword_groups {
            if group.keywords.iter().any(|k| k.trim().is_empty()) {
                return Err(format!("keyword group '{}' has a blank keyword", group.name));
            }
            if group.categories.is_empty() {
                return Err(format!("keyword group '{}' tags no categories", group.name));
            }
        }
        Ok(())
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

/// Half-open page range `[start, end)`, clamped to the document at use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRange {
    /// First page
    pub start: usize,
    /// One past the last page
    pub end: usize,
}

impl PageRange {
    /// Create a range
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Pages of this range that exist in a document of `total_pages`
    ///
    /// Empty when the document ends before `start`.
    pub fn clamp(&self, total_pages: usize) -> std::ops::Range<usize> {
        let end = self.end.min(total_pages);
        self.start.min(end)..end
    }
}

/// Configuration for the page selector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorConfig {
    /// Leading pages always sent for metadata
    pub metadata_leading_pages: usize,

    /// Fallback when no resource page was tagged
    pub resources_fallback: PageRange,

    /// Fallback when no reserve page was tagged
    pub reserves_fallback: PageRange,

    /// Fallback when no economics page was tagged
    pub economics_fallback: PageRange,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            metadata_leading_pages: 15,
            resources_fallback: PageRange::new(20, 50),
            reserves_fallback: PageRange::new(30, 60),
            economics_fallback: PageRange::new(40, 80),
        }
    }
}

impl SelectorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        for (name, range) in [
            ("resources_fallback", self.resources_fallback),
            ("reserves_fallback", self.reserves_fallback),
            ("economics_fallback", self.economics_fallback),
        ] {
            if range.end < range.start {
                return Err(format!(
                    "{} ends before it starts ({}..{})",
                    name, range.start, range.end
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configs_are_valid() {
        assert!(ClassifierConfig::default().validate().is_ok());
        assert!(SelectorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_table_rules_leave_gaps() {
        let config = ClassifierConfig::default();
        for number in (5..=9).chain(16..=19) {
            assert!(
                !config.table_rules.iter().any(|r| r.matches(number)),
                "table {} should be untagged",
                number
            );
        }
        assert!(config.table_rules.iter().any(|r| r.matches(250)));
    }

    #[test]
    fn test_invalid_table_rule() {
        let mut config = ClassifierConfig::default();
        config.table_rules[0].to = Some(0);
        config.table_rules[0].from = 3;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_blank_keyword_rejected() {
        let mut config = ClassifierConfig::default();
        config.keyword_groups[0].keywords.push("  ".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_fallback_range() {
        let config = SelectorConfig {
            reserves_fallback: PageRange::new(60, 30),
            ..SelectorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_range_clamp() {
        let range = PageRange::new(20, 50);
        assert_eq!(range.clamp(100), 20..50);
        assert_eq!(range.clamp(30), 20..30);
        assert_eq!(range.clamp(10), 10..10);
        assert!(range.clamp(10).is_empty());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ClassifierConfig::default();
        let toml_str = config.to_toml().unwrap();
        let parsed = ClassifierConfig::from_toml(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }
}
