//! Page tags and the per-document tag map

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Relevance tag attached to a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageCategory {
    /// Tables numbered 1-4 (property, location, tenure)
    MetadataTables,
    /// Tables numbered 14 and cut-off tables
    ResourceTables,
    /// Tables numbered 15 and cut-off tables
    ReserveTables,
    /// Tables numbered 20+ and cost pages
    EconomicTables,
    /// Tables numbered 10-13 and drilling pages
    DrillingTables,
    /// Tables numbered 10-13 and sampling pages
    SamplingTables,
    /// Author / qualified person pages
    QualifiedPersons,
    /// Property description and location
    ProjectDescription,
    /// Resource estimate wording
    MineralResources,
    /// Reserve estimate wording
    MineralReserves,
    /// Capital and operating costs
    Costs,
    /// Exploration budget and proposed work
    Budget,
    /// Recovery and processing
    Metallurgy,
}

impl PageCategory {
    /// Every tag, in display order
    pub const ALL: [PageCategory; 13] = [
        PageCategory::MetadataTables,
        PageCategory::ResourceTables,
        PageCategory::ReserveTables,
        PageCategory::EconomicTables,
        PageCategory::DrillingTables,
        PageCategory::SamplingTables,
        PageCategory::QualifiedPersons,
        PageCategory::ProjectDescription,
        PageCategory::MineralResources,
        PageCategory::MineralReserves,
        PageCategory::Costs,
        PageCategory::Budget,
        PageCategory::Metallurgy,
    ];

    /// Get the tag name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            PageCategory::MetadataTables => "metadata_tables",
            PageCategory::ResourceTables => "resource_tables",
            PageCategory::ReserveTables => "reserve_tables",
            PageCategory::EconomicTables => "economic_tables",
            PageCategory::DrillingTables => "drilling_tables",
            PageCategory::SamplingTables => "sampling_tables",
            PageCategory::QualifiedPersons => "qualified_persons",
            PageCategory::ProjectDescription => "project_description",
            PageCategory::MineralResources => "mineral_resources",
            PageCategory::MineralReserves => "mineral_reserves",
            PageCategory::Costs => "costs",
            PageCategory::Budget => "budget",
            PageCategory::Metallurgy => "metallurgy",
        }
    }
}

impl fmt::Display for PageCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tag → ascending page indices
///
/// Every tag is present, possibly with an empty set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTagMap {
    tags: BTreeMap<PageCategory, BTreeSet<usize>>,
}

impl CategoryTagMap {
    /// An empty map holding every tag
    pub fn new() -> Self {
        let tags = PageCategory::ALL
            .iter()
            .map(|&category| (category, BTreeSet::new()))
            .collect();
        Self { tags }
    }

    /// Tag a page
    pub(crate) fn insert(&mut self, category: PageCategory, page: usize) {
        self.tags.entry(category).or_default().insert(page);
    }

    /// Pages carrying a tag
    pub fn pages(&self, category: PageCategory) -> &BTreeSet<usize> {
        // every key is inserted by `new`
        &self.tags[&category]
    }

    /// Iterate tags with their pages
    pub fn iter(&self) -> impl Iterator<Item = (PageCategory, &BTreeSet<usize>)> {
        self.tags.iter().map(|(category, pages)| (*category, pages))
    }

    /// Number of tagged (page, tag) pairs
    pub fn total_tags(&self) -> usize {
        self.tags.values().map(BTreeSet::len).sum()
    }
}

impl Default for CategoryTagMap {
    fn default() -> Self {
        Self::new()
    }
}
