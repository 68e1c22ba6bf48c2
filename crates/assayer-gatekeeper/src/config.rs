//! Gatekeeper configuration

use serde::{Deserialize, Serialize};

/// Configuration for validation rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Resource rows below this many tonnes are flagged
    pub low_tonnage_threshold: f64,

    /// Reserve rows below this many tonnes are flagged; `None` disables
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reserve_low_tonnage_threshold: Option<f64>,

    /// Warn when no qualified persons were extracted
    pub warn_missing_qualified_persons: bool,

    /// Status substrings (case-insensitive) marking an exploration-stage project
    pub exploration_keywords: Vec<String>,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            low_tonnage_threshold: 500_000.0,
            reserve_low_tonnage_threshold: None,
            warn_missing_qualified_persons: true,
            exploration_keywords: vec!["exploration".to_string(), "early".to_string()],
        }
    }
}

impl ValidationConfig {
    /// Create a permissive configuration (no anomaly or authorship warnings)
    pub fn permissive() -> Self {
        Self {
            low_tonnage_threshold: 0.0,
            reserve_low_tonnage_threshold: None,
            warn_missing_qualified_persons: false,
            ..Self::default()
        }
    }

    /// Create a strict configuration (reserve rows are flagged too)
    pub fn strict() -> Self {
        Self {
            low_tonnage_threshold: 500_000.0,
            reserve_low_tonnage_threshold: Some(500_000.0),
            warn_missing_qualified_persons: true,
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.low_tonnage_threshold.is_nan() || self.low_tonnage_threshold < 0.0 {
            return Err("low_tonnage_threshold must be a non-negative number".to_string());
        }
        if let Some(threshold) = self.reserve_low_tonnage_threshold {
            if threshold.is_nan() || threshold < 0.0 {
                return Err("reserve_low_tonnage_threshold must be a non-negative number".to_string());
            }
        }
        if self.exploration_keywords.iter().any(|k| k.trim().is_empty()) {
            return Err("exploration_keywords must not contain blank entries".to_string());
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

    /// Whether a project status marks an exploration-stage project
    pub fn is_exploration(&self, status: Option<&str>) -> bool {
        let status = status.unwrap_or_default().to_lowercase();
        self.exploration_keywords
            .iter()
            .any(|k| status.contains(&k.to_lowercase()))
    }
}
