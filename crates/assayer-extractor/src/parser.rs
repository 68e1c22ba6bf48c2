//! Parse oracle output into typed records
//!
//! The top level must be a JSON object. Below that every sub-record is
//! coerced on its own: a list item that fails is skipped and counted, a
//! singleton sub-object that fails falls back to its default and is counted
//! too.

use crate::error::ExtractorError;
use assayer_domain::{Economics, MineralReserves, MineralResources, ProjectMetadata};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::warn;

/// A record that can be rebuilt from a model's top-level JSON object
pub trait FromModelOutput: Default + Sized {
    /// Coerce each field of the record from `coercer`
    fn coerce(coercer: &mut Coercer<'_>) -> Self;
}

/// Parse a raw oracle response into a record plus the number of skipped items
pub fn parse_record<T: FromModelOutput>(response: &str) -> Result<(T, usize), ExtractorError> {
    let object = parse_object(response)?;
    let mut coercer = Coercer::new(&object);
    let record = T::coerce(&mut coercer);
    Ok((record, coercer.skipped()))
}

/// Parse a response into its top-level JSON object
fn parse_object(response: &str) -> Result<Map<String, Value>, ExtractorError> {
    let json_str = extract_json(response)?;
    let json: Value = serde_json::from_str(&json_str)?;

    match json {
        Value::Object(map) => Ok(map),
        other => Err(ExtractorError::InvalidFormat(format!(
            "Expected JSON object, got {}",
            kind(&other)
        ))),
    }
}

/// Extract JSON from response, handling markdown code blocks
fn extract_json(response: &str) -> Result<String, ExtractorError> {
    let trimmed = response.trim();

    if trimmed.starts_with("```") {
        let lines: Vec<&str> = trimmed.lines().collect();
        if lines.len() < 2 {
            return Err(ExtractorError::InvalidFormat("Empty code block".to_string()));
        }

        // Skip the opening fence and, when present, the closing one
        let end = if lines[lines.len() - 1].trim_start().starts_with("```") {
            lines.len() - 1
        } else {
            lines.len()
        };
        Ok(lines[1..end].join("\n"))
    } else {
        Ok(trimmed.to_string())
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Field-by-field coercion over one JSON object
pub struct Coercer<'a> {
    object: &'a Map<String, Value>,
    skipped: usize,
}

impl<'a> Coercer<'a> {
    /// Wrap a parsed object
    pub fn new(object: &'a Map<String, Value>) -> Self {
        Self { object, skipped: 0 }
    }

    /// Items skipped so far
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Coerce a list field, skipping items that do not fit `T`
    ///
    /// A missing or null field is an empty list. A lone object is treated as
    /// a one-item list.
    pub fn list<T: DeserializeOwned>(&mut self, key: &str) -> Vec<T> {
        let items: Vec<&Value> = match self.object.get(key) {
            None | Some(Value::Null) => return Vec::new(),
            Some(Value::Array(items)) => items.iter().collect(),
            Some(single @ Value::Object(_)) => vec![single],
            Some(other) => {
                warn!("Field '{}' should be a list, got {}; ignoring", key, kind(other));
                self.skipped += 1;
                return Vec::new();
            }
        };

        let mut out = Vec::with_capacity(items.len());
        for (idx, item) in items.into_iter().enumerate() {
            match T::deserialize(item) {
                Ok(value) => out.push(value),
                Err(e) => {
                    warn!("Skipping {}[{}]: {}", key, idx, e);
                    self.skipped += 1;
                }
            }
        }
        out
    }

    /// Coerce a singleton sub-object, falling back to its default
    pub fn object<T: DeserializeOwned + Default>(&mut self, key: &str) -> T {
        match self.object.get(key) {
            None | Some(Value::Null) => T::default(),
            Some(value) => match T::deserialize(value) {
                Ok(record) => record,
                Err(e) => {
                    warn!("Field '{}' could not be read, using defaults: {}", key, e);
                    self.skipped += 1;
                    T::default()
                }
            },
        }
    }
}

impl FromModelOutput for ProjectMetadata {
    fn coerce(c: &mut Coercer<'_>) -> Self {
        Self {
            project_info: c.object("project_info"),
            location: c.object("location"),
            report_details: c.object("report_details"),
            mining_titles: c.list("mining_titles"),
            vein_dimensions: c.list("vein_dimensions"),
        }
    }
}

impl FromModelOutput for MineralResources {
    fn coerce(c: &mut Coercer<'_>) -> Self {
        Self {
            summary: c.object("summary"),
            data: c.list("data"),
            cut_off_grades: c.list("cut_off_grades"),
            drilling_summary: c.list("drilling_summary"),
            data_availability: c.list("data_availability"),
            block_model_stats: c.list("block_model_stats"),
            sample_statistics: c.list("sample_statistics"),
            totals: c.object("totals"),
        }
    }
}

impl FromModelOutput for MineralReserves {
    fn coerce(c: &mut Coercer<'_>) -> Self {
        Self {
            summary: c.object("summary"),
            data: c.list("data"),
            cut_off_grades_reserves: c.list("cut_off_grades_reserves"),
            totals: c.object("totals"),
        }
    }
}

impl FromModelOutput for Economics {
    fn coerce(c: &mut Coercer<'_>) -> Self {
        Self {
            valuation: c.object("valuation"),
            cost_structure: c.object("cost_structure"),
            operating_costs_detail: c.list("operating_costs_detail"),
            capital_costs_detail: c.list("capital_costs_detail"),
            metallurgy_history: c.list("metallurgy_history"),
            credits: c.list("credits"),
            processing_info: c.object("processing_info"),
        }
    }
}
