//! Tolerant `deserialize_with` helpers for model-produced JSON
//!
//! Numbers may arrive as JSON numbers or as display strings; text fields may
//! arrive as numbers (`"year": 2019`). Optional fields turn unreadable
//! values, including nested objects and arrays, into `None` instead of
//! failing the enclosing record.

use crate::normalize::{normalize_tonnes, parse_number};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Number(f64),
    Text(String),
    Flag(bool),
    Other(Value),
}

impl Scalar {
    fn as_number(&self) -> Option<f64> {
        match self {
            Scalar::Number(n) => Some(*n),
            Scalar::Text(s) => parse_number(s),
            Scalar::Flag(_) | Scalar::Other(_) => None,
        }
    }

    fn into_text(self) -> String {
        match self {
            Scalar::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", n as i64),
            Scalar::Number(n) => n.to_string(),
            Scalar::Text(s) => s,
            Scalar::Flag(b) => b.to_string(),
            Scalar::Other(value) => render(&value),
        }
    }
}

/// Flatten a nested value into display text
///
/// Objects lead with their `name` when they have one, so a person given as
/// `{"name": "J. Smith", "credentials": "P.Geo"}` reads "J. Smith, P.Geo".
fn render(value: &Value) -> String {
    let parts: Vec<String> = match value {
        Value::Null => return String::new(),
        Value::Bool(b) => return b.to_string(),
        Value::Number(n) => return n.to_string(),
        Value::String(s) => return s.trim().to_string(),
        Value::Array(items) => items.iter().map(render).collect(),
        Value::Object(map) => map
            .get("name")
            .into_iter()
            .chain(map.iter().filter(|(k, _)| k.as_str() != "name").map(|(_, v)| v))
            .map(render)
            .collect(),
    };
    parts
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Required number
pub fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let scalar = Scalar::deserialize(deserializer)?;
    scalar
        .as_number()
        .ok_or_else(|| D::Error::custom("expected a number"))
}

/// Optional number; null, missing or unreadable values become `None`
pub fn opt_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let scalar = Option::<Scalar>::deserialize(deserializer)?;
    Ok(scalar.and_then(|s| s.as_number()))
}

/// Optional whole count
pub fn opt_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = opt_number(deserializer)?;
    Ok(value.filter(|v| *v >= 0.0).map(|v| v.round() as u64))
}

/// Required tonnage; strings go through [`normalize_tonnes`]
pub fn tonnes<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Scalar::deserialize(deserializer)? {
        Scalar::Number(n) => Ok(n),
        Scalar::Text(s) => {
            normalize_tonnes(&s).ok_or_else(|| D::Error::custom(format!("unreadable tonnage {s:?}")))
        }
        Scalar::Flag(_) | Scalar::Other(_) => Err(D::Error::custom("expected a tonnage")),
    }
}

/// Optional tonnage
pub fn opt_tonnes<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Scalar>::deserialize(deserializer)? {
        Some(Scalar::Number(n)) => Some(n),
        Some(Scalar::Text(s)) => normalize_tonnes(&s),
        _ => None,
    })
}

/// Required text; numbers are rendered
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Scalar::deserialize(deserializer)?.into_text())
}

/// Optional text; blank strings become `None`
pub fn opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let scalar = Option::<Scalar>::deserialize(deserializer)?;
    Ok(scalar
        .map(Scalar::into_text)
        .filter(|s| !s.trim().is_empty()))
}

/// List of text; a single string becomes a one-element list, null is empty
pub fn text_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        Many(Vec<Scalar>),
        One(Scalar),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        Some(OneOrMany::Many(items)) => items
            .into_iter()
            .map(Scalar::into_text)
            .filter(|s| !s.trim().is_empty())
            .collect(),
        Some(OneOrMany::One(item)) => {
            let s = item.into_text();
            if s.trim().is_empty() {
                Vec::new()
            } else {
                vec![s]
            }
        }
        None => Vec::new(),
    })
}
