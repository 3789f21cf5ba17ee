//! Field value model shared by patches, the profile draft, and errors

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single submitted or stored field value.
///
/// Presenters collect raw input as text; numeric text is accepted by the
/// validation engine for `Number` fields, so coercion before submission is
/// optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Integer value (height in cm, sibling count, income, ...)
    Number(i64),
    /// Free text, single-choice selection, or date text
    Text(String),
    /// Multi-choice selections
    List(Vec<String>),
}

impl FieldValue {
    /// Whether this value counts as "not provided" for required-ness checks
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Number(_) => false,
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::List(items) => items.is_empty(),
        }
    }

    /// The value as text, if it is textual
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The value as an integer, accepting numeric text
    pub fn as_number(&self) -> Option<i64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(s) => s.trim().parse().ok(),
            FieldValue::List(_) => None,
        }
    }

    /// The selected choices: a list as-is, text as a single selection
    pub fn as_choices(&self) -> Vec<&str> {
        match self {
            FieldValue::Text(s) => vec![s.as_str()],
            FieldValue::List(items) => items.iter().map(String::as_str).collect(),
            FieldValue::Number(_) => Vec::new(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Number(n)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(items: Vec<String>) -> Self {
        FieldValue::List(items)
    }
}

/// Field name to value mapping. Ordered so draft output and error listings
/// are deterministic.
pub type FieldValues = BTreeMap<String, FieldValue>;

/// Field name to human-readable error message. Empty means "step valid".
pub type FieldErrors = BTreeMap<String, String>;
