//! Field descriptors - the primitive vocabulary of step schemas

use serde::{Deserialize, Serialize};

/// Primitive type of a field, with its validation constraints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    /// Free text with optional length bounds (characters)
    Text {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_length: Option<usize>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_length: Option<usize>,
    },
    /// Integer within an inclusive range
    Number { min: i64, max: i64 },
    /// Exactly one of the declared options
    SingleChoice { options: Vec<String> },
    /// Any subset of the declared options
    MultiChoice { options: Vec<String> },
    /// Date text parsed against the declared format (default `%Y-%m-%d`)
    Date {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        format: Option<String>,
    },
}

impl FieldKind {
    /// Short name for display and diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Text { .. } => "text",
            FieldKind::Number { .. } => "number",
            FieldKind::SingleChoice { .. } => "single_choice",
            FieldKind::MultiChoice { .. } => "multi_choice",
            FieldKind::Date { .. } => "date",
        }
    }

    /// Declared options for choice kinds
    pub fn options(&self) -> Option<&[String]> {
        match self {
            FieldKind::SingleChoice { options } | FieldKind::MultiChoice { options } => {
                Some(options)
            }
            _ => None,
        }
    }
}

/// One field of a step: name, display label, kind, and default required-ness
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Field name; globally unique across steps unless it names the same
    /// logical attribute with an identical kind
    pub name: String,

    /// Human-readable prompt label; derived from the name when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    pub kind: FieldKind,

    /// Required before any conditional rules apply
    #[serde(default)]
    pub required: bool,
}

impl FieldDescriptor {
    /// Display label, falling back to a title-cased form of the name
    /// (e.g. `companyName` becomes "Company Name")
    pub fn display_label(&self) -> String {
        if let Some(ref label) = self.label {
            return label.clone();
        }
        let mut out = String::new();
        for (i, ch) in self.name.chars().enumerate() {
            if i == 0 {
                out.extend(ch.to_uppercase());
            } else if ch.is_uppercase() {
                out.push(' ');
                out.push(ch);
            } else {
                out.push(ch);
            }
        }
        out
    }
}
