//! Step schemas - one declarative document per wizard step

use serde::{Deserialize, Serialize};

use crate::schema::field::FieldDescriptor;

/// Declarative description of one wizard step.
///
/// Immutable once registered; the controller, resolver, and validation
/// engine only ever read it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepSchema {
    /// Unique step identifier; ordering is fixed by the registry
    pub id: String,

    /// Display title for the step header
    pub title: String,

    /// Ordered field descriptors
    pub fields: Vec<FieldDescriptor>,

    /// Conditional rules, applied in declaration order (last write wins)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<ConditionalRule>,
}

impl StepSchema {
    /// Look up a field descriptor by name
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Whether the step declares the named field
    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Names of all declared fields, in declaration order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }
}

/// One conditional rule: when the trigger field holds the given value,
/// apply the effect lists to sibling fields.
///
/// `require` implies visible. `hide` only clears visibility so that a later
/// `require` can still win by declaration order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditionalRule {
    /// Trigger field name
    pub when: String,

    /// Value the trigger must hold for the rule to fire. For multi-choice
    /// triggers the rule fires when the value is among the selections.
    pub equals: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub show: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hide: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub require: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub optional: Vec<String>,
}

impl ConditionalRule {
    /// All field names this rule touches (targets, not the trigger)
    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.show
            .iter()
            .chain(&self.hide)
            .chain(&self.require)
            .chain(&self.optional)
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEP_YAML: &str = r#"
id: occupation
title: Occupation
fields:
  - name: occupation
    kind: { type: single_choice, options: [Private Sector, Student] }
    required: true
  - name: companyName
    kind: { type: text, max_length: 120 }
rules:
  - when: occupation
    equals: Private Sector
    require: [companyName]
  - when: occupation
    equals: Student
    hide: [companyName]
"#;

    #[test]
    fn test_step_yaml_parse() {
        let step: StepSchema = serde_yml::from_str(STEP_YAML).unwrap();
        assert_eq!(step.id, "occupation");
        assert_eq!(step.fields.len(), 2);
        assert_eq!(step.rules.len(), 2);
        assert!(step.has_field("companyName"));
        assert!(!step.has_field("designation"));
    }

    #[test]
    fn test_rule_targets() {
        let step: StepSchema = serde_yml::from_str(STEP_YAML).unwrap();
        let targets: Vec<&str> = step.rules[0].targets().collect();
        assert_eq!(targets, vec!["companyName"]);
    }
}
