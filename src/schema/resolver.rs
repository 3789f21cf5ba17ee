//! Conditional field resolution - which fields are visible and required
//!
//! Pure and deterministic; safe to call on every keystroke.

use std::collections::BTreeMap;

use crate::core::value::FieldValues;
use crate::schema::step::StepSchema;

/// Visibility and required-ness of one field for the current values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveField {
    pub visible: bool,
    pub required: bool,
}

impl ActiveField {
    /// Active means shown to the user and subject to validation
    pub fn is_active(&self) -> bool {
        self.visible
    }
}

/// Active state for every field of a step, keyed by field name
pub type ActiveFieldSet = BTreeMap<String, ActiveField>;

/// Compute the active field set for a step given the values currently held
/// for that step.
///
/// Every field starts visible with its declared default required-ness.
/// Rules whose trigger value matches are applied in declaration order, so a
/// later rule overrides an earlier one for the same field. A trigger that is
/// unset or blank never fires; unresolved triggers leave the defaults in
/// place rather than hiding anything.
pub fn resolve(schema: &StepSchema, values: &FieldValues) -> ActiveFieldSet {
    let mut active: ActiveFieldSet = schema
        .fields
        .iter()
        .map(|f| {
            (
                f.name.clone(),
                ActiveField { visible: true, required: f.required },
            )
        })
        .collect();

    for rule in &schema.rules {
        let fired = values
            .get(&rule.when)
            .filter(|v| !v.is_blank())
            .map(|v| v.as_choices().contains(&rule.equals.as_str()))
            .unwrap_or(false);
        if !fired {
            continue;
        }

        for name in &rule.show {
            if let Some(f) = active.get_mut(name) {
                f.visible = true;
            }
        }
        for name in &rule.hide {
            if let Some(f) = active.get_mut(name) {
                f.visible = false;
            }
        }
        for name in &rule.require {
            if let Some(f) = active.get_mut(name) {
                f.visible = true;
                f.required = true;
            }
        }
        for name in &rule.optional {
            if let Some(f) = active.get_mut(name) {
                f.required = false;
            }
        }
    }

    active
}
