//! Validation engine - per-field checks against a step schema
//!
//! Purely a function of the submitted values at call time. All failures
//! surface as entries in the returned [`FieldErrors`]; nothing here panics
//! or returns early on the first problem.

use chrono::NaiveDate;

use crate::core::value::{FieldErrors, FieldValue, FieldValues};
use crate::schema::field::FieldKind;
use crate::schema::resolver::ActiveFieldSet;
use crate::schema::step::StepSchema;

const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Validate `values` against `schema`, restricted to the fields that
/// `active` marks visible. Invisible fields are never checked and never
/// produce errors, even when a previous rule marked them required.
///
/// Returns an empty mapping iff the step is valid.
pub fn validate(schema: &StepSchema, values: &FieldValues, active: &ActiveFieldSet) -> FieldErrors {
    let mut errors = FieldErrors::new();

    for field in &schema.fields {
        let Some(state) = active.get(&field.name) else {
            continue;
        };
        if !state.visible {
            continue;
        }

        match values.get(&field.name) {
            Some(value) if !value.is_blank() => {
                if let Some(message) = check_kind(&field.kind, value) {
                    errors.insert(field.name.clone(), message);
                }
            }
            // Unset and blank are the same thing to the engine
            _ => {
                if state.required {
                    errors.insert(
                        field.name.clone(),
                        format!("{} is required", field.display_label()),
                    );
                }
            }
        }
    }

    errors
}

/// Type-specific check for a non-blank value. Returns the error message on
/// failure.
fn check_kind(kind: &FieldKind, value: &FieldValue) -> Option<String> {
    match kind {
        FieldKind::Text { min_length, max_length } => {
            let Some(text) = value.as_text() else {
                return Some("must be text".to_string());
            };
            let len = text.trim().chars().count();
            if let Some(min) = min_length {
                if len < *min {
                    return Some(format!("must be at least {} characters", min));
                }
            }
            if let Some(max) = max_length {
                if len > *max {
                    return Some(format!("must be at most {} characters", max));
                }
            }
            None
        }

        FieldKind::Number { min, max } => {
            let Some(n) = value.as_number() else {
                return Some("must be a number".to_string());
            };
            if n < *min || n > *max {
                return Some(format!("must be between {}\u{2013}{}", min, max));
            }
            None
        }

        FieldKind::SingleChoice { options } => {
            let Some(choice) = value.as_text() else {
                return Some(format!("must be one of: {}", options.join(", ")));
            };
            if options.iter().any(|o| o == choice) {
                None
            } else {
                Some(format!("must be one of: {}", options.join(", ")))
            }
        }

        FieldKind::MultiChoice { options } => {
            let choices = value.as_choices();
            if choices.is_empty() {
                return Some(format!("must be one or more of: {}", options.join(", ")));
            }
            for choice in choices {
                if !options.iter().any(|o| o == choice) {
                    return Some(format!("'{}' is not one of: {}", choice, options.join(", ")));
                }
            }
            None
        }

        FieldKind::Date { format } => {
            let fmt = format.as_deref().unwrap_or(DEFAULT_DATE_FORMAT);
            let Some(text) = value.as_text() else {
                return Some(format!("must be a date in {} format", fmt));
            };
            if NaiveDate::parse_from_str(text.trim(), fmt).is_ok() {
                None
            } else {
                Some(format!("must be a date in {} format", fmt))
            }
        }
    }
}
