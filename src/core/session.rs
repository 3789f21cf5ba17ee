//! Wizard session and controller - the state machine of the profile flow
//!
//! One [`WizardController`] owns one [`WizardSession`] for one in-progress
//! profile. Operations are synchronous and run to completion; the session is
//! never observable mid-transition. Validation failures and the back-at-
//! step-0 boundary are data, not panics.

use chrono::{DateTime, Utc};
use thiserror::Error;
use ulid::Ulid;

use crate::core::value::{FieldErrors, FieldValue, FieldValues};
use crate::schema::field::FieldKind;
use crate::schema::registry::StepRegistry;
use crate::schema::resolver::{self, ActiveFieldSet};
use crate::schema::step::StepSchema;
use crate::schema::validator;

/// Lifecycle state of a wizard session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardState {
    /// Collecting input for the step at this index
    Active(usize),
    /// All steps validated; the final draft is available
    Completed,
    /// Abandoned by the user; the draft has been discarded
    Abandoned,
}

/// Errors returned by controller operations.
///
/// `AtFirstStep` is an expected boundary condition, not a failure mode; the
/// presenter simply leaves the view unchanged.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WizardError {
    #[error("Wizard is no longer active")]
    NotActive,

    #[error("Already at the first step")]
    AtFirstStep,
}

/// Outcome of a successful `submit_next` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Step validated; the wizard moved to the next step
    Advanced,
    /// The last step validated; the wizard is complete
    Completed,
    /// Validation failed; the step stays current and the errors are also
    /// available through `current_step_view`
    Invalid(FieldErrors),
}

/// Read-only view of the current step for a presenter
#[derive(Debug, Clone)]
pub struct StepView {
    pub step_id: String,
    pub title: String,
    /// Draft values belonging to this step's fields
    pub values: FieldValues,
    pub active: ActiveFieldSet,
    pub errors: FieldErrors,
    /// Zero-based position and total step count, for "Step i of n" headers
    pub index: usize,
    pub step_count: usize,
}

/// Mutable per-profile state, owned exclusively by one controller
#[derive(Debug)]
pub struct WizardSession {
    pub id: Ulid,
    pub started: DateTime<Utc>,
    state: WizardState,
    draft: FieldValues,
    last_errors: FieldErrors,
}

impl WizardSession {
    fn new() -> Self {
        Self {
            id: Ulid::new(),
            started: Utc::now(),
            state: WizardState::Active(0),
            draft: FieldValues::new(),
            last_errors: FieldErrors::new(),
        }
    }
}

/// Orchestrates step order, accumulates the profile draft, and exposes
/// forward/back transitions.
pub struct WizardController {
    registry: StepRegistry,
    session: WizardSession,
}

impl WizardController {
    /// Start a new session at the first step of the registry's order
    pub fn new(registry: StepRegistry) -> Self {
        Self { registry, session: WizardSession::new() }
    }

    pub fn state(&self) -> WizardState {
        self.session.state
    }

    pub fn session(&self) -> &WizardSession {
        &self.session
    }

    pub fn step_count(&self) -> usize {
        self.registry.len()
    }

    /// Zero-based index of the current step, while active
    pub fn current_index(&self) -> Option<usize> {
        match self.session.state {
            WizardState::Active(i) => Some(i),
            _ => None,
        }
    }

    /// Schema of the current step, while active
    pub fn current_schema(&self) -> Result<&StepSchema, WizardError> {
        let index = self.current_index().ok_or(WizardError::NotActive)?;
        // The registry guaranteed every index in range at construction
        Ok(self.registry.at(index).expect("step index in range"))
    }

    /// Validate a candidate patch against the current step and, on success,
    /// merge its active fields into the draft and advance.
    ///
    /// Active fields are resolved from the step's previously stored values
    /// overlaid with the patch, so revisiting a step with a partial patch
    /// sees what was entered before. Values for inactive fields are ignored
    /// on merge; stale values already in the draft are left in place, to be
    /// reconsidered if the step is revisited.
    pub fn submit_next(&mut self, patch: &FieldValues) -> Result<SubmitOutcome, WizardError> {
        let index = self.current_index().ok_or(WizardError::NotActive)?;
        let schema = self.registry.at(index).expect("step index in range");

        let mut effective = step_values(schema, &self.session.draft);
        for (name, value) in patch {
            if schema.has_field(name) {
                effective.insert(name.clone(), value.clone());
            }
        }

        let active = resolver::resolve(schema, &effective);
        let errors = validator::validate(schema, &effective, &active);

        if !errors.is_empty() {
            self.session.last_errors = errors.clone();
            return Ok(SubmitOutcome::Invalid(errors));
        }

        for (name, state) in &active {
            if !state.visible {
                continue;
            }
            match effective.get(name) {
                Some(value) if !value.is_blank() => {
                    self.session.draft.insert(name.clone(), stored_value(schema, name, value));
                }
                // An explicitly cleared optional field leaves the draft
                Some(_) => {
                    self.session.draft.remove(name);
                }
                None => {}
            }
        }
        self.session.last_errors.clear();

        if index + 1 == self.registry.len() {
            self.session.state = WizardState::Completed;
            Ok(SubmitOutcome::Completed)
        } else {
            self.session.state = WizardState::Active(index + 1);
            Ok(SubmitOutcome::Advanced)
        }
    }

    /// Move back one step. At the first step this is a boundary condition:
    /// nothing changes and `AtFirstStep` is returned. Draft entries for
    /// steps ahead of the new index are kept.
    pub fn go_back(&mut self) -> Result<(), WizardError> {
        let index = self.current_index().ok_or(WizardError::NotActive)?;
        if index == 0 {
            return Err(WizardError::AtFirstStep);
        }
        self.session.state = WizardState::Active(index - 1);
        self.session.last_errors.clear();
        Ok(())
    }

    /// Abandon the session. The draft is discarded by policy.
    pub fn abandon(&mut self) {
        self.session.state = WizardState::Abandoned;
        self.session.draft.clear();
        self.session.last_errors.clear();
    }

    /// Read-only view of the current step for rendering
    pub fn current_step_view(&self) -> Result<StepView, WizardError> {
        let index = self.current_index().ok_or(WizardError::NotActive)?;
        let schema = self.registry.at(index).expect("step index in range");
        let values = step_values(schema, &self.session.draft);
        let active = resolver::resolve(schema, &values);

        Ok(StepView {
            step_id: schema.id.clone(),
            title: schema.title.clone(),
            values,
            active,
            errors: self.session.last_errors.clone(),
            index,
            step_count: self.registry.len(),
        })
    }

    /// The accumulated profile, once the wizard has completed
    pub fn completed_profile(&self) -> Option<&FieldValues> {
        match self.session.state {
            WizardState::Completed => Some(&self.session.draft),
            _ => None,
        }
    }

    /// The draft as currently accumulated. Test and inspection hook; the
    /// downstream consumer should use `completed_profile`.
    pub fn draft(&self) -> &FieldValues {
        &self.session.draft
    }
}

/// Value as it enters the draft. Numeric text for a number field is stored
/// as a number, so the exported profile's types do not depend on whether a
/// value arrived typed or as prompt text.
fn stored_value(schema: &StepSchema, name: &str, value: &FieldValue) -> FieldValue {
    match schema.field(name).map(|f| &f.kind) {
        Some(FieldKind::Number { .. }) => value
            .as_number()
            .map(FieldValue::Number)
            .unwrap_or_else(|| value.clone()),
        _ => value.clone(),
    }
}

/// Subset of the draft belonging to one step's fields
fn step_values(schema: &StepSchema, draft: &FieldValues) -> FieldValues {
    schema
        .field_names()
        .filter_map(|name| draft.get(name).map(|v| (name.to_string(), v.clone())))
        .collect()
}
