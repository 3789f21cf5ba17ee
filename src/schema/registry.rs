//! Step registry - loads, orders, and sanity-checks the step schemas
//!
//! All schema misconfiguration is caught here, at construction time, and is
//! fatal to wizard startup. Per-user-action validation never has to deal
//! with a malformed schema.

use miette::Diagnostic;
use rust_embed::RustEmbed;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

use crate::schema::field::FieldKind;
use crate::schema::step::StepSchema;

/// Embedded step schema documents
#[derive(RustEmbed)]
#[folder = "schemas/"]
struct EmbeddedSchemas;

/// Fixed step order of the standard profile wizard
pub const STANDARD_STEP_ORDER: &[&str] = &[
    "basics",
    "about",
    "religion",
    "horoscope",
    "education",
    "occupation",
    "physical",
    "lifestyle",
    "family",
    "location",
];

/// Errors raised while registering step schemas. These are programmer
/// errors, not user input problems, and abort startup.
#[derive(Debug, Error, Diagnostic)]
pub enum RegistryError {
    #[error("Embedded schema '{name}' not found")]
    #[diagnostic(code(sangam::schema::missing))]
    MissingSchema { name: String },

    #[error("Failed to parse schema '{name}': {source}")]
    #[diagnostic(code(sangam::schema::parse))]
    Parse {
        name: String,
        #[source]
        source: serde_yml::Error,
    },

    #[error("No steps registered")]
    #[diagnostic(code(sangam::schema::empty))]
    Empty,

    #[error("Duplicate step id '{id}'")]
    #[diagnostic(code(sangam::schema::duplicate_step))]
    DuplicateStep { id: String },

    #[error("Step '{step}' declares field '{field}' more than once")]
    #[diagnostic(code(sangam::schema::duplicate_field))]
    DuplicateField { step: String, field: String },

    #[error("Step '{step}' has a rule triggered by undeclared field '{field}'")]
    #[diagnostic(
        code(sangam::schema::unknown_trigger),
        help("Conditional rules may only reference sibling fields of the same step")
    )]
    UnknownTrigger { step: String, field: String },

    #[error("Step '{step}' has a rule targeting undeclared field '{field}'")]
    #[diagnostic(
        code(sangam::schema::unknown_target),
        help("Conditional rules may only reference sibling fields of the same step")
    )]
    UnknownTarget { step: String, field: String },

    #[error(
        "Field '{field}' is declared as {first_kind} in step '{first_step}' \
         but as {second_kind} in step '{second_step}'"
    )]
    #[diagnostic(
        code(sangam::schema::incompatible_field),
        help("A field name shared across steps must mean the same logical attribute")
    )]
    IncompatibleField {
        field: String,
        first_step: String,
        first_kind: &'static str,
        second_step: String,
        second_kind: &'static str,
    },
}

/// Ordered, validated collection of step schemas
#[derive(Debug)]
pub struct StepRegistry {
    steps: Vec<StepSchema>,
}

impl StepRegistry {
    /// Load the standard ten-step profile wizard from the embedded schemas
    pub fn standard() -> Result<Self, RegistryError> {
        let mut steps = Vec::with_capacity(STANDARD_STEP_ORDER.len());
        for id in STANDARD_STEP_ORDER {
            let name = format!("{}.step.yaml", id);
            let file = EmbeddedSchemas::get(&name)
                .ok_or_else(|| RegistryError::MissingSchema { name: name.clone() })?;
            let step: StepSchema = serde_yml::from_slice(&file.data)
                .map_err(|source| RegistryError::Parse { name: name.clone(), source })?;
            steps.push(step);
        }
        Self::from_schemas(steps)
    }

    /// Register an explicit step sequence, running all misconfiguration
    /// checks. Step order is the order of `steps`.
    pub fn from_schemas(steps: Vec<StepSchema>) -> Result<Self, RegistryError> {
        if steps.is_empty() {
            return Err(RegistryError::Empty);
        }

        // field name -> (owning step, kind) across all steps
        let mut seen_fields: HashMap<String, (String, FieldKind)> = HashMap::new();
        let mut seen_steps: HashSet<String> = HashSet::new();

        for step in &steps {
            if !seen_steps.insert(step.id.clone()) {
                return Err(RegistryError::DuplicateStep { id: step.id.clone() });
            }

            let mut local: HashSet<&str> = HashSet::new();
            for field in &step.fields {
                if !local.insert(&field.name) {
                    return Err(RegistryError::DuplicateField {
                        step: step.id.clone(),
                        field: field.name.clone(),
                    });
                }

                match seen_fields.get(&field.name) {
                    Some((first_step, first_kind)) if *first_kind != field.kind => {
                        return Err(RegistryError::IncompatibleField {
                            field: field.name.clone(),
                            first_step: first_step.clone(),
                            first_kind: first_kind.name(),
                            second_step: step.id.clone(),
                            second_kind: field.kind.name(),
                        });
                    }
                    Some(_) => {}
                    None => {
                        seen_fields
                            .insert(field.name.clone(), (step.id.clone(), field.kind.clone()));
                    }
                }
            }

            for rule in &step.rules {
                if !step.has_field(&rule.when) {
                    return Err(RegistryError::UnknownTrigger {
                        step: step.id.clone(),
                        field: rule.when.clone(),
                    });
                }
                for target in rule.targets() {
                    if !step.has_field(target) {
                        return Err(RegistryError::UnknownTarget {
                            step: step.id.clone(),
                            field: target.to_string(),
                        });
                    }
                }
            }
        }

        Ok(Self { steps })
    }

    /// Number of steps
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Step schema at the given index
    pub fn at(&self, index: usize) -> Option<&StepSchema> {
        self.steps.get(index)
    }

    /// Step schema by id
    pub fn get(&self, id: &str) -> Option<&StepSchema> {
        self.steps.iter().find(|s| s.id == id)
    }

    /// Step ids in wizard order
    pub fn step_order(&self) -> Vec<String> {
        self.steps.iter().map(|s| s.id.clone()).collect()
    }

    /// Iterate the steps in wizard order
    pub fn iter(&self) -> impl Iterator<Item = &StepSchema> {
        self.steps.iter()
    }
}
