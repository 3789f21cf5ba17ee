//! Core module - values, session state machine, and configuration

pub mod config;
pub mod session;
pub mod value;

pub use config::Config;
pub use session::{
    StepView, SubmitOutcome, WizardController, WizardError, WizardSession, WizardState,
};
pub use value::{FieldErrors, FieldValue, FieldValues};
