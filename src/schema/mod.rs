//! Schema system - step definitions, conditional resolution, validation

pub mod field;
pub mod registry;
pub mod resolver;
pub mod step;
pub mod validator;

pub use field::{FieldDescriptor, FieldKind};
pub use registry::{RegistryError, StepRegistry, STANDARD_STEP_ORDER};
pub use resolver::{resolve, ActiveField, ActiveFieldSet};
pub use step::{ConditionalRule, StepSchema};
pub use validator::validate;
