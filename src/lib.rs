//! Sangam: a step-based profile wizard
//!
//! The wizard core is a synchronous state machine: declarative step schemas,
//! a pure conditional-field resolver, a pure validation engine, and a
//! controller that accumulates a single profile draft across steps. The CLI
//! layer is a thin terminal presenter over that core.

pub mod cli;
pub mod core;
pub mod schema;
