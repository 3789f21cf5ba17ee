//! Command implementations, one module per subcommand

pub mod check;
pub mod completions;
pub mod run;
pub mod schema;
pub mod steps;
