//! CLI module - argument parsing, command dispatch, and the terminal presenter

pub mod args;
pub mod commands;
pub mod helpers;
pub mod presenter;

pub use args::{Cli, Commands, GlobalOpts, OutputFormat};
pub use presenter::TerminalPresenter;
