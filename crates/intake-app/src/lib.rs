//! Intake client application
//!
//! Command line front end for the medical intake conversation and appointment lookup.

pub mod app;
pub mod cli;
pub mod config;
pub mod render;

pub use app::{run_lookup, run_repl_mode};
pub use cli::{Cli, Commands};
pub use config::IntakeConfig;
