//! Subcommand implementations.

pub mod check;
pub mod generate_config;
pub mod list_kinds;
pub mod output;
