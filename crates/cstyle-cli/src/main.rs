//! cstyle CLI tool.
//!
//! Usage:
//! ```bash
//! cstyle check [OPTIONS] [PATHS]...
//! cstyle generate-config [--output FILE]
//! cstyle list-kinds
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Naming and style checker for C and C++ sources
#[derive(Parser)]
#[command(name = "cstyle")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check source files
    Check {
        /// Files or directories to check (default: current directory)
        #[arg(default_value = ".")]
        paths: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Exclude patterns (can be specified multiple times)
        #[arg(short, long)]
        exclude: Vec<String>,

        /// Stop at the first file that does not parse
        #[arg(long)]
        fail_on_parse_error: bool,

        /// Check files even if the grammar had to recover from syntax errors
        #[arg(long)]
        allow_syntax_errors: bool,
    },

    /// Print or write the configuration file
    GenerateConfig {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite an existing output file
        #[arg(long)]
        force: bool,

        /// Ignore any existing configuration and emit the defaults
        #[arg(long)]
        defaults: bool,
    },

    /// List syntax kinds and options
    ListKinds,
}

/// Output format for check results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// One `file:line:column: reason` line per diagnostic.
    Compact,
    /// JSON output.
    Json,
    /// Source snippets with the offending name highlighted.
    Pretty,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // Logs go to stderr so generated configs and JSON stay clean on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let source = config_resolver::resolve(Path::new("."), cli.config.as_deref());

    match cli.command {
        Commands::Check {
            paths,
            format,
            exclude,
            fail_on_parse_error,
            allow_syntax_errors,
        } => commands::check::run(
            &paths,
            format,
            &exclude,
            fail_on_parse_error,
            allow_syntax_errors,
            &source,
        ),
        Commands::GenerateConfig {
            output,
            force,
            defaults,
        } => commands::generate_config::run(output.as_deref(), force, defaults, &source),
        Commands::ListKinds => {
            commands::list_kinds::run();
            Ok(())
        }
    }
}
