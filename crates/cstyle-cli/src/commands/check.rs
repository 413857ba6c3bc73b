//! Check command implementation.

use anyhow::{Context, Result};
use cstyle_core::Validator;
use cstyle_ts::TreeSitterParser;
use std::path::{Path, PathBuf};

use crate::config_resolver::{self, ConfigSource};
use crate::OutputFormat;

/// Runs the check command.
pub fn run(
    paths: &[PathBuf],
    format: OutputFormat,
    exclude: &[String],
    fail_on_parse_error: bool,
    allow_syntax_errors: bool,
    source: &ConfigSource,
) -> Result<()> {
    let config = config_resolver::load(source)?;

    let files = discover_files(paths, exclude)?;
    if files.is_empty() {
        tracing::warn!("No C or C++ sources found");
    }

    let validator = Validator::builder()
        .config(config)
        .files(files)
        .fail_on_parse_error(fail_on_parse_error)
        .build();
    let parser = TreeSitterParser::new().allow_syntax_errors(allow_syntax_errors);

    let result = validator.run(&parser).context("Check aborted")?;

    super::output::print(&result, format)?;

    // Exit with error code on any diagnostic or unparsed file
    if !result.is_clean() {
        std::process::exit(1);
    }

    Ok(())
}

/// Expands the command-line paths into the files to check.
///
/// Files named explicitly are always kept, in argument order. Directories
/// are walked (respecting `.gitignore`) for supported extensions and their
/// files sorted.
fn discover_files(paths: &[PathBuf], exclude: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for root in paths {
        if root.is_file() {
            files.push(root.clone());
            continue;
        }

        let mut builder = ignore::WalkBuilder::new(root);
        builder.hidden(false).git_ignore(true);

        let mut found = Vec::new();
        for entry in builder.build() {
            let entry = entry.with_context(|| format!("Failed to walk {}", root.display()))?;
            let path = entry.path();

            if !path.is_file() || !cstyle_ts::is_supported(path) {
                continue;
            }

            if !is_excluded(root, path, exclude) {
                found.push(path.to_path_buf());
            }
        }

        found.sort();
        tracing::debug!("Found {} source file(s) under {}", found.len(), root.display());
        files.extend(found);
    }

    Ok(files)
}

fn is_excluded(root: &Path, path: &Path, exclude: &[String]) -> bool {
    let rel_str = path.strip_prefix(root).unwrap_or(path).to_string_lossy();
    exclude.iter().any(|pattern| {
        let clean = pattern.replace("**/", "").replace("/**", "");
        !clean.is_empty() && rel_str.contains(&clean)
    })
}
