//! Generate-config command implementation.

use anyhow::{bail, Context, Result};
use cstyle_core::Config;
use std::path::Path;

use crate::config_resolver::{self, ConfigSource};

/// Runs the generate-config command.
///
/// Renders the resolved configuration (or the defaults) to stdout, or to
/// `output` when given.
pub fn run(output: Option<&Path>, force: bool, defaults: bool, source: &ConfigSource) -> Result<()> {
    let config = if defaults {
        Config::default()
    } else {
        config_resolver::load(source)?
    };
    let rendered = config.render();

    let Some(path) = output else {
        print!("{rendered}");
        return Ok(());
    };

    if path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    std::fs::write(path, rendered)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("Created {}", path.display());
    println!("\nNext steps:");
    println!("  1. Edit {} to set options and naming rules", path.display());
    println!("  2. Run: cstyle check");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn writes_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("cstyle.toml");

        run(Some(&path), false, true, &ConfigSource::Default).unwrap();

        let written = Config::from_file(&path).unwrap();
        assert_eq!(written, Config::default());
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("cstyle.toml");
        std::fs::write(&path, "# mine\n").unwrap();

        assert!(run(Some(&path), false, true, &ConfigSource::Default).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# mine\n");

        run(Some(&path), true, true, &ConfigSource::Default).unwrap();
        assert_ne!(std::fs::read_to_string(&path).unwrap(), "# mine\n");
    }

    #[test]
    fn renders_the_resolved_config() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("in.toml");
        std::fs::write(&input, "[Options]\npointer_prefix = \"p\"\n[Rules]\nvar_decl = '[a-z]+'\n").unwrap();
        let output = tmp.path().join("out.toml");

        run(Some(&output), false, false, &ConfigSource::Explicit(input.clone())).unwrap();

        assert_eq!(
            Config::from_file(&output).unwrap(),
            Config::from_file(&input).unwrap()
        );
    }
}
