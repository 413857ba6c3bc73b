//! Configuration loading and rendering.
//!
//! A configuration file is a TOML document with an `[Options]` table and a
//! `[Rules]` table:
//!
//! ```toml
//! [Options]
//! pointer_prefix = "p"
//! pointer_prefix_repeat = "true"
//!
//! [Rules]
//! var_decl = '^[a-z][a-z0-9_]*$'
//! ```

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::options::{OptionDefault, Options, OPTION_SPECS};
use crate::rules::RuleDatabase;

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The document is not valid TOML or has the wrong shape.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// An option value does not fit the option's type.
    #[error("Invalid value {value} for option `{name}`: expected {expected}")]
    InvalidOption {
        /// Option name.
        name: String,
        /// Offending value as written.
        value: String,
        /// Human-readable expected type.
        expected: &'static str,
    },

    /// A `[Rules]` key names no known syntax kind.
    #[error("Unknown syntax kind `{name}` in [Rules]")]
    UnknownKind {
        /// Key as written.
        name: String,
    },

    /// A rule pattern is not a valid regular expression.
    #[error("Invalid pattern for `{kind}` ({pattern}): {message}")]
    InvalidPattern {
        /// Kind the rule belongs to.
        kind: String,
        /// Pattern source.
        pattern: String,
        /// Regex compiler message.
        message: String,
    },
}

/// Raw tables of a configuration document, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigDocument {
    /// `[Options]` table.
    #[serde(rename = "Options", alias = "options", default)]
    pub options: BTreeMap<String, toml::Value>,

    /// `[Rules]` table: kind name to pattern source.
    #[serde(rename = "Rules", alias = "rules", default)]
    pub rules: BTreeMap<String, String>,
}

impl ConfigDocument {
    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }
}

/// Validated checker configuration: options plus rule database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Typed options.
    pub options: Options,
    /// Naming rules.
    pub rules: RuleDatabase,
}

impl Default for Config {
    /// Configuration used when no configuration source exists.
    fn default() -> Self {
        Self {
            options: Options::default(),
            rules: RuleDatabase::permissive(),
        }
    }
}

impl Config {
    /// Creates a configuration from parts.
    #[must_use]
    pub fn new(options: Options, rules: RuleDatabase) -> Self {
        Self { options, rules }
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses and validates configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or a value is rejected.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let document = ConfigDocument::parse(content)?;
        Self::from_document(Some(&document))
    }

    /// Validates a parsed document; `None` means no configuration source.
    ///
    /// # Errors
    ///
    /// Returns the first invalid option, unknown kind or bad pattern.
    pub fn from_document(document: Option<&ConfigDocument>) -> Result<Self, ConfigError> {
        let options = Options::from_table(document.map(|d| &d.options))?;
        let rules = RuleDatabase::from_table(document.map(|d| &d.rules))?;
        Ok(Self { options, rules })
    }

    /// Renders the configuration back to a TOML document.
    ///
    /// Every option is written with its documentation and default, followed
    /// by every rule in the database. The output parses back to an equal
    /// [`Config`].
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str("# cstyle configuration\n\n");

        out.push_str("[Options]\n");
        for spec in &OPTION_SPECS {
            let default = match spec.default {
                OptionDefault::Bool(b) => toml::Value::Boolean(b).to_string(),
                OptionDefault::Str(s) => toml::Value::String(s.to_string()).to_string(),
            };
            let current = self
                .options
                .get(spec.name)
                .unwrap_or_else(|| spec.default_value());
            let _ = writeln!(out, "# {}", spec.doc);
            let _ = writeln!(out, "# default: {default}");
            let _ = writeln!(out, "{} = {}\n", spec.name, current.to_toml());
        }

        out.push_str("[Rules]\n");
        out.push_str("# <kind> = '<regex>'; the whole identifier must match.\n");
        for rule in self.rules.iter() {
            let pattern = toml::Value::String(rule.source().to_string());
            let _ = writeln!(out, "{} = {}", rule.kind(), pattern);
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::SyntaxKind;

    #[test]
    fn default_config_is_permissive() {
        let config = Config::default();
        assert_eq!(config.options, Options::default());
        assert_eq!(config.rules.len(), SyntaxKind::ALL.len());
    }

    #[test]
    fn parse_both_tables() {
        let toml = r#"
[Options]
pointer_prefix = "p"
pointer_prefix_repeat = "true"

[Rules]
var_decl = '^[a-z][a-z0-9_]*$'
"#;
        let config = Config::parse(toml).expect("Failed to parse");
        assert_eq!(config.options.pointer_prefix, "p");
        assert!(config.options.pointer_prefix_repeat);
        assert_eq!(config.rules.len(), 1);
        assert_eq!(
            config.rules.get(SyntaxKind::VarDecl).map(|r| r.source()),
            Some("^[a-z][a-z0-9_]*$")
        );
    }

    #[test]
    fn lowercase_table_names_are_accepted() {
        let toml = "[options]\nprefer_goto = true\n[rules]\nlabel_stmt = 'out'\n";
        let config = Config::parse(toml).unwrap();
        assert!(config.options.prefer_goto);
        assert!(config.rules.get(SyntaxKind::LabelStmt).is_some());
    }

    #[test]
    fn empty_document_has_defaults_and_no_rules() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.options, Options::default());
        assert!(config.rules.is_empty());
    }

    #[test]
    fn unrelated_tables_are_ignored() {
        let config = Config::parse("[Output]\ncolor = true\n").unwrap();
        assert!(config.rules.is_empty());
    }

    #[test]
    fn invalid_toml_is_parse_error() {
        let err = Config::parse("[Options\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn non_string_rule_is_parse_error() {
        let err = Config::parse("[Rules]\nvar_decl = 3\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Config::from_file(Path::new("/nonexistent/cstyle.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn render_round_trips_defaults() {
        let config = Config::default();
        let rendered = config.render();
        let reparsed = Config::parse(&rendered).unwrap();
        assert_eq!(reparsed, config);
    }

    #[test]
    fn render_round_trips_custom_values() {
        let toml = r#"
[Options]
pointer_prefix = "p"
prefer_goto = "on"

[Rules]
var_decl = '^[a-z]\w*$'
macro_definition = "[A-Z_]+"
label_stmt = "it's|done"
"#;
        let config = Config::parse(toml).unwrap();
        let reparsed = Config::parse(&config.render()).unwrap();
        assert_eq!(reparsed, config);
    }

    #[test]
    fn render_documents_every_option() {
        let rendered = Config::default().render();
        for spec in &OPTION_SPECS {
            assert!(rendered.contains(spec.doc), "missing doc for {}", spec.name);
            assert!(rendered.contains(&format!("{} = ", spec.name)));
        }
        assert!(rendered.contains("[Rules]"));
        assert!(rendered.contains("goto_stmt = "));
    }
}
