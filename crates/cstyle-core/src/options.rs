//! Typed checker options and the table describing them.

use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;

use crate::config::ConfigError;

/// Default value of an option, which also fixes its type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionDefault {
    /// Boolean option.
    Bool(bool),
    /// String option.
    Str(&'static str),
}

/// Static description of one recognized option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionSpec {
    /// Key in the `[Options]` table.
    pub name: &'static str,
    /// Default used when the configuration does not set the option.
    pub default: OptionDefault,
    /// One-line documentation, emitted by the config serializer.
    pub doc: &'static str,
}

impl OptionSpec {
    /// Default as a typed value.
    #[must_use]
    pub fn default_value(&self) -> OptionValue {
        match self.default {
            OptionDefault::Bool(b) => OptionValue::Bool(b),
            OptionDefault::Str(s) => OptionValue::Str(s.to_owned()),
        }
    }
}

/// Every option the checker understands.
pub const OPTION_SPECS: [OptionSpec; 4] = [
    OptionSpec {
        name: "pointer_prefix",
        default: OptionDefault::Str(""),
        doc: "Prefix required on pointer variable and parameter names (empty disables the check)",
    },
    OptionSpec {
        name: "pointer_prefix_repeat",
        default: OptionDefault::Bool(false),
        doc: "Repeat the pointer prefix once per level of indirection (char **ppArgv)",
    },
    OptionSpec {
        name: "arrays_are_pointers",
        default: OptionDefault::Bool(false),
        doc: "Count array brackets as pointer indirection for the pointer prefix",
    },
    OptionSpec {
        name: "prefer_goto",
        default: OptionDefault::Bool(false),
        doc: "Allow goto and require at most one return statement per function",
    },
];

/// Looks up an option description by name, ignoring ASCII case.
#[must_use]
pub fn find_spec(name: &str) -> Option<&'static OptionSpec> {
    OPTION_SPECS
        .iter()
        .find(|spec| spec.name.eq_ignore_ascii_case(name))
}

/// A typed option value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    /// Boolean value.
    Bool(bool),
    /// String value.
    Str(String),
}

impl OptionValue {
    /// Renders the value as a TOML literal.
    #[must_use]
    pub fn to_toml(&self) -> String {
        match self {
            Self::Bool(b) => toml::Value::Boolean(*b).to_string(),
            Self::Str(s) => toml::Value::String(s.clone()).to_string(),
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

/// Parses the usual spellings of a boolean, ignoring case.
#[must_use]
pub fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

/// Fully populated checker options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Required prefix for pointer names; empty disables the check.
    pub pointer_prefix: String,
    /// Repeat the prefix once per indirection level.
    pub pointer_prefix_repeat: bool,
    /// Treat `[` in type text as an indirection.
    pub arrays_are_pointers: bool,
    /// Allow goto, limit functions to one return.
    pub prefer_goto: bool,
}

impl Default for Options {
    fn default() -> Self {
        let mut options = Self {
            pointer_prefix: String::new(),
            pointer_prefix_repeat: false,
            arrays_are_pointers: false,
            prefer_goto: false,
        };
        for spec in &OPTION_SPECS {
            options.set(spec.name, spec.default_value());
        }
        options
    }
}

impl Options {
    /// Builds options from an `[Options]` table, defaulting anything unset.
    ///
    /// Unrecognized keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOption`] when a value does not fit the
    /// option's type.
    pub fn from_table(table: Option<&BTreeMap<String, toml::Value>>) -> Result<Self, ConfigError> {
        let mut options = Self::default();
        let Some(table) = table else {
            return Ok(options);
        };

        for (key, raw) in table {
            let Some(spec) = find_spec(key) else {
                debug!("Ignoring unknown option: {key}");
                continue;
            };
            let value = coerce(spec, raw)?;
            options.set(spec.name, value);
        }

        Ok(options)
    }

    /// Current value of a named option.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<OptionValue> {
        let spec = find_spec(name)?;
        let value = match spec.name {
            "pointer_prefix" => OptionValue::Str(self.pointer_prefix.clone()),
            "pointer_prefix_repeat" => OptionValue::Bool(self.pointer_prefix_repeat),
            "arrays_are_pointers" => OptionValue::Bool(self.arrays_are_pointers),
            "prefer_goto" => OptionValue::Bool(self.prefer_goto),
            _ => return None,
        };
        Some(value)
    }

    fn set(&mut self, name: &str, value: OptionValue) {
        match (name, value) {
            ("pointer_prefix", OptionValue::Str(s)) => self.pointer_prefix = s,
            ("pointer_prefix_repeat", OptionValue::Bool(b)) => self.pointer_prefix_repeat = b,
            ("arrays_are_pointers", OptionValue::Bool(b)) => self.arrays_are_pointers = b,
            ("prefer_goto", OptionValue::Bool(b)) => self.prefer_goto = b,
            (name, value) => debug!("Option {name} cannot hold {value:?}"),
        }
    }
}

fn coerce(spec: &OptionSpec, raw: &toml::Value) -> Result<OptionValue, ConfigError> {
    let invalid = |expected: &'static str| ConfigError::InvalidOption {
        name: spec.name.to_string(),
        value: raw.to_string(),
        expected,
    };

    match (spec.default, raw) {
        (OptionDefault::Bool(_), toml::Value::Boolean(b)) => Ok(OptionValue::Bool(*b)),
        (OptionDefault::Bool(_), toml::Value::String(s)) => parse_bool(s)
            .map(OptionValue::Bool)
            .ok_or_else(|| invalid("a boolean")),
        (OptionDefault::Bool(_), _) => Err(invalid("a boolean")),
        (OptionDefault::Str(_), toml::Value::String(s)) => Ok(OptionValue::Str(s.clone())),
        (OptionDefault::Str(_), _) => Err(invalid("a string")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(&str, toml::Value)]) -> BTreeMap<String, toml::Value> {
        entries
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn absent_table_gives_defaults() {
        let options = Options::from_table(None).unwrap();
        assert_eq!(options, Options::default());
        assert!(options.pointer_prefix.is_empty());
        assert!(!options.pointer_prefix_repeat);
        assert!(!options.arrays_are_pointers);
        assert!(!options.prefer_goto);
    }

    #[test]
    fn defaults_match_spec_table() {
        let options = Options::default();
        for spec in &OPTION_SPECS {
            assert_eq!(options.get(spec.name), Some(spec.default_value()));
        }
    }

    #[test]
    fn string_booleans_are_accepted() {
        let t = table(&[
            ("pointer_prefix", toml::Value::String("p".into())),
            ("pointer_prefix_repeat", toml::Value::String("TRUE".into())),
            ("prefer_goto", toml::Value::String("yes".into())),
            ("arrays_are_pointers", toml::Value::Boolean(true)),
        ]);
        let options = Options::from_table(Some(&t)).unwrap();
        assert_eq!(options.pointer_prefix, "p");
        assert!(options.pointer_prefix_repeat);
        assert!(options.prefer_goto);
        assert!(options.arrays_are_pointers);
    }

    #[test]
    fn bad_boolean_is_config_error() {
        let t = table(&[("prefer_goto", toml::Value::String("sometimes".into()))]);
        let err = Options::from_table(Some(&t)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidOption { ref name, .. } if name == "prefer_goto"));
        assert!(err.to_string().contains("sometimes"));
    }

    #[test]
    fn non_string_prefix_is_config_error() {
        let t = table(&[("pointer_prefix", toml::Value::Integer(1))]);
        assert!(Options::from_table(Some(&t)).is_err());
    }

    #[test]
    fn unknown_options_are_ignored() {
        let t = table(&[("indent_width", toml::Value::Integer(8))]);
        assert_eq!(Options::from_table(Some(&t)).unwrap(), Options::default());
    }

    #[test]
    fn option_names_ignore_case() {
        let t = table(&[("Prefer_Goto", toml::Value::Boolean(true))]);
        assert!(Options::from_table(Some(&t)).unwrap().prefer_goto);
    }

    #[test]
    fn parse_bool_spellings() {
        for s in ["true", "Yes", "ON", "1"] {
            assert_eq!(parse_bool(s), Some(true), "{s}");
        }
        for s in ["false", "No", "off", "0"] {
            assert_eq!(parse_bool(s), Some(false), "{s}");
        }
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn values_render_as_toml() {
        assert_eq!(OptionValue::Bool(true).to_toml(), "true");
        assert_eq!(OptionValue::Str("p".into()).to_toml(), "\"p\"");
    }
}
