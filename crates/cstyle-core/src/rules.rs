//! Rule database: which pattern an identifier of each kind must match.

use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;

use crate::config::ConfigError;
use crate::kind::SyntaxKind;

/// Pattern assigned to every kind when no configuration is given.
pub const MATCH_ANYTHING: &str = ".*";

/// A compiled naming rule for one kind.
#[derive(Clone)]
pub struct Rule {
    kind: SyntaxKind,
    source: String,
    regex: Regex,
}

impl Rule {
    /// Compiles `source` with whole-identifier match semantics.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPattern`] if the expression is malformed.
    pub fn new(kind: SyntaxKind, source: impl Into<String>) -> Result<Self, ConfigError> {
        let source = source.into();
        let regex = Regex::new(&format!("^(?:{source})$")).map_err(|e| {
            ConfigError::InvalidPattern {
                kind: kind.as_str().to_string(),
                pattern: source.clone(),
                message: e.to_string(),
            }
        })?;
        Ok(Self {
            kind,
            source,
            regex,
        })
    }

    /// Kind this rule applies to.
    #[must_use]
    pub fn kind(&self) -> SyntaxKind {
        self.kind
    }

    /// Pattern as written in the configuration.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Whether the whole of `name` matches.
    #[must_use]
    pub fn is_match(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("kind", &self.kind)
            .field("source", &self.source)
            .finish()
    }
}

impl PartialEq for Rule {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.source == other.source
    }
}

impl Eq for Rule {}

/// Mapping from [`SyntaxKind`] to its naming rule.
///
/// Kinds without an entry are never checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleDatabase {
    rules: BTreeMap<SyntaxKind, Rule>,
}

impl RuleDatabase {
    /// Creates a database with no rules.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a database where every known kind accepts any name.
    #[must_use]
    pub fn permissive() -> Self {
        let rules = SyntaxKind::ALL
            .into_iter()
            .filter_map(|kind| Rule::new(kind, MATCH_ANYTHING).ok())
            .map(|rule| (rule.kind, rule))
            .collect();
        Self { rules }
    }

    /// Builds the database from a `[Rules]` table.
    ///
    /// `None` means there is no configuration at all and yields
    /// [`RuleDatabase::permissive`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownKind`] for a key that names no kind and
    /// [`ConfigError::InvalidPattern`] for a malformed pattern.
    pub fn from_table(table: Option<&BTreeMap<String, String>>) -> Result<Self, ConfigError> {
        let Some(table) = table else {
            return Ok(Self::permissive());
        };

        let mut db = Self::new();
        for (name, pattern) in table {
            let kind: SyntaxKind = name.parse().map_err(|_| ConfigError::UnknownKind {
                name: name.clone(),
            })?;
            db.insert(kind, pattern.as_str())?;
        }
        debug!("Loaded {} naming rule(s)", db.len());
        Ok(db)
    }

    /// Adds or replaces the rule for `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPattern`] if the expression is malformed.
    pub fn insert(&mut self, kind: SyntaxKind, pattern: &str) -> Result<(), ConfigError> {
        let rule = Rule::new(kind, pattern)?;
        if self.rules.insert(kind, rule).is_some() {
            debug!("Rule for {kind} defined more than once, keeping the last");
        }
        Ok(())
    }

    /// Rule for `kind`, if one is configured.
    #[must_use]
    pub fn get(&self, kind: SyntaxKind) -> Option<&Rule> {
        self.rules.get(&kind)
    }

    /// Rules in [`SyntaxKind`] order.
    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.values()
    }

    /// Number of configured rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no rule is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
