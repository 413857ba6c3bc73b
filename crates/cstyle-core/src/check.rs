//! The check pipeline.
//!
//! Each check looks at one node and the name as seen so far, and either
//! passes a (possibly shortened) name on to the next check or rejects the
//! node with a reason. The first rejection wins.

use crate::config::Config;
use crate::kind::SyntaxKind;
use crate::node::SyntaxNode;
use crate::options::Options;
use crate::rules::RuleDatabase;
use crate::types::CheckKind;

/// Reason reported for a second return statement under `prefer_goto`.
pub const TOO_MANY_RETURNS: &str = "at most one return statement per function when goto is preferred";

/// Reason reported for a goto statement when goto is not preferred.
pub const GOTO_HARMFUL: &str = "goto considered harmful";

/// Outcome of a single check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict<'n> {
    /// The node passes; later checks see this name.
    Valid(&'n str),
    /// The node is rejected.
    Invalid(String),
}

/// Return statements seen since the last function declaration.
///
/// Lives for one traversal of one syntax tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReturnCounter {
    count: usize,
}

impl ReturnCounter {
    /// Returns allowed per function when goto is preferred.
    pub const THRESHOLD: usize = 1;

    /// Creates a counter at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current count.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Whether the count is above [`Self::THRESHOLD`].
    #[must_use]
    pub fn exceeded(&self) -> bool {
        self.count > Self::THRESHOLD
    }

    fn reset(&mut self) {
        self.count = 0;
    }

    fn increment(&mut self) {
        self.count += 1;
    }
}

/// Pointer variables and parameters must start with the configured prefix.
///
/// On success the prefix is stripped so naming rules see the base name.
#[must_use]
pub fn pointer_prefix<'n>(options: &Options, node: &SyntaxNode, name: &'n str) -> Verdict<'n> {
    if options.pointer_prefix.is_empty() || !node.kind.is_variable() {
        return Verdict::Valid(name);
    }

    let depth = node.pointer_depth(options.arrays_are_pointers);
    if depth == 0 {
        return Verdict::Valid(name);
    }

    let required = if options.pointer_prefix_repeat {
        options.pointer_prefix.repeat(depth)
    } else {
        options.pointer_prefix.clone()
    };

    match name.strip_prefix(required.as_str()) {
        Some(rest) => Verdict::Valid(rest),
        None => Verdict::Invalid(format!(
            "\"{name}\" is invalid - expected pointer prefix \"{required}\""
        )),
    }
}

/// With `prefer_goto`, a function may contain only one return statement.
#[must_use]
pub fn goto_preference<'n>(
    options: &Options,
    node: &SyntaxNode,
    name: &'n str,
    returns: &mut ReturnCounter,
) -> Verdict<'n> {
    if !options.prefer_goto {
        return Verdict::Valid(name);
    }

    match node.kind {
        SyntaxKind::FunctionDecl => returns.reset(),
        SyntaxKind::ReturnStmt => {
            returns.increment();
            if returns.exceeded() {
                return Verdict::Invalid(TOO_MANY_RETURNS.to_string());
            }
        }
        _ => {}
    }
    Verdict::Valid(name)
}

/// Without `prefer_goto`, goto statements are rejected outright.
#[must_use]
pub fn goto_harmful<'n>(options: &Options, node: &SyntaxNode, name: &'n str) -> Verdict<'n> {
    if !options.prefer_goto && node.kind == SyntaxKind::GotoStmt {
        Verdict::Invalid(GOTO_HARMFUL.to_string())
    } else {
        Verdict::Valid(name)
    }
}

/// Named entities must fully match the rule for their kind, if any.
#[must_use]
pub fn naming_pattern<'n>(rules: &RuleDatabase, node: &SyntaxNode, name: &'n str) -> Verdict<'n> {
    if name.is_empty() {
        return Verdict::Valid(name);
    }
    match rules.get(node.kind) {
        Some(rule) if !rule.is_match(name) => Verdict::Invalid(format!(
            "\"{name}\" is invalid - failed regexp check \"{}\"",
            rule.source()
        )),
        _ => Verdict::Valid(name),
    }
}

/// Runs one check. Only the goto preference check touches `returns`.
#[must_use]
pub fn apply<'n>(
    check: CheckKind,
    config: &Config,
    node: &SyntaxNode,
    name: &'n str,
    returns: &mut ReturnCounter,
) -> Verdict<'n> {
    match check {
        CheckKind::PointerPrefix => pointer_prefix(&config.options, node, name),
        CheckKind::GotoPreference => goto_preference(&config.options, node, name, returns),
        CheckKind::GotoHarmful => goto_harmful(&config.options, node, name),
        CheckKind::NamingPattern => naming_pattern(&config.rules, node, name),
    }
}

/// Ordered list of checks applied to every local node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
    checks: Vec<CheckKind>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::standard()
    }
}

impl Pipeline {
    /// Pointer prefix, goto preference, goto harmful, naming pattern.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            checks: vec![
                CheckKind::PointerPrefix,
                CheckKind::GotoPreference,
                CheckKind::GotoHarmful,
                CheckKind::NamingPattern,
            ],
        }
    }

    /// A pipeline running exactly `checks`, in the given order.
    #[must_use]
    pub fn with_checks(checks: Vec<CheckKind>) -> Self {
        Self { checks }
    }

    /// Checks in execution order.
    #[must_use]
    pub fn checks(&self) -> &[CheckKind] {
        &self.checks
    }

    /// Runs the checks on `node`, stopping at the first rejection.
    #[must_use]
    pub fn run(
        &self,
        config: &Config,
        node: &SyntaxNode,
        returns: &mut ReturnCounter,
    ) -> Option<(CheckKind, String)> {
        let mut name = node.spelling.as_str();
        for &check in &self.checks {
            match apply(check, config, node, name, returns) {
                Verdict::Valid(next) => name = next,
                Verdict::Invalid(reason) => return Some((check, reason)),
            }
        }
        None
    }
}
