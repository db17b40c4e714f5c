//! Password requirement rules
//!
//! A rule names one requirement: a threshold plus an optional pattern
//! matching the characters that do not count toward it. A rule set is the
//! ordered collection evaluated together for one input field.

mod defaults;
mod merge;

pub use defaults::{default_rules, keys};
pub use merge::{RequirementsOptions, RuleOverride, RuleOverrides, build_rule_set};

use thiserror::Error;

use crate::pattern::{PatternError, StripPattern};

/// Errors from rule set construction.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("No rules supplied: overrides must provide a complete rule set when defaults are disabled")]
    MissingRules,
    #[error(transparent)]
    Pattern(#[from] PatternError),
}

/// A single named strength requirement.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    key: String,
    text: String,
    min_length: usize,
    pattern: Option<StripPattern>,
}

impl Rule {
    /// Creates a rule with no pattern: a raw length check against
    /// `min_length`.
    pub fn new(key: impl Into<String>, text: impl Into<String>, min_length: usize) -> Self {
        Self {
            key: key.into(),
            text: text.into(),
            min_length,
            pattern: None,
        }
    }

    /// Attaches the pattern matching characters that do not count toward
    /// the rule.
    pub fn with_pattern(mut self, pattern: StripPattern) -> Self {
        self.pattern = Some(pattern);
        self
    }

    /// Stable lookup token for this rule within its set.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Description template; contains the literal `minLength` placeholder.
    /// Render with [`render_rule_text`](crate::render_rule_text) before
    /// display.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn min_length(&self) -> usize {
        self.min_length
    }

    pub fn pattern(&self) -> Option<&StripPattern> {
        self.pattern.as_ref()
    }
}

/// The complete, ordered collection of rules evaluated together.
///
/// Immutable once built; to change it, rebuild with
/// [`build_rule_set`]. Insertion order is preserved and determines the
/// display order for callers that enumerate rules. Each rule set owns its
/// rules' compiled-pattern caches exclusively.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub(crate) fn from_rules(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn get(&self, key: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.key == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
