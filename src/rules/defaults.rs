//! Built-in default rules.

use super::{Rule, RuleSet};
use crate::pattern::{PatternFlags, StripPattern};

/// Rule keys of the built-in default set.
pub mod keys {
    pub const MIN_LENGTH: &str = "minlength";
    pub const CONTAIN_SPECIAL_CHARS: &str = "containSpecialChars";
    pub const CONTAIN_LOWERCASE: &str = "containLowercase";
    pub const CONTAIN_UPPERCASE: &str = "containUppercase";
    pub const CONTAIN_NUMBERS: &str = "containNumbers";
}

const DEFAULT_MIN_LENGTH: usize = 8;

fn global() -> PatternFlags {
    PatternFlags {
        global: true,
        ..PatternFlags::default()
    }
}

/// Returns a fresh copy of the built-in default rule set.
///
/// Five rules, in display order: minimum length (8 characters), at least
/// one special character, one lower case character, one upper case
/// character, one number. Each character-class pattern matches the
/// characters that do NOT count, so stripping leaves only the counted
/// class behind.
///
/// Every call constructs a new value; rule sets built from it never share
/// state with each other.
pub fn default_rules() -> RuleSet {
    RuleSet::from_rules(vec![
        Rule::new(
            keys::MIN_LENGTH,
            "be at least minLength characters long",
            DEFAULT_MIN_LENGTH,
        ),
        Rule::new(
            keys::CONTAIN_SPECIAL_CHARS,
            "Your input should contain at least minLength special character",
            1,
        )
        .with_pattern(StripPattern::with_flags("([^!%&@#$^*?_~])", global())),
        Rule::new(
            keys::CONTAIN_LOWERCASE,
            "Your input should contain at least minLength lower case character",
            1,
        )
        .with_pattern(StripPattern::with_flags("[^a-z]", global())),
        Rule::new(
            keys::CONTAIN_UPPERCASE,
            "Your input should contain at least minLength upper case character",
            1,
        )
        .with_pattern(StripPattern::with_flags("[^A-Z]", global())),
        Rule::new(
            keys::CONTAIN_NUMBERS,
            "Your input should contain at least minLength number",
            1,
        )
        .with_pattern(StripPattern::with_flags("[^0-9]", global())),
    ])
}
