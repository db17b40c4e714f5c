//! Strip patterns - lazy regex compilation and match stripping.

use std::borrow::Cow;

use once_cell::sync::OnceCell;
use regex::{Regex, RegexBuilder};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PatternError {
    #[error("Failed to compile pattern `{pattern}`: {source}")]
    Compile {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("Unknown pattern flag `{flag}`")]
    UnknownFlag { flag: char },
}

/// Modifiers applied when a rule pattern is compiled and matched.
///
/// Parsed from the flag string callers supply alongside a pattern source
/// (`"g"`, `"gi"`, ...). `global` controls whether every match is stripped
/// or only the first; the other flags map onto regex builder options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatternFlags {
    pub global: bool,
    pub case_insensitive: bool,
    pub multi_line: bool,
    pub dot_matches_new_line: bool,
}

impl PatternFlags {
    /// Parses a flag string such as `"g"` or `"gi"`.
    ///
    /// Recognized flags: `g`, `i`, `m`, `s`. `u` is accepted and ignored
    /// since matching is always Unicode-aware. Any other character is a
    /// [`PatternError::UnknownFlag`].
    pub fn parse(flags: &str) -> Result<Self, PatternError> {
        let mut parsed = Self::default();
        for flag in flags.chars() {
            match flag {
                'g' => parsed.global = true,
                'i' => parsed.case_insensitive = true,
                'm' => parsed.multi_line = true,
                's' => parsed.dot_matches_new_line = true,
                'u' => {}
                _ => return Err(PatternError::UnknownFlag { flag }),
            }
        }
        Ok(parsed)
    }
}

/// A pattern identifying the characters that do NOT count toward a rule.
///
/// The source is compiled on first use and the compiled regex is cached
/// for the lifetime of the owning rule, so per-keystroke evaluation never
/// recompiles. Cache population is idempotent; racing evaluations at
/// worst compile the same pattern twice.
#[derive(Debug, Clone)]
pub struct StripPattern {
    source: String,
    flags: PatternFlags,
    compiled: OnceCell<Regex>,
}

impl StripPattern {
    pub fn new(source: impl Into<String>) -> Self {
        Self::with_flags(source, PatternFlags::default())
    }

    pub fn with_flags(source: impl Into<String>, flags: PatternFlags) -> Self {
        Self {
            source: source.into(),
            flags,
            compiled: OnceCell::new(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn flags(&self) -> PatternFlags {
        self.flags
    }

    fn regex(&self) -> Result<&Regex, PatternError> {
        self.compiled.get_or_try_init(|| {
            RegexBuilder::new(&self.source)
                .case_insensitive(self.flags.case_insensitive)
                .multi_line(self.flags.multi_line)
                .dot_matches_new_line(self.flags.dot_matches_new_line)
                .build()
                .map_err(|source| PatternError::Compile {
                    pattern: self.source.clone(),
                    source,
                })
        })
    }

    /// Removes pattern matches from `input`.
    ///
    /// Every match is removed when the `g` flag is set, otherwise only
    /// the first.
    ///
    /// # Errors
    /// [`PatternError::Compile`] if the source fails to compile on first
    /// use.
    pub fn strip<'a>(&self, input: &'a str) -> Result<Cow<'a, str>, PatternError> {
        let regex = self.regex()?;
        let stripped = if self.flags.global {
            regex.replace_all(input, "")
        } else {
            regex.replace(input, "")
        };
        Ok(stripped)
    }
}

// Equality is over source and flags; the compile cache is invisible.
impl PartialEq for StripPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source && self.flags == other.flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let flags = PatternFlags::parse("gi").unwrap();
        assert!(flags.global);
        assert!(flags.case_insensitive);
        assert!(!flags.multi_line);
        assert!(!flags.dot_matches_new_line);
    }

    #[test]
    fn test_parse_empty_flags() {
        assert_eq!(PatternFlags::parse("").unwrap(), PatternFlags::default());
    }

    #[test]
    fn test_parse_unicode_flag_is_accepted() {
        assert_eq!(PatternFlags::parse("u").unwrap(), PatternFlags::default());
    }

    #[test]
    fn test_parse_unknown_flag() {
        let result = PatternFlags::parse("gx");
        assert!(matches!(result, Err(PatternError::UnknownFlag { flag: 'x' })));
    }

    #[test]
    fn test_strip_global_removes_all_matches() {
        let pattern = StripPattern::with_flags("[^0-9]", PatternFlags::parse("g").unwrap());
        assert_eq!(pattern.strip("a1b2c3").unwrap(), "123");
    }

    #[test]
    fn test_strip_without_global_removes_first_match_only() {
        let pattern = StripPattern::new("[^0-9]");
        assert_eq!(pattern.strip("a1b2").unwrap(), "1b2");
    }

    #[test]
    fn test_strip_case_insensitive() {
        let pattern = StripPattern::with_flags("[^a-z]", PatternFlags::parse("gi").unwrap());
        assert_eq!(pattern.strip("AbC12").unwrap(), "AbC");
    }

    #[test]
    fn test_strip_without_match_returns_input() {
        let pattern = StripPattern::with_flags("[^a-z]", PatternFlags::parse("g").unwrap());
        assert_eq!(pattern.strip("lowercase").unwrap(), "lowercase");
    }

    #[test]
    fn test_compile_error_surfaces_on_first_strip() {
        let pattern = StripPattern::new("([unclosed");
        let result = pattern.strip("anything");
        assert!(matches!(result, Err(PatternError::Compile { .. })));
    }

    #[test]
    fn test_compiled_pattern_is_reused_across_strips() {
        let pattern = StripPattern::with_flags("[^a-z]", PatternFlags::parse("g").unwrap());
        assert_eq!(pattern.strip("ab12").unwrap(), "ab");
        assert_eq!(pattern.strip("cd34").unwrap(), "cd");
    }

    #[test]
    fn test_equality_ignores_compile_cache() {
        let warm = StripPattern::with_flags("[^a-z]", PatternFlags::parse("g").unwrap());
        let cold = StripPattern::with_flags("[^a-z]", PatternFlags::parse("g").unwrap());
        warm.strip("abc").unwrap();
        assert_eq!(warm, cold);
    }
}
