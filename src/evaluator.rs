//! Password requirement evaluator - main evaluation logic.

use secrecy::{ExposeSecret, SecretString};

use crate::pattern::PatternError;
use crate::rules::RuleSet;

/// Per-rule satisfaction outcome for one password evaluation.
///
/// One entry per rule, in rule set order. Carries keys and flags only,
/// never password material, so it is safe to hand to rendering or logging
/// code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationResult {
    entries: Vec<(String, bool)>,
}

impl EvaluationResult {
    /// Whether the rule identified by `key` is satisfied.
    ///
    /// Returns `None` for a key the evaluated rule set does not contain.
    pub fn satisfied(&self, key: &str) -> Option<bool> {
        self.entries
            .iter()
            .find(|(entry_key, _)| entry_key == key)
            .map(|(_, satisfied)| *satisfied)
    }

    /// True when every rule in the set is satisfied.
    pub fn all_satisfied(&self) -> bool {
        self.entries.iter().all(|(_, satisfied)| *satisfied)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.entries
            .iter()
            .map(|(key, satisfied)| (key.as_str(), *satisfied))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Evaluates a password against every rule in the set.
///
/// For a rule with a pattern, characters matching the pattern are
/// stripped and the rule is satisfied when at least `min_length`
/// characters remain. A rule without a pattern checks the raw password
/// length. Lengths count Unicode scalar values, the same units the
/// patterns match on; the password is never normalized.
///
/// Stateless: the same password and rule set always produce the same
/// result. The only retained state is each rule's compiled pattern,
/// cached on first use so per-keystroke evaluation does not recompile.
///
/// # Errors
/// [`PatternError`] when a rule's pattern fails to compile. A malformed
/// rule is reported, never silently skipped.
pub fn evaluate_password_requirements(
    password: &SecretString,
    rules: &RuleSet,
) -> Result<EvaluationResult, PatternError> {
    let pwd = password.expose_secret();

    let mut entries = Vec::with_capacity(rules.len());
    for rule in rules.iter() {
        let remaining = match rule.pattern() {
            Some(pattern) => match pattern.strip(pwd) {
                Ok(stripped) => stripped.chars().count(),
                Err(e) => {
                    #[cfg(feature = "tracing")]
                    tracing::error!("Pattern compilation failed for rule {}: {}", rule.key(), e);
                    return Err(e);
                }
            },
            None => pwd.chars().count(),
        };
        entries.push((rule.key().to_string(), remaining >= rule.min_length()));
    }

    Ok(EvaluationResult { entries })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{RuleOverride, RuleOverrides, build_rule_set, default_rules, keys};

    fn secret(s: &str) -> SecretString {
        SecretString::new(s.to_string().into())
    }

    fn assert_result(result: &EvaluationResult, expected: &[(&str, bool)]) {
        for (key, satisfied) in expected {
            assert_eq!(result.satisfied(key), Some(*satisfied), "rule {}", key);
        }
    }

    #[test]
    fn test_short_lowercase_password() {
        let rules = default_rules();
        let result = evaluate_password_requirements(&secret("abc"), &rules).unwrap();
        assert_result(
            &result,
            &[
                (keys::MIN_LENGTH, false),
                (keys::CONTAIN_LOWERCASE, true),
                (keys::CONTAIN_UPPERCASE, false),
                (keys::CONTAIN_NUMBERS, false),
                (keys::CONTAIN_SPECIAL_CHARS, false),
            ],
        );
    }

    #[test]
    fn test_password_missing_special_chars_only() {
        let rules = default_rules();
        let result = evaluate_password_requirements(&secret("Abcdefg1"), &rules).unwrap();
        assert_result(
            &result,
            &[
                (keys::MIN_LENGTH, true),
                (keys::CONTAIN_LOWERCASE, true),
                (keys::CONTAIN_UPPERCASE, true),
                (keys::CONTAIN_NUMBERS, true),
                (keys::CONTAIN_SPECIAL_CHARS, false),
            ],
        );
        assert!(!result.all_satisfied());
    }

    #[test]
    fn test_password_satisfying_all_rules() {
        let rules = default_rules();
        let result = evaluate_password_requirements(&secret("Abcdefg1!"), &rules).unwrap();
        assert!(result.all_satisfied());
    }

    #[test]
    fn test_empty_password_fails_every_rule() {
        let rules = default_rules();
        let result = evaluate_password_requirements(&secret(""), &rules).unwrap();
        assert_eq!(result.len(), 5);
        assert!(result.iter().all(|(_, satisfied)| !satisfied));
    }

    #[test]
    fn test_results_follow_rule_set_order() {
        let rules = default_rules();
        let result = evaluate_password_requirements(&secret("abc"), &rules).unwrap();

        let result_keys: Vec<&str> = result.iter().map(|(key, _)| key).collect();
        let rule_keys: Vec<&str> = rules.iter().map(|rule| rule.key()).collect();
        assert_eq!(result_keys, rule_keys);
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let rules = default_rules();
        let first = evaluate_password_requirements(&secret("Abcdefg1!"), &rules).unwrap();
        let second = evaluate_password_requirements(&secret("Abcdefg1!"), &rules).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_patternless_rule_checks_raw_length() {
        let rules = default_rules();
        for (password, satisfied) in [("1234567", false), ("12345678", true), ("123456789", true)]
        {
            let result = evaluate_password_requirements(&secret(password), &rules).unwrap();
            assert_eq!(
                result.satisfied(keys::MIN_LENGTH),
                Some(satisfied),
                "password {:?}",
                password
            );
        }
    }

    #[test]
    fn test_zero_threshold_is_trivially_satisfied() {
        let overrides = RuleOverrides::new().with(
            keys::MIN_LENGTH,
            RuleOverride {
                min_length: Some(0),
                ..Default::default()
            },
        );
        let rules = build_rule_set(&default_rules(), &overrides, None).unwrap();

        let result = evaluate_password_requirements(&secret(""), &rules).unwrap();
        assert_eq!(result.satisfied(keys::MIN_LENGTH), Some(true));
    }

    #[test]
    fn test_raised_threshold_counts_stripped_characters() {
        let overrides = RuleOverrides::new().with(
            keys::CONTAIN_NUMBERS,
            RuleOverride {
                min_length: Some(3),
                ..Default::default()
            },
        );
        let rules = build_rule_set(&default_rules(), &overrides, None).unwrap();

        let result = evaluate_password_requirements(&secret("Ab1c2!"), &rules).unwrap();
        assert_eq!(result.satisfied(keys::CONTAIN_NUMBERS), Some(false));

        let result = evaluate_password_requirements(&secret("Ab1c2d3!"), &rules).unwrap();
        assert_eq!(result.satisfied(keys::CONTAIN_NUMBERS), Some(true));
    }

    #[test]
    fn test_multibyte_passwords_count_characters_not_bytes() {
        let rules = default_rules();
        // Eight characters, ten bytes.
        let result = evaluate_password_requirements(&secret("pässwörd"), &rules).unwrap();
        assert_eq!(result.satisfied(keys::MIN_LENGTH), Some(true));
    }

    #[test]
    fn test_malformed_pattern_fails_on_evaluate() {
        let overrides = RuleOverrides::new().with(
            "broken",
            RuleOverride {
                min_length: Some(1),
                pattern: Some("([unclosed".to_string()),
                pattern_flags: Some("g".to_string()),
                ..Default::default()
            },
        );
        let rules = build_rule_set(&default_rules(), &overrides, None).unwrap();

        let result = evaluate_password_requirements(&secret("whatever"), &rules);
        assert!(matches!(result, Err(PatternError::Compile { .. })));
    }

    #[test]
    fn test_missing_key_lookup_returns_none() {
        let rules = default_rules();
        let result = evaluate_password_requirements(&secret("abc"), &rules).unwrap();
        assert_eq!(result.satisfied("nonexistent"), None);
    }
}
