//! Rule set construction - merges caller overrides over the defaults.

use super::defaults::default_rules;
use super::{ConfigurationError, Rule, RuleSet};
use crate::pattern::{PatternFlags, StripPattern};

/// Partial rule supplied by the caller.
///
/// Absent fields keep the value of the rule being overridden. For a
/// caller-introduced key, an absent `text` renders empty and an absent
/// `min_length` is zero, which is trivially satisfied.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RuleOverride {
    pub text: Option<String>,
    pub min_length: Option<usize>,
    pub pattern: Option<String>,
    pub pattern_flags: Option<String>,
}

/// Ordered mapping from rule key to partial override.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleOverrides {
    entries: Vec<(String, RuleOverride)>,
}

impl RuleOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the override for `key`, replacing any earlier entry in place.
    pub fn set(&mut self, key: impl Into<String>, rule: RuleOverride) -> &mut Self {
        let key = key.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = rule,
            None => self.entries.push((key, rule)),
        }
        self
    }

    /// Chaining variant of [`set`](Self::set).
    pub fn with(mut self, key: impl Into<String>, rule: RuleOverride) -> Self {
        self.set(key, rule);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RuleOverride)> {
        self.entries.iter().map(|(key, rule)| (key.as_str(), rule))
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for RuleOverrides {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct MapVisitor;

        impl<'de> serde::de::Visitor<'de> for MapVisitor {
            type Value = RuleOverrides;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a map of rule overrides keyed by rule name")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: serde::de::MapAccess<'de>,
            {
                let mut overrides = RuleOverrides::new();
                while let Some((key, rule)) = access.next_entry::<String, RuleOverride>()? {
                    overrides.set(key, rule);
                }
                Ok(overrides)
            }
        }

        deserializer.deserialize_map(MapVisitor)
    }
}

/// The recognized configuration shape for one managed input field.
///
/// Mirrors what a UI binding collects: the rule overrides and whether they
/// extend or replace the defaults. UI-only options such as the event
/// trigger or popover placement belong to the binding layer and are not
/// represented here.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RequirementsOptions {
    pub rules: RuleOverrides,
    pub defaults: Option<bool>,
}

impl RequirementsOptions {
    /// Applies the options over the built-in defaults.
    ///
    /// # Errors
    /// See [`build_rule_set`].
    pub fn into_rule_set(self) -> Result<RuleSet, ConfigurationError> {
        build_rule_set(&default_rules(), &self.rules, self.defaults)
    }
}

/// Builds the final rule set from `defaults` and caller `overrides`.
///
/// `use_defaults` is tri-state. `None` or `Some(true)` merges the
/// overrides field by field over the defaults: a key present in both
/// sources keeps every default field the override leaves absent, default
/// key order is preserved, and caller-introduced keys are appended in
/// caller order. `Some(false)` ignores the defaults entirely; the
/// overrides must then describe the whole rule set.
///
/// # Errors
/// [`ConfigurationError::MissingRules`] when defaults are disabled and no
/// overrides are supplied. [`ConfigurationError::Pattern`] when an
/// override carries an unrecognized pattern flag.
pub fn build_rule_set(
    defaults: &RuleSet,
    overrides: &RuleOverrides,
    use_defaults: Option<bool>,
) -> Result<RuleSet, ConfigurationError> {
    if use_defaults.unwrap_or(true) {
        let mut rules: Vec<Rule> = defaults.iter().cloned().collect();
        for (key, partial) in overrides.iter() {
            match rules.iter_mut().find(|rule| rule.key() == key) {
                Some(rule) => apply_override(rule, partial)?,
                None => rules.push(rule_from_override(key, partial)?),
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!("Built rule set with {} rules over defaults", rules.len());

        Ok(RuleSet::from_rules(rules))
    } else {
        if overrides.is_empty() {
            #[cfg(feature = "tracing")]
            tracing::error!("Rule set construction failed: defaults disabled and no rules supplied");
            return Err(ConfigurationError::MissingRules);
        }

        let rules = overrides
            .iter()
            .map(|(key, partial)| rule_from_override(key, partial))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(RuleSet::from_rules(rules))
    }
}

fn apply_override(rule: &mut Rule, partial: &RuleOverride) -> Result<(), ConfigurationError> {
    if let Some(text) = &partial.text {
        rule.text = text.clone();
    }
    if let Some(min_length) = partial.min_length {
        rule.min_length = min_length;
    }
    if partial.pattern.is_some() || partial.pattern_flags.is_some() {
        let source = partial
            .pattern
            .clone()
            .or_else(|| rule.pattern.as_ref().map(|p| p.source().to_string()));
        // Flags without a pattern source anywhere leave the rule patternless.
        if let Some(source) = source {
            let flags = match &partial.pattern_flags {
                Some(flags) => PatternFlags::parse(flags)?,
                None => rule
                    .pattern
                    .as_ref()
                    .map(StripPattern::flags)
                    .unwrap_or_default(),
            };
            rule.pattern = Some(StripPattern::with_flags(source, flags));
        }
    }
    Ok(())
}

fn rule_from_override(key: &str, partial: &RuleOverride) -> Result<Rule, ConfigurationError> {
    let mut rule = Rule::new(
        key,
        partial.text.clone().unwrap_or_default(),
        partial.min_length.unwrap_or(0),
    );
    if let Some(source) = &partial.pattern {
        let flags = match &partial.pattern_flags {
            Some(flags) => PatternFlags::parse(flags)?,
            None => PatternFlags::default(),
        };
        rule = rule.with_pattern(StripPattern::with_flags(source.clone(), flags));
    }
    Ok(rule)
}
