//! Password requirement evaluation library
//!
//! This library evaluates a password against a configurable set of named
//! requirement rules (minimum length, special characters, lower case,
//! upper case, numbers) and reports, per rule, whether it is currently
//! satisfied. Caller-supplied overrides merge over built-in defaults, and
//! each rule strips the characters that do not count toward it before
//! comparing what remains against its threshold.
//!
//! The crate is the evaluation engine only: attaching it to an input
//! field and rendering per-rule state is left to the caller, which feeds
//! every password change through [`evaluate_password_requirements`] and
//! renders the returned [`EvaluationResult`].
//!
//! # Features
//!
//! - `serde`: Enables deserialization of [`RequirementsOptions`] and the
//!   override types from caller configuration
//! - `tracing`: Enables logging via tracing crate
//!
//! # Example
//!
//! ```rust
//! use pwd_requirements::{
//!     RuleOverride, RuleOverrides, build_rule_set, default_rules,
//!     evaluate_password_requirements,
//! };
//! use secrecy::SecretString;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Require 10 characters instead of the default 8
//! let overrides = RuleOverrides::new().with(
//!     "minlength",
//!     RuleOverride { min_length: Some(10), ..Default::default() },
//! );
//! let rules = build_rule_set(&default_rules(), &overrides, None)?;
//!
//! // Once per password-change event
//! let password = SecretString::new("Sup3r$ecret!".to_string().into());
//! let result = evaluate_password_requirements(&password, &rules)?;
//! assert!(result.all_satisfied());
//! # Ok(())
//! # }
//! ```

// Internal modules
mod evaluator;
mod pattern;
mod rules;
mod template;

// Public API
pub use evaluator::{EvaluationResult, evaluate_password_requirements};
pub use pattern::{PatternError, PatternFlags, StripPattern};
pub use rules::{
    ConfigurationError, RequirementsOptions, Rule, RuleOverride, RuleOverrides, RuleSet,
    build_rule_set, default_rules, keys,
};
pub use template::{render_rule, render_rule_text};
