//! Rule text rendering - fills the threshold placeholder for display.

use crate::rules::Rule;

const MIN_LENGTH_TOKEN: &str = "minLength";

/// Renders a rule description template for display.
///
/// Replaces the literal `minLength` placeholder with the threshold value.
/// Templates without the placeholder come back unchanged. Rendering is a
/// presentation step; evaluation never reads the rendered text.
pub fn render_rule_text(template: &str, min_length: usize) -> String {
    template.replace(MIN_LENGTH_TOKEN, &min_length.to_string())
}

/// Renders a rule's own template with its own threshold.
pub fn render_rule(rule: &Rule) -> String {
    render_rule_text(rule.text(), rule.min_length())
}
