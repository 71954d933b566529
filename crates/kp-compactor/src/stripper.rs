//! Comment and whitespace passes.

use kp_core::{CodeLanguage, CompressionSettings};

use crate::json;
use crate::rules::{rules_for, single_space, Rule, WhitespaceRule};

/// Run the enabled passes for `language`. Comments always go first.
pub fn strip(text: &str, language: CodeLanguage, settings: &CompressionSettings) -> String {
    let mut out = text.to_string();
    if settings.remove_comments() {
        out = remove_comments(&out, language);
    }
    if settings.remove_whitespace() {
        out = collapse_whitespace(&out, language);
    }
    out
}

/// Remove comments until nothing matches.
///
/// Removing one comment can splice two fragments into a new marker
/// (`/` + `/* a */` + `/ b` becomes `// b`); repeating makes the pass idempotent.
/// Every iteration deletes at least one byte, so the loop terminates.
pub fn remove_comments(text: &str, language: CodeLanguage) -> String {
    let rules = rules_for(language).comments;
    let mut out = text.to_string();
    while rules.iter().any(|r| r.is_match(&out)) {
        out = apply_all(&out, rules);
    }
    out
}

pub fn collapse_whitespace(text: &str, language: CodeLanguage) -> String {
    match rules_for(language).whitespace {
        WhitespaceRule::CanonicalJson => match json::canonicalize(text) {
            Some(compact) => compact,
            None => {
                tracing::debug!("json did not parse, collapsing whitespace instead");
                apply_all(text, single_space()).trim().to_string()
            }
        },
        WhitespaceRule::Collapse(rules) => apply_all(text, rules).trim().to_string(),
        WhitespaceRule::LineElision => elide_blank_lines(text),
    }
}

/// Trim every line, drop the empty ones, rejoin with `\n`.
pub fn elide_blank_lines(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn apply_all(text: &str, rules: &[Rule]) -> String {
    rules.iter().fold(text.to_string(), |acc, rule| rule.apply(&acc))
}
