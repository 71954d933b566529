//! Per-language rule tables.
//!
//! Adding a language means adding one [`LanguageRules`] row and one arm in
//! [`rules_for`].

use kp_core::CodeLanguage;
use regex::Regex;
use std::sync::LazyLock;

static RE_BLOCK_COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").unwrap());
static RE_SLASH_COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"//[^\r\n]*").unwrap());
// Whole-line only: `#` after code may sit inside a string literal.
static RE_HASH_COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^[ \t]*#[^\r\n]*").unwrap());
static RE_HTML_COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());
static RE_WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static RE_AROUND_BRACKETS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*([{}\[\]])\s*").unwrap());
static RE_AROUND_CSS_PUNCT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*([{}:;])\s*").unwrap());

/// One pattern-replace step. `replacement` may use `$1` capture references.
#[derive(Clone, Copy)]
pub struct Rule {
    pattern: &'static LazyLock<Regex>,
    replacement: &'static str,
}

impl Rule {
    const fn remove(pattern: &'static LazyLock<Regex>) -> Self {
        Self { pattern, replacement: "" }
    }

    const fn replace(pattern: &'static LazyLock<Regex>, replacement: &'static str) -> Self {
        Self { pattern, replacement }
    }

    pub fn apply(&self, text: &str) -> String {
        self.pattern.replace_all(text, self.replacement).into_owned()
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

/// How the whitespace pass treats a language.
#[derive(Clone, Copy)]
pub enum WhitespaceRule {
    /// Strict parse and compact re-serialize, single-space collapse on failure.
    CanonicalJson,
    /// Apply the rules in order, then trim both ends.
    Collapse(&'static [Rule]),
    /// Trim every line, drop empty lines, join with `\n`.
    LineElision,
}

pub struct LanguageRules {
    pub comments: &'static [Rule],
    pub whitespace: WhitespaceRule,
}

static SINGLE_SPACE: [Rule; 1] = [Rule::replace(&RE_WHITESPACE_RUN, " ")];
static PYTHON_SPACE: [Rule; 2] = [
    Rule::replace(&RE_WHITESPACE_RUN, " "),
    Rule::replace(&RE_AROUND_BRACKETS, "$1"),
];
static CSS_SPACE: [Rule; 2] = [
    Rule::replace(&RE_WHITESPACE_RUN, " "),
    Rule::replace(&RE_AROUND_CSS_PUNCT, "$1"),
];

static C_STYLE_COMMENTS: [Rule; 2] = [Rule::remove(&RE_BLOCK_COMMENT), Rule::remove(&RE_SLASH_COMMENT)];
static HASH_COMMENTS: [Rule; 1] = [Rule::remove(&RE_HASH_COMMENT)];
static BLOCK_COMMENTS: [Rule; 1] = [Rule::remove(&RE_BLOCK_COMMENT)];
static HTML_COMMENTS: [Rule; 1] = [Rule::remove(&RE_HTML_COMMENT)];

static JSON: LanguageRules = LanguageRules { comments: &[], whitespace: WhitespaceRule::CanonicalJson };
static PYTHON: LanguageRules = LanguageRules { comments: &HASH_COMMENTS, whitespace: WhitespaceRule::Collapse(&PYTHON_SPACE) };
static C_STYLE: LanguageRules = LanguageRules { comments: &C_STYLE_COMMENTS, whitespace: WhitespaceRule::Collapse(&SINGLE_SPACE) };
static CSS: LanguageRules = LanguageRules { comments: &BLOCK_COMMENTS, whitespace: WhitespaceRule::Collapse(&CSS_SPACE) };
static HTML: LanguageRules = LanguageRules { comments: &HTML_COMMENTS, whitespace: WhitespaceRule::Collapse(&SINGLE_SPACE) };
static PLAIN_TEXT: LanguageRules = LanguageRules { comments: &[], whitespace: WhitespaceRule::LineElision };

pub fn rules_for(language: CodeLanguage) -> &'static LanguageRules {
    match language {
        CodeLanguage::Json => &JSON,
        CodeLanguage::Python => &PYTHON,
        CodeLanguage::Php | CodeLanguage::JavaScript => &C_STYLE,
        CodeLanguage::Css => &CSS,
        CodeLanguage::Html => &HTML,
        CodeLanguage::PlainText => &PLAIN_TEXT,
    }
}

/// Fallback used when JSON does not parse.
pub fn single_space() -> &'static [Rule] {
    &SINGLE_SPACE
}
