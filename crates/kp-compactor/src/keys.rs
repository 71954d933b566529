//! Key minification: rewrite well-known quoted key names to one letter.
//!
//! The replacement is literal: a string *value* equal to one of these
//! tokens (`"title"` in `{"kind": "title"}`) is rewritten too. There is no
//! JSON-structural awareness.

/// Fixed alias table, applied in order.
pub const KEY_ALIASES: &[(&str, &str)] = &[
    ("\"name\"", "\"n\""),
    ("\"description\"", "\"d\""),
    ("\"title\"", "\"t\""),
    ("\"content\"", "\"c\""),
    ("\"value\"", "\"v\""),
];

pub fn minify_keys(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    KEY_ALIASES
        .iter()
        .fold(text.to_string(), |acc, (long, short)| acc.replace(long, short))
}
