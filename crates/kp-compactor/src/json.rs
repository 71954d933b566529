//! Canonical JSON: strict parse, compact re-serialize, key order kept.

use serde_json::Value;

/// Compact form of `text`, or `None` when it is not valid JSON.
pub fn canonicalize(text: &str) -> Option<String> {
    let value: Value = serde_json::from_str(text).ok()?;
    serde_json::to_string(&value).ok()
}
