//! Kompres code compactor: per-language comment and whitespace stripping.
//!
//! Passes, always in this order:
//! 1. Comments (language rule table, applied to a fixpoint)
//! 2. Whitespace (single-space collapse, canonical JSON, or blank-line elision)
//! 3. Key minification (fixed table of quoted key names)
//!
//! Comment rules are regular expressions, not a tokenizer: a `//` inside a
//! string literal is stripped like any other comment. Python `#` comments
//! are only removed when they fill the whole line.

pub mod json;
pub mod keys;
pub mod pipeline;
pub mod rules;
pub mod stats;
pub mod stripper;

pub use keys::minify_keys;
pub use pipeline::{CodeCompaction, CodeCompactor};
pub use stats::StatsReporter;
pub use stripper::strip;
