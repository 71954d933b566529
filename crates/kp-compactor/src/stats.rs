//! Before/after statistics.

use kp_core::{classify, extension_of, CompressionReport, FileCategory, FileStats, ReportExtra};

/// Computes sizes, ratios and text counts. Nothing is cached between calls.
pub struct StatsReporter;

impl StatsReporter {
    /// Number of `\n`-separated lines. An empty text still has one line.
    pub fn count_lines(text: &str) -> usize {
        text.split('\n').count()
    }

    /// Whitespace-separated words; leading or trailing whitespace adds nothing.
    pub fn count_words(text: &str) -> usize {
        text.split_whitespace().count()
    }

    pub fn count_chars(text: &str) -> usize {
        text.chars().count()
    }

    /// Report for a code transform, from UTF-8 byte lengths.
    pub fn code_report(original: &str, compressed: &str) -> CompressionReport {
        let original_size = original.len() as u64;
        let compressed_size = compressed.len() as u64;
        CompressionReport::new(
            original_size,
            compressed_size,
            ReportExtra::Code {
                characters_removed: original_size as i64 - compressed_size as i64,
            },
        )
    }

    /// Stats for `path`. Text counts are filled only for code with content.
    pub fn file_stats(path: &str, size_bytes: u64, content: Option<&str>) -> FileStats {
        let category = classify(path);
        let counts = match (category, content) {
            (FileCategory::Code, Some(text)) => Some((
                Self::count_lines(text),
                Self::count_chars(text),
                Self::count_words(text),
            )),
            _ => None,
        };
        FileStats {
            path: path.to_string(),
            size_bytes,
            category,
            extension: extension_of(path),
            can_compress: category.can_compress(),
            line_count: counts.map(|c| c.0),
            character_count: counts.map(|c| c.1),
            word_count: counts.map(|c| c.2),
        }
    }
}
