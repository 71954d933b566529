//! Compaction pipeline: classifies, strips, minifies and reports.

use kp_core::{
    classify, code_language, CodeLanguage, CompressionReport, CompressionSettings, FileCategory,
    FileStats, KompresError, Result,
};

use serde::Serialize;

use crate::keys;
use crate::stats::StatsReporter;
use crate::stripper;

const OPERATION: &str = "code compaction";

/// Compaction output with statistics.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeCompaction {
    pub output: String,
    pub language: CodeLanguage,
    pub report: CompressionReport,
    pub passes_applied: Vec<String>,
}

impl CodeCompaction {
    pub fn characters_removed(&self) -> i64 {
        self.report.bytes_saved()
    }
}

/// The code-compaction engine. Holds only its settings, so one value can be
/// shared across threads.
#[derive(Debug, Clone, Default)]
pub struct CodeCompactor {
    settings: CompressionSettings,
}

impl CodeCompactor {
    pub fn new(settings: CompressionSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &CompressionSettings {
        &self.settings
    }

    /// Compact `text`, choosing the language from `filename`.
    ///
    /// Fails with `UnsupportedCategory` when `filename` is not a code file.
    pub fn compress(&self, text: &str, filename: &str) -> Result<CodeCompaction> {
        let category = classify(filename);
        if category != FileCategory::Code {
            return Err(KompresError::unsupported(filename, category, OPERATION));
        }
        let result = self.compress_as(text, code_language(filename));
        tracing::debug!(
            filename,
            language = %result.language,
            original = result.report.original_size,
            compressed = result.report.compressed_size,
            ratio = result.report.compression_ratio_percent,
            "code compacted"
        );
        Ok(result)
    }

    /// Compact `text` as `language`, skipping classification.
    pub fn compress_as(&self, text: &str, language: CodeLanguage) -> CodeCompaction {
        let mut result = text.to_string();
        let mut passes = Vec::new();

        if self.settings.remove_comments() {
            result = stripper::remove_comments(&result, language);
            passes.push("comments".into());
        }

        if self.settings.remove_whitespace() {
            result = stripper::collapse_whitespace(&result, language);
            passes.push("whitespace".into());
        }

        if self.settings.minify_keys() {
            result = keys::minify_keys(&result);
            passes.push("keys".into());
        }

        let report = StatsReporter::code_report(text, &result);
        CodeCompaction {
            output: result,
            language,
            report,
            passes_applied: passes,
        }
    }

    /// Stats from a size alone; text counts stay empty.
    pub fn stats(&self, size_bytes: u64, filename: &str) -> FileStats {
        StatsReporter::file_stats(filename, size_bytes, None)
    }

    /// Stats including line, character and word counts for code files.
    pub fn stats_with_content(&self, content: &str, filename: &str) -> FileStats {
        StatsReporter::file_stats(filename, content.len() as u64, Some(content))
    }
}
