//! Code files: reads UTF-8 text and runs the compactor.

use kp_compactor::CodeCompactor;
use kp_core::{CompressionReport, CompressionSettings, FileCategory, Result};
use std::path::Path;

use crate::traits::{file_name, MediaCompressor};

pub struct CodeFileCompressor;

impl CodeFileCompressor {
    pub fn new() -> Self { Self }
}

impl MediaCompressor for CodeFileCompressor {
    fn category(&self) -> FileCategory {
        FileCategory::Code
    }

    fn output_name(&self, input: &Path) -> String {
        format!("compressed_{}", file_name(input))
    }

    fn compress_file(
        &self,
        input: &Path,
        output: &Path,
        settings: &CompressionSettings,
    ) -> Result<CompressionReport> {
        let text = std::fs::read_to_string(input)?;
        let compaction = CodeCompactor::new(*settings).compress(&text, &input.to_string_lossy())?;
        std::fs::write(output, &compaction.output)?;
        Ok(compaction.report)
    }
}

impl Default for CodeFileCompressor {
    fn default() -> Self { Self::new() }
}
