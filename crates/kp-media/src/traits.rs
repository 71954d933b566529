use kp_core::{classify, CompressionReport, CompressionSettings, FileCategory, Result};
use std::path::Path;

/// A format-specific compressor working on files.
pub trait MediaCompressor: Send + Sync {
    /// Category this compressor handles.
    fn category(&self) -> FileCategory;

    /// File name to write the result under, derived from the input path.
    fn output_name(&self, input: &Path) -> String;

    /// Compress `input` into `output` and report sizes.
    fn compress_file(
        &self,
        input: &Path,
        output: &Path,
        settings: &CompressionSettings,
    ) -> Result<CompressionReport>;

    /// Check if a file belongs to this compressor.
    fn can_handle(&self, path: &Path) -> bool {
        classify(&path.to_string_lossy()) == self.category()
    }
}

/// `photo.PNG` -> `photo`; falls back to `output` for odd paths.
pub(crate) fn file_stem(input: &Path) -> String {
    input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string())
}

pub(crate) fn file_name(input: &Path) -> String {
    input
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string())
}
