//! Routes a file to the compressor for its category.

use kp_compactor::StatsReporter;
use kp_core::{classify, CompressionReport, CompressionSettings, FileCategory, FileStats, Result};
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::{CodeFileCompressor, ImageCompressor, ImageTarget, MediaCompressor, VideoCompressor, ZipArchiver};

/// Where a compressed file went and how much it shrank.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchOutcome {
    pub input: PathBuf,
    pub output: PathBuf,
    pub category: FileCategory,
    pub report: CompressionReport,
}

pub struct Dispatcher {
    code: CodeFileCompressor,
    image: ImageCompressor,
    video: VideoCompressor,
    archive: ZipArchiver,
}

impl Dispatcher {
    pub fn new(image_target: ImageTarget) -> Self {
        Self {
            code: CodeFileCompressor::new(),
            image: ImageCompressor::new(image_target),
            video: VideoCompressor::new(),
            archive: ZipArchiver::new(),
        }
    }

    pub fn with_video(mut self, video: VideoCompressor) -> Self {
        self.video = video;
        self
    }

    pub fn compressor_for(&self, category: FileCategory) -> &dyn MediaCompressor {
        match category {
            FileCategory::Code => &self.code,
            FileCategory::Image => &self.image,
            FileCategory::Video => &self.video,
            FileCategory::GenericFile => &self.archive,
        }
    }

    /// Where `input` lands inside `out_dir`.
    pub fn output_path(&self, input: &Path, out_dir: &Path) -> PathBuf {
        let category = classify(&input.to_string_lossy());
        out_dir.join(self.compressor_for(category).output_name(input))
    }

    /// Output paths for a batch, one per input and in the same order.
    ///
    /// Inputs that would land on the same file (`a/x.js`, `b/x.js`) get a
    /// numeric suffix before the extension: `compressed_x-1.js`.
    pub fn output_paths(&self, inputs: &[PathBuf], out_dir: &Path) -> Vec<PathBuf> {
        let mut taken = HashSet::new();
        inputs
            .iter()
            .map(|input| {
                let base = self.output_path(input, out_dir);
                let mut candidate = base.clone();
                let mut n = 1;
                while !taken.insert(candidate.clone()) {
                    candidate = with_suffix(&base, n);
                    n += 1;
                }
                if candidate != base {
                    tracing::warn!(
                        input = %input.display(),
                        output = %candidate.display(),
                        "output name already used in this batch, renaming"
                    );
                }
                candidate
            })
            .collect()
    }

    /// Compress `input` into `out_dir`, creating the directory if needed.
    pub fn compress_path(
        &self,
        input: &Path,
        out_dir: &Path,
        settings: &CompressionSettings,
    ) -> Result<DispatchOutcome> {
        self.compress_to(input, &self.output_path(input, out_dir), settings)
    }

    /// Compress `input` into the exact file `output`, creating its parent.
    pub fn compress_to(
        &self,
        input: &Path,
        output: &Path,
        settings: &CompressionSettings,
    ) -> Result<DispatchOutcome> {
        let category = classify(&input.to_string_lossy());
        let compressor = self.compressor_for(category);
        if let Some(parent) = output.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let report = compressor.compress_file(input, output, settings)?;
        tracing::info!(
            input = %input.display(),
            output = %output.display(),
            %category,
            original = report.original_size,
            compressed = report.compressed_size,
            ratio = report.compression_ratio_percent,
            "compressed"
        );
        Ok(DispatchOutcome {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            category,
            report,
        })
    }

    /// Stats for a file on disk. Code files are read for text counts;
    /// a code file that is not UTF-8 gets sizes only.
    pub fn stats(&self, path: &Path) -> Result<FileStats> {
        let name = path.to_string_lossy();
        let size = std::fs::metadata(path)?.len();
        if classify(&name) != FileCategory::Code {
            return Ok(StatsReporter::file_stats(&name, size, None));
        }
        let content = String::from_utf8(std::fs::read(path)?).ok();
        if content.is_none() {
            tracing::warn!(path = %path.display(), "code file is not valid UTF-8, skipping text counts");
        }
        Ok(StatsReporter::file_stats(&name, size, content.as_deref()))
    }
}

/// `out/compressed_x.js` + 2 -> `out/compressed_x-2.js`
fn with_suffix(path: &Path, n: usize) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{stem}-{n}.{}", ext.to_string_lossy()),
        None => format!("{stem}-{n}"),
    };
    path.with_file_name(name)
}

impl Default for Dispatcher {
    fn default() -> Self { Self::new(ImageTarget::Auto) }
}
