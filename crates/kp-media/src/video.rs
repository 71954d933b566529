//! Video: transcoding is delegated to an external `ffmpeg` process.

use kp_core::{CompressionReport, CompressionSettings, FileCategory, KompresError, ReportExtra, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::traits::{file_stem, MediaCompressor};

const TOOL: &str = "ffmpeg";

/// Constant rate factor for a quality percentage: 100 -> 0, 0 -> 51.
pub fn crf_for_quality(quality: u8) -> u32 {
    let q = quality.min(100) as u32;
    ((100 - q) * 51 + 50) / 100
}

pub struct VideoCompressor {
    program: PathBuf,
}

impl VideoCompressor {
    pub fn new() -> Self {
        Self { program: PathBuf::from(TOOL) }
    }

    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self { program: program.into() }
    }

    /// Arguments passed to ffmpeg, without the program name.
    pub fn command_args(&self, input: &Path, output: &Path, settings: &CompressionSettings) -> Vec<OsString> {
        let scale = format!(
            "scale='min({},iw)':'min({},ih)':force_original_aspect_ratio=decrease:force_divisible_by=2",
            settings.max_width(),
            settings.max_height()
        );
        let mut args: Vec<OsString> = vec![
            "-y".into(),
            "-hide_banner".into(),
            "-loglevel".into(),
            "error".into(),
            "-i".into(),
            input.into(),
            "-vf".into(),
            scale.into(),
            "-r".into(),
            settings.fps().to_string().into(),
            "-crf".into(),
            crf_for_quality(settings.quality()).to_string().into(),
        ];
        if let Some(bitrate) = settings.bitrate() {
            args.push("-b:v".into());
            args.push(bitrate.to_string().into());
        }
        args.push(output.into());
        args
    }

    fn run(&self, args: &[OsString]) -> Result<()> {
        let out = Command::new(&self.program).args(args).output().map_err(|e| {
            KompresError::ExternalTool {
                tool: self.program.display().to_string(),
                message: format!("could not start: {e}"),
            }
        })?;
        if !out.status.success() {
            let stderr = String::from_utf8_lossy(&out.stderr);
            let last = stderr.lines().rev().find(|l| !l.trim().is_empty()).unwrap_or("no output");
            return Err(KompresError::ExternalTool {
                tool: self.program.display().to_string(),
                message: format!("{} ({})", last.trim(), out.status),
            });
        }
        Ok(())
    }
}

impl MediaCompressor for VideoCompressor {
    fn category(&self) -> FileCategory {
        FileCategory::Video
    }

    fn output_name(&self, input: &Path) -> String {
        let ext = input
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_else(|| "mp4".to_string());
        format!("compressed_{}.{}", file_stem(input), ext)
    }

    fn compress_file(
        &self,
        input: &Path,
        output: &Path,
        settings: &CompressionSettings,
    ) -> Result<CompressionReport> {
        let original_size = std::fs::metadata(input)?.len();
        let args = self.command_args(input, output, settings);
        tracing::debug!(program = %self.program.display(), ?args, "running video transcode");
        self.run(&args)?;
        let compressed_size = std::fs::metadata(output)?.len();
        Ok(CompressionReport::new(
            original_size,
            compressed_size,
            ReportExtra::Video {
                quality: settings.quality(),
                fps: settings.fps(),
                bitrate: settings.bitrate(),
            },
        ))
    }
}

impl Default for VideoCompressor {
    fn default() -> Self { Self::new() }
}
