use serde::{Deserialize, Serialize};
use std::fmt;

/// Top-level classification of an input artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    Image,
    Video,
    Code,
    #[serde(rename = "file")]
    GenericFile,
}

impl FileCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::Code => "code",
            Self::GenericFile => "file",
        }
    }

    /// Generic files have no format-aware transform.
    pub fn can_compress(&self) -> bool {
        !matches!(self, Self::GenericFile)
    }
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Language tag of a code file. Selects the stripper rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeLanguage {
    Json,
    Python,
    Php,
    JavaScript,
    Css,
    Html,
    PlainText,
}

impl CodeLanguage {
    pub const ALL: [CodeLanguage; 7] = [
        Self::Json,
        Self::Python,
        Self::Php,
        Self::JavaScript,
        Self::Css,
        Self::Html,
        Self::PlainText,
    ];

    /// Human-readable name.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Python => "Python",
            Self::Php => "PHP",
            Self::JavaScript => "JavaScript",
            Self::Css => "CSS",
            Self::Html => "HTML",
            Self::PlainText => "Text",
        }
    }
}

impl fmt::Display for CodeLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Percentage reduction, `0.0` for empty input. Negative when the output grew.
pub fn compression_ratio(original_size: u64, compressed_size: u64) -> f64 {
    if original_size == 0 {
        return 0.0;
    }
    (original_size as f64 - compressed_size as f64) / original_size as f64 * 100.0
}

/// Category-specific fields of a compression report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ReportExtra {
    Code {
        #[serde(rename = "charactersRemoved")]
        characters_removed: i64,
    },
    Image {
        quality: u8,
    },
    Video {
        quality: u8,
        fps: u32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        bitrate: Option<u32>,
    },
    Archive {
        entries: usize,
    },
}

/// Uniform before/after report shared by the engine and every collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompressionReport {
    pub original_size: u64,
    pub compressed_size: u64,
    pub compression_ratio_percent: f64,
    pub extra: ReportExtra,
}

impl CompressionReport {
    pub fn new(original_size: u64, compressed_size: u64, extra: ReportExtra) -> Self {
        Self {
            original_size,
            compressed_size,
            compression_ratio_percent: compression_ratio(original_size, compressed_size),
            extra,
        }
    }

    /// Signed byte delta. Negative when a transform expanded the input.
    pub fn bytes_saved(&self) -> i64 {
        self.original_size as i64 - self.compressed_size as i64
    }
}

/// Read-only view of a file before compression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileStats {
    pub path: String,
    pub size_bytes: u64,
    pub category: FileCategory,
    pub extension: String,
    pub can_compress: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub character_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_count: Option<usize>,
}

/// Extension tables, as exposed to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SupportedFormats {
    pub images: Vec<&'static str>,
    pub videos: Vec<&'static str>,
    pub code: Vec<&'static str>,
}
