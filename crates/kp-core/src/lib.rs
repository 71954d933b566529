//! Shared vocabulary for Kompres: settings, categories, results and errors.

pub mod classifier;
pub mod config;
pub mod error;
pub mod types;
pub mod units;

pub use classifier::{classify, classify_with_media_type, code_language, extension_of, supported_formats};
pub use config::{CompressionSettings, SettingsOverrides};
pub use error::{KompresError, Result};
pub use types::{
    compression_ratio, CodeLanguage, CompressionReport, FileCategory, FileStats, ReportExtra,
    SupportedFormats,
};
