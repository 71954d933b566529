use thiserror::Error;

use crate::types::FileCategory;

#[derive(Error, Debug)]
pub enum KompresError {
    /// A code-only operation was asked to handle a non-code file.
    #[error("format not supported for compression: {filename} is {category}, {operation} only handles code")]
    UnsupportedCategory {
        filename: String,
        category: FileCategory,
        operation: &'static str,
    },
    #[error("Invalid setting {field}: {reason}")]
    InvalidSettings { field: &'static str, reason: String },
    #[error("Codec error: {0}")]
    Codec(String),
    #[error("{tool} failed: {message}")]
    ExternalTool { tool: String, message: String },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl KompresError {
    pub fn unsupported(filename: impl Into<String>, category: FileCategory, operation: &'static str) -> Self {
        Self::UnsupportedCategory {
            filename: filename.into(),
            category,
            operation,
        }
    }

    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidSettings { field, reason: reason.into() }
    }

    /// Whether the caller can recover by routing the input elsewhere.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::UnsupportedCategory { .. })
    }
}

pub type Result<T> = std::result::Result<T, KompresError>;
