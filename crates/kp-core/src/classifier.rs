//! Extension-based format classification.
//!
//! Classification looks at the file name only. No content sniffing, no state.

use crate::types::{CodeLanguage, FileCategory, SupportedFormats};

pub const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".webp", ".gif"];
pub const VIDEO_EXTENSIONS: &[&str] = &[".mp4", ".webm", ".avi", ".mov"];

/// Code extensions and the language each one maps to.
const CODE_TABLE: &[(&str, CodeLanguage)] = &[
    (".json", CodeLanguage::Json),
    (".py", CodeLanguage::Python),
    (".php", CodeLanguage::Php),
    (".js", CodeLanguage::JavaScript),
    (".css", CodeLanguage::Css),
    (".html", CodeLanguage::Html),
    (".htm", CodeLanguage::Html),
    (".xml", CodeLanguage::PlainText),
    (".txt", CodeLanguage::PlainText),
    (".md", CodeLanguage::PlainText),
];

/// Lowercased extension including the leading dot, or `""` when there is none.
///
/// Only the last path component is inspected, so `dir.v2/README` has no extension.
pub fn extension_of(filename: &str) -> String {
    let name = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    match name.rsplit_once('.') {
        Some((_, ext)) => format!(".{}", ext.to_lowercase()),
        None => String::new(),
    }
}

pub fn classify(filename: &str) -> FileCategory {
    let ext = extension_of(filename);
    let ext = ext.as_str();
    if IMAGE_EXTENSIONS.contains(&ext) {
        FileCategory::Image
    } else if VIDEO_EXTENSIONS.contains(&ext) {
        FileCategory::Video
    } else if CODE_TABLE.iter().any(|(e, _)| *e == ext) {
        FileCategory::Code
    } else {
        FileCategory::GenericFile
    }
}

/// Classify using a declared media type first (`image/png`, `video/mp4`),
/// then the extension.
pub fn classify_with_media_type(filename: &str, media_type: Option<&str>) -> FileCategory {
    let declared = media_type.map(|m| m.trim().to_ascii_lowercase());
    match declared.as_deref() {
        Some(m) if m.starts_with("image/") => FileCategory::Image,
        Some(m) if m.starts_with("video/") => FileCategory::Video,
        _ => classify(filename),
    }
}

/// Language for a code file. Non-code names fall back to plain text.
pub fn code_language(filename: &str) -> CodeLanguage {
    let ext = extension_of(filename);
    CODE_TABLE
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, lang)| *lang)
        .unwrap_or(CodeLanguage::PlainText)
}

pub fn supported_formats() -> SupportedFormats {
    SupportedFormats {
        images: IMAGE_EXTENSIONS.to_vec(),
        videos: VIDEO_EXTENSIONS.to_vec(),
        code: CODE_TABLE.iter().map(|(e, _)| *e).collect(),
    }
}
