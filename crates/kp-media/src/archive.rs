//! Generic files: packed into a DEFLATE ZIP archive.

use kp_core::{CompressionReport, CompressionSettings, FileCategory, KompresError, ReportExtra, Result};
use serde::Serialize;
use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};
use zip::result::ZipError;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::traits::{file_name, MediaCompressor};

/// One archive member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveEntry {
    pub name: String,
    pub size: u64,
}

fn zip_err(e: ZipError) -> KompresError {
    KompresError::Codec(e.to_string())
}

pub struct ZipArchiver;

impl ZipArchiver {
    pub fn new() -> Self { Self }

    /// A single-entry archive holding `data` under `name`.
    pub fn pack(&self, name: &str, data: &[u8]) -> Result<Vec<u8>> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
        writer.start_file(name, options).map_err(zip_err)?;
        writer.write_all(data)?;
        let cursor = writer.finish().map_err(zip_err)?;
        Ok(cursor.into_inner())
    }

    /// Member names and uncompressed sizes.
    pub fn list(&self, data: &[u8]) -> Result<Vec<ArchiveEntry>> {
        let mut archive = ZipArchive::new(Cursor::new(data)).map_err(zip_err)?;
        let mut entries = Vec::with_capacity(archive.len());
        for i in 0..archive.len() {
            let file = archive.by_index(i).map_err(zip_err)?;
            if file.is_dir() {
                continue;
            }
            entries.push(ArchiveEntry { name: file.name().to_string(), size: file.size() });
        }
        Ok(entries)
    }

    /// Read one member fully into memory.
    pub fn read_entry(&self, data: &[u8], name: &str) -> Result<Vec<u8>> {
        let mut archive = ZipArchive::new(Cursor::new(data)).map_err(zip_err)?;
        let mut file = archive.by_name(name).map_err(zip_err)?;
        let mut buf = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut buf)?;
        Ok(buf)
    }

    /// Extract every member of `archive` under `out_dir`.
    ///
    /// Members whose path would land outside `out_dir` abort the extraction.
    pub fn unpack(&self, archive: &Path, out_dir: &Path) -> Result<Vec<ArchiveEntry>> {
        let data = std::fs::read(archive)?;
        let mut zip = ZipArchive::new(Cursor::new(data)).map_err(zip_err)?;
        std::fs::create_dir_all(out_dir)?;

        let mut entries = Vec::new();
        for i in 0..zip.len() {
            let mut file = zip.by_index(i).map_err(zip_err)?;
            let relative: PathBuf = match file.enclosed_name() {
                Some(p) => p.to_path_buf(),
                None => {
                    tracing::warn!(entry = file.name(), "refusing archive entry outside output directory");
                    return Err(KompresError::Codec(format!(
                        "archive entry {:?} escapes the output directory",
                        file.name()
                    )));
                }
            };
            let target = out_dir.join(&relative);
            if file.is_dir() {
                std::fs::create_dir_all(&target)?;
                continue;
            }
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let mut out = std::fs::File::create(&target)?;
            std::io::copy(&mut file, &mut out)?;
            entries.push(ArchiveEntry { name: file.name().to_string(), size: file.size() });
        }
        Ok(entries)
    }
}

impl MediaCompressor for ZipArchiver {
    fn category(&self) -> FileCategory {
        FileCategory::GenericFile
    }

    fn output_name(&self, input: &Path) -> String {
        format!("{}.zip", file_name(input))
    }

    fn compress_file(
        &self,
        input: &Path,
        output: &Path,
        _settings: &CompressionSettings,
    ) -> Result<CompressionReport> {
        let data = std::fs::read(input)?;
        let packed = self.pack(&file_name(input), &data)?;
        std::fs::write(output, &packed)?;
        Ok(CompressionReport::new(
            data.len() as u64,
            packed.len() as u64,
            ReportExtra::Archive { entries: 1 },
        ))
    }
}

impl Default for ZipArchiver {
    fn default() -> Self { Self::new() }
}
