//! Collaborator adapters for Kompres.
//!
//! The code path runs the compactor. Images go through the `image` codec,
//! video through an external `ffmpeg`, anything else into a ZIP archive.
//! All of them answer with the same [`kp_core::CompressionReport`].

pub mod archive;
pub mod code;
pub mod dispatch;
pub mod raster;
pub mod traits;
pub mod video;

pub use archive::{ArchiveEntry, ZipArchiver};
pub use code::CodeFileCompressor;
pub use dispatch::{DispatchOutcome, Dispatcher};
pub use raster::{ImageCompressor, ImageTarget};
pub use traits::MediaCompressor;
pub use video::VideoCompressor;

#[cfg(test)]
mod tests;
