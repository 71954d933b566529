//! Raster images: downscale to the configured bounds and re-encode.

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageFormat, ImageOutputFormat};
use kp_core::{CompressionReport, CompressionSettings, FileCategory, KompresError, ReportExtra, Result};
use std::io::Cursor;
use std::path::Path;
use std::str::FromStr;

use crate::traits::{file_stem, MediaCompressor};

/// Output encoding for images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageTarget {
    /// PNG stays PNG, everything else becomes JPEG.
    #[default]
    Auto,
    Jpeg,
    Png,
}

impl ImageTarget {
    fn resolve(self, input_is_png: bool) -> ImageTarget {
        match self {
            Self::Auto if input_is_png => Self::Png,
            Self::Auto => Self::Jpeg,
            other => other,
        }
    }

    fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            _ => "jpg",
        }
    }
}

impl FromStr for ImageTarget {
    type Err = KompresError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "jpeg" | "jpg" => Ok(Self::Jpeg),
            "png" => Ok(Self::Png),
            other => Err(KompresError::invalid("format", format!("unknown image format {other:?}"))),
        }
    }
}

/// Largest size that fits in `max_w` x `max_h` keeping the aspect ratio.
/// Never upscales.
pub fn fit_within(width: u32, height: u32, max_w: u32, max_h: u32) -> (u32, u32) {
    if width <= max_w && height <= max_h {
        return (width, height);
    }
    let scale = f64::min(max_w as f64 / width as f64, max_h as f64 / height as f64);
    let w = ((width as f64 * scale).round() as u32).clamp(1, max_w);
    let h = ((height as f64 * scale).round() as u32).clamp(1, max_h);
    (w, h)
}

pub struct ImageCompressor {
    target: ImageTarget,
}

impl ImageCompressor {
    pub fn new(target: ImageTarget) -> Self {
        Self { target }
    }

    /// Re-encode in-memory image data. `Auto` sniffs the input format.
    pub fn compress_bytes(&self, data: &[u8], settings: &CompressionSettings) -> Result<Vec<u8>> {
        let is_png = matches!(image::guess_format(data), Ok(ImageFormat::Png));
        self.encode(data, settings, self.target.resolve(is_png))
    }

    fn encode(&self, data: &[u8], settings: &CompressionSettings, target: ImageTarget) -> Result<Vec<u8>> {
        let img = image::load_from_memory(data).map_err(|e| KompresError::Codec(e.to_string()))?;
        let (width, height) = img.dimensions();
        let (w, h) = fit_within(width, height, settings.max_width(), settings.max_height());
        let img = if (w, h) != (width, height) {
            tracing::debug!(width, height, w, h, "downscaling image");
            img.resize_exact(w, h, FilterType::Lanczos3)
        } else {
            img
        };

        let mut buf = Cursor::new(Vec::new());
        let written = match target {
            ImageTarget::Png => img.write_to(&mut buf, ImageOutputFormat::Png),
            _ => DynamicImage::ImageRgb8(img.to_rgb8())
                .write_to(&mut buf, ImageOutputFormat::Jpeg(settings.quality().max(1))),
        };
        written.map_err(|e| KompresError::Codec(e.to_string()))?;
        Ok(buf.into_inner())
    }

    fn target_for(&self, input: &Path) -> ImageTarget {
        let is_png = input
            .extension()
            .is_some_and(|e| e.eq_ignore_ascii_case("png"));
        self.target.resolve(is_png)
    }
}

impl MediaCompressor for ImageCompressor {
    fn category(&self) -> FileCategory {
        FileCategory::Image
    }

    fn output_name(&self, input: &Path) -> String {
        format!("compressed_{}.{}", file_stem(input), self.target_for(input).extension())
    }

    fn compress_file(
        &self,
        input: &Path,
        output: &Path,
        settings: &CompressionSettings,
    ) -> Result<CompressionReport> {
        let data = std::fs::read(input)?;
        let encoded = self.encode(&data, settings, self.target_for(input))?;
        std::fs::write(output, &encoded)?;
        Ok(CompressionReport::new(
            data.len() as u64,
            encoded.len() as u64,
            ReportExtra::Image { quality: settings.quality() },
        ))
    }
}

impl Default for ImageCompressor {
    fn default() -> Self { Self::new(ImageTarget::Auto) }
}
