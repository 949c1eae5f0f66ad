//! Image loading for the analysis pipeline
//!
//! Decodes files or in-memory buffers with the `image` crate and converts
//! them to 8-bit RGB. Any failure to read or decode is reported as
//! [`AnalysisError::InputUnavailable`].

use image::{ImageReader, RgbImage};
use std::io::Cursor;
use std::path::Path;

use crate::error::{AnalysisError, Result};

/// Image formats accepted by directory scans
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Gif,
    WebP,
    Tiff,
    Bmp,
    Pnm,
}

impl ImageFormat {
    /// Detect format from a bare extension, case-insensitively
    pub fn from_extension(ext: &str) -> Option<ImageFormat> {
        match ext.to_lowercase().as_str() {
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "png" => Some(ImageFormat::Png),
            "gif" => Some(ImageFormat::Gif),
            "webp" => Some(ImageFormat::WebP),
            "tiff" | "tif" => Some(ImageFormat::Tiff),
            "bmp" => Some(ImageFormat::Bmp),
            "pbm" | "pgm" | "ppm" | "pnm" => Some(ImageFormat::Pnm),
            _ => None,
        }
    }

    /// Detect format from a file path's extension
    pub fn from_path(path: &Path) -> Option<ImageFormat> {
        Self::from_extension(path.extension()?.to_str()?)
    }
}

/// Load an image from disk as RGB
///
/// The format is sniffed from the file contents, so the extension does not
/// have to match.
///
/// # Errors
///
/// Returns `AnalysisError::InputUnavailable` if the file cannot be opened or
/// decoded.
pub fn load_image(path: &Path) -> Result<RgbImage> {
    let reader = ImageReader::open(path)
        .map_err(|e| {
            AnalysisError::input_unavailable(format!("Failed to open image file: {}", path.display()), e)
        })?
        .with_guessed_format()
        .map_err(|e| {
            AnalysisError::input_unavailable(format!("Failed to read image file: {}", path.display()), e)
        })?;

    let img = reader.decode().map_err(|e| {
        AnalysisError::input_unavailable(format!("Failed to decode image: {}", path.display()), e)
    })?;

    Ok(img.to_rgb8())
}

/// Decode an in-memory encoded image as RGB
pub fn load_image_from_bytes(bytes: &[u8]) -> Result<RgbImage> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| AnalysisError::input_unavailable("Failed to read image buffer", e))?;

    let img = reader
        .decode()
        .map_err(|e| AnalysisError::input_unavailable("Failed to decode image buffer", e))?;

    Ok(img.to_rgb8())
}

/// Check if a file extension is supported
pub fn is_supported_extension(ext: &str) -> bool {
    ImageFormat::from_extension(ext).is_some()
}

/// Check if a path names a supported image file by extension
pub fn is_supported_path(path: &Path) -> bool {
    ImageFormat::from_path(path).is_some()
}
