//! File naming, avatar resizing, and format conversion.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};

use crate::error::AppError;
use crate::ports::Image;

/// Output formats the avatar can be saved as.
pub const SUPPORTED_FORMATS: &[&str] = &["jpeg", "png", "webp"];

/// Validate a requested output format.
///
/// # Errors
///
/// Returns an error if the format is not one of [`SUPPORTED_FORMATS`].
pub fn validate_format(format: &str) -> Result<(), String> {
    if SUPPORTED_FORMATS.contains(&format) {
        Ok(())
    } else {
        Err(format!("Unsupported format '{format}'. Valid: {}", SUPPORTED_FORMATS.join(", ")))
    }
}

/// File extension for an output format.
#[must_use]
pub fn format_extension(format: &str) -> &str {
    match format {
        "jpeg" => "jpg",
        other => other,
    }
}

/// Generate an output filename: `avatar-<unix timestamp>.<ext>`.
#[must_use]
pub fn auto_filename(format: &str) -> String {
    let timestamp = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_secs();
    format!("avatar-{timestamp}.{}", format_extension(format))
}

/// Resolve the output path: use explicit path or auto-generate.
#[must_use]
pub fn resolve_output_path(explicit: Option<&str>, format: &str) -> PathBuf {
    match explicit {
        Some(p) => PathBuf::from(p),
        None => PathBuf::from(auto_filename(format)),
    }
}

/// Path for the `index`-th (1-based) of `total` avatars.
///
/// A single avatar keeps `base` unchanged; otherwise `-<index>` goes before
/// the extension.
#[must_use]
pub fn numbered_path(base: &Path, index: usize, total: usize) -> PathBuf {
    if total <= 1 {
        return base.to_path_buf();
    }
    let stem = base.file_stem().unwrap_or_default().to_string_lossy();
    match base.extension() {
        Some(ext) => base.with_file_name(format!("{stem}-{index}.{}", ext.to_string_lossy())),
        None => base.with_file_name(format!("{stem}-{index}")),
    }
}

/// Save `image` as a square `size`×`size` avatar in `format`.
///
/// The image is center-cropped to fill the square. A `size` of 0 keeps the
/// original dimensions, and the bytes are copied as-is when the format
/// already matches.
///
/// # Errors
///
/// Returns an error if the file cannot be written or conversion fails.
pub fn save_avatar(image: &Image, size: u32, format: &str, output_path: &Path) -> Result<(), AppError> {
    if size == 0 && mime_matches_format(&image.mime_type, format) {
        return std::fs::write(output_path, &image.data).map_err(AppError::Io);
    }

    let decoded = image::load_from_memory(&image.data)
        .map_err(|e| AppError::ImageConversion(format!("Failed to decode image: {e}")))?;
    let avatar = if size == 0 { decoded } else { decoded.resize_to_fill(size, size, FilterType::Lanczos3) };

    let (image_format, avatar) = match format {
        // JPEG has no alpha channel.
        "jpeg" => (ImageFormat::Jpeg, DynamicImage::ImageRgb8(avatar.to_rgb8())),
        "png" => (ImageFormat::Png, avatar),
        "webp" => (ImageFormat::WebP, DynamicImage::ImageRgba8(avatar.to_rgba8())),
        other => {
            return Err(AppError::ImageConversion(format!("Unsupported format: {other}")));
        }
    };

    avatar
        .save_with_format(output_path, image_format)
        .map_err(|e| AppError::ImageConversion(format!("Failed to save as {format}: {e}")))
}

/// Check if a MIME type matches the requested output format.
fn mime_matches_format(mime: &str, format: &str) -> bool {
    matches!((mime, format), ("image/jpeg", "jpeg") | ("image/png", "png") | ("image/webp", "webp"))
}
