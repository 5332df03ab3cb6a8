//! Pure Rust image backend on top of the `image` crate.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Identify | `image::image_dimensions` (header only) |
//! | Decode (JPEG, PNG, TIFF, WebP) | `image::ImageReader` |
//! | Crop | `image::DynamicImage::crop_imm` |
//! | Encode | `image::DynamicImage::save_with_format`, format from the output extension |

use super::backend::{BackendError, ImageBackend};
use super::params::CropParams;
use crate::geometry::{ImageDimensions, PixelRect};
use image::{DynamicImage, ImageFormat, ImageReader};
use std::fmt;
use std::path::Path;

/// Output formats whose encoders are compiled in.
const OUTPUT_FORMATS: &[ImageFormat] = &[
    ImageFormat::Jpeg,
    ImageFormat::Png,
    ImageFormat::Tiff,
    ImageFormat::WebP,
];

/// Backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Load and decode the crop source. Any failure here fails the export.
fn load_source(path: &Path) -> Result<DynamicImage, BackendError> {
    let unreadable = |e: &dyn fmt::Display| {
        BackendError::Export(format!("Failed to read {}: {}", path.display(), e))
    };
    ImageReader::open(path)
        .map_err(|e| unreadable(&e))?
        .with_guessed_format()
        .map_err(|e| unreadable(&e))?
        .decode()
        .map_err(|e| unreadable(&e))
}

fn output_format(path: &Path) -> Result<ImageFormat, BackendError> {
    ImageFormat::from_path(path)
        .ok()
        .filter(|f| OUTPUT_FORMATS.contains(f))
        .ok_or_else(|| {
            BackendError::Export(format!("Unsupported output format: {}", path.display()))
        })
}

/// Check `rect` is non-empty and lies inside an image of `width`×`height`.
fn check_rect(rect: &PixelRect, width: u32, height: u32) -> Result<(), BackendError> {
    let fits = rect.width > 0
        && rect.height > 0
        && rect.x.checked_add(rect.width).is_some_and(|r| r <= width)
        && rect.y.checked_add(rect.height).is_some_and(|b| b <= height);
    if fits {
        Ok(())
    } else {
        Err(BackendError::Export(format!(
            "Crop {}x{}+{}+{} does not fit a {}x{} image",
            rect.width, rect.height, rect.x, rect.y, width, height
        )))
    }
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<ImageDimensions, BackendError> {
        let (width, height) = image::image_dimensions(path)
            .map_err(|e| BackendError::ImageLoad(format!("Failed to read dimensions: {}", e)))?;
        Ok(ImageDimensions { width, height })
    }

    fn crop(&self, params: &CropParams) -> Result<(), BackendError> {
        // Reject the output path before decoding anything
        let format = output_format(&params.output)?;
        let img = load_source(&params.source)?;
        check_rect(&params.rect, img.width(), img.height())?;

        let PixelRect {
            x,
            y,
            width,
            height,
        } = params.rect;
        let cropped = img.crop_imm(x, y, width, height);

        // JPEG has no alpha channel
        let cropped = if format == ImageFormat::Jpeg {
            DynamicImage::ImageRgb8(cropped.to_rgb8())
        } else {
            cropped
        };

        cropped
            .save_with_format(&params.output, format)
            .map_err(|e| {
                BackendError::Export(format!(
                    "Failed to write {}: {}",
                    params.output.display(),
                    e
                ))
            })
    }
}
