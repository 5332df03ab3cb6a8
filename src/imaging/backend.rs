//! Image backend trait and error type.
//!
//! The [`ImageBackend`] trait defines the two operations the editor needs:
//! identify (probe dimensions when an image is set) and crop (export the committed
//! region).
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! crate. Tests use the recording [`MockBackend`](tests::MockBackend).

use super::params::CropParams;
use crate::geometry::ImageDimensions;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Failed to load image: {0}")]
    ImageLoad(String),
    #[error("Export failed: {0}")]
    Export(String),
}

/// Trait for image backends.
///
/// Everything outside this module talks to images only through this trait,
/// so the editor flows are testable without touching the filesystem.
pub trait ImageBackend {
    /// Get image dimensions without decoding pixels where possible.
    fn identify(&self, path: &Path) -> Result<ImageDimensions, BackendError>;

    /// Cut `params.rect` out of the source and write it to `params.output`.
    fn crop(&self, params: &CropParams) -> Result<(), BackendError>;
}
