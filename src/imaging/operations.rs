//! High-level image operations.
//!
//! These functions combine the editor state with backend execution: probing
//! a photo to start an editing session, and exporting the committed crop.
//! A failed backend call never touches the editor.

use super::backend::{BackendError, ImageBackend};
use super::params::CropParams;
use crate::geometry::{GeometryError, ImageDimensions, PixelRect};
use crate::session::CropEditor;
use log::info;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OperationError {
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, OperationError>;

/// Probe `path` and hand its dimensions to the editor.
///
/// A zero-sized image is reported as a load failure. On any failure the
/// editor keeps its previous image, layout and region.
pub fn load_image(
    backend: &impl ImageBackend,
    editor: &mut CropEditor,
    path: &Path,
) -> Result<ImageDimensions> {
    let dims = backend.identify(path)?;
    if dims.width == 0 || dims.height == 0 {
        return Err(BackendError::ImageLoad(format!("{} has no pixels", path.display())).into());
    }
    editor.set_image(dims);
    info!("loaded {} ({}x{})", path.display(), dims.width, dims.height);
    Ok(dims)
}

/// Crop `source` to the editor's committed region and write it to `output`.
///
/// Returns the pixel rectangle that was exported.
pub fn export_crop(
    backend: &impl ImageBackend,
    editor: &CropEditor,
    source: &Path,
    output: &Path,
) -> Result<PixelRect> {
    let rect = editor.pixel_rect()?;
    backend.crop(&CropParams {
        source: source.to_path_buf(),
        output: output.to_path_buf(),
        rect,
    })?;
    info!(
        "exported {}x{}+{}+{} to {}",
        rect.width,
        rect.height,
        rect.x,
        rect.y,
        output.display()
    );
    Ok(rect)
}
