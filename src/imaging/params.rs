//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They sit between
//! the [`operations`](super::operations) module (which decides what to crop
//! from the editor state) and the [`backend`](super::backend) (which does the
//! pixel work), so tests can swap in a mock backend.

use crate::geometry::PixelRect;
use std::path::PathBuf;

/// Everything a crop needs: source, output path, and the rectangle in
/// source-image pixels. The output format follows the output extension.
#[derive(Debug, Clone, PartialEq)]
pub struct CropParams {
    pub source: PathBuf,
    pub output: PathBuf,
    pub rect: PixelRect,
}
