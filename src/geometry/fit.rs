//! Contain-fit of a source image into a container.
//!
//! Pure and stateless: callers recompute the layout whenever the container or
//! the image changes instead of patching a previous result.

use super::types::{ImageDimensions, Layout, Rect, Size};

/// Fit `image` into `container`, preserving aspect ratio and centering.
///
/// # Arguments
/// * `container` - Available space in screen units
/// * `image` - Natural pixel size of the source image
///
/// # Returns
/// * The rendered rectangle in container-local coordinates, or
///   [`Rect::EMPTY`] when either input has a non-positive side.
///
/// # Examples
/// ```
/// # use tagcrop::geometry::{fit, ImageDimensions, Rect, Size};
/// // Square image in a tall container → full width, vertically centered
/// let layout = fit(Size::new(300.0, 600.0), ImageDimensions::new(1200, 1200));
/// assert_eq!(layout, Rect::new(0.0, 150.0, 300.0, 300.0));
/// ```
pub fn fit(container: Size, image: ImageDimensions) -> Layout {
    let source = image.as_size();
    if container.is_degenerate() || source.is_degenerate() {
        return Rect::EMPTY;
    }

    let scale = (container.width / source.width).min(container.height / source.height);
    let width = source.width * scale;
    let height = source.height * scale;

    Rect {
        x: (container.width - width) / 2.0,
        y: (container.height - height) / 2.0,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::assert_close;

    // =========================================================================
    // fit tests
    // =========================================================================

    #[test]
    fn square_image_in_portrait_container() {
        let layout = fit(Size::new(300.0, 600.0), ImageDimensions::new(1200, 1200));
        assert_eq!(layout, Rect::new(0.0, 150.0, 300.0, 300.0));
    }

    #[test]
    fn landscape_image_is_width_bound() {
        // 4000x3000 into 400x800 → scale 0.1 → 400x300, y offset 250
        let layout = fit(Size::new(400.0, 800.0), ImageDimensions::new(4000, 3000));
        assert_close(layout.width, 400.0);
        assert_close(layout.height, 300.0);
        assert_close(layout.x, 0.0);
        assert_close(layout.y, 250.0);
    }

    #[test]
    fn portrait_image_is_height_bound() {
        // 1000x2000 into 600x400 → scale 0.2 → 200x400, x offset 200
        let layout = fit(Size::new(600.0, 400.0), ImageDimensions::new(1000, 2000));
        assert_close(layout.width, 200.0);
        assert_close(layout.height, 400.0);
        assert_close(layout.x, 200.0);
        assert_close(layout.y, 0.0);
    }

    #[test]
    fn small_image_is_scaled_up() {
        let layout = fit(Size::new(500.0, 500.0), ImageDimensions::new(50, 100));
        assert_close(layout.width, 250.0);
        assert_close(layout.height, 500.0);
        assert_close(layout.x, 125.0);
    }

    #[test]
    fn preserves_aspect_ratio() {
        let image = ImageDimensions::new(3024, 4032);
        let layout = fit(Size::new(390.0, 590.0), image);
        assert_close(layout.aspect_ratio(), 3024.0 / 4032.0);
    }

    #[test]
    fn zero_container_is_empty() {
        assert_eq!(
            fit(Size::new(0.0, 600.0), ImageDimensions::new(100, 100)),
            Rect::EMPTY
        );
        assert_eq!(
            fit(Size::new(-10.0, 600.0), ImageDimensions::new(100, 100)),
            Rect::EMPTY
        );
    }

    #[test]
    fn zero_image_is_empty() {
        assert_eq!(
            fit(Size::new(300.0, 600.0), ImageDimensions::new(0, 100)),
            Rect::EMPTY
        );
    }
}
