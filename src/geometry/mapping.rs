//! Coordinate mapping between screen space, image percentages, and source pixels.
//!
//! Every function takes the current [`Layout`] as its transform basis and
//! refuses to run against an empty one, so a division by zero never happens.
//!
//! | From | To | Function |
//! |---|---|---|
//! | screen point | percent of image | [`screen_to_percent`] |
//! | percent of image | screen point | [`percent_to_screen`] |
//! | screen rect | source pixels | [`screen_rect_to_image_pixels`] |
//! | source pixels | screen rect | [`image_pixels_to_screen_rect`] |

use super::types::{ImageDimensions, Layout, NormalizedPoint, PixelRect, Point, Rect, Region};
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum GeometryError {
    #[error("layout is not ready (empty image rectangle)")]
    NotReady,
    #[error("point ({x}, {y}) is outside the image")]
    OutsideImage { x: f64, y: f64 },
}

pub type Result<T> = std::result::Result<T, GeometryError>;

fn ready(layout: &Layout) -> Result<()> {
    if layout.is_empty() {
        Err(GeometryError::NotReady)
    } else {
        Ok(())
    }
}

/// Convert a screen point to a percentage position within the image.
///
/// Points on the image border are accepted and map to 0 or 100; anything
/// outside fails with [`GeometryError::OutsideImage`].
pub fn screen_to_percent(point: Point, layout: &Layout) -> Result<NormalizedPoint> {
    ready(layout)?;
    if !layout.contains(point) {
        return Err(outside(point));
    }
    Ok(to_percent(point, layout))
}

/// Like [`screen_to_percent`], but the point must lie strictly inside the
/// image shrunk by `margin` on every side.
///
/// Tag taps use the dot size here so a placed dot never overhangs the photo.
/// Even with a zero margin a tap on the border is rejected. The percentages
/// are still relative to the full image.
pub fn screen_to_percent_inset(
    point: Point,
    layout: &Layout,
    margin: f64,
) -> Result<NormalizedPoint> {
    ready(layout)?;
    if !layout.inset(margin).contains_strictly(point) {
        return Err(outside(point));
    }
    Ok(to_percent(point, layout))
}

fn outside(point: Point) -> GeometryError {
    GeometryError::OutsideImage {
        x: point.x,
        y: point.y,
    }
}

fn to_percent(point: Point, layout: &Layout) -> NormalizedPoint {
    NormalizedPoint {
        x_percent: (point.x - layout.x) / layout.width * 100.0,
        y_percent: (point.y - layout.y) / layout.height * 100.0,
    }
}

/// Convert a percentage position back to a screen point at the current layout.
pub fn percent_to_screen(point: NormalizedPoint, layout: &Layout) -> Result<Point> {
    ready(layout)?;
    Ok(Point {
        x: layout.x + point.x_percent / 100.0 * layout.width,
        y: layout.y + point.y_percent / 100.0 * layout.height,
    })
}

/// Convert a screen-space region to a rectangle in source-image pixels.
///
/// This is what the crop backend consumes. Values are rounded to the nearest
/// pixel and clamped so the rectangle never leaves the image.
pub fn screen_rect_to_image_pixels(
    region: &Region,
    layout: &Layout,
    image: ImageDimensions,
) -> Result<PixelRect> {
    ready(layout)?;
    let iw = f64::from(image.width);
    let ih = f64::from(image.height);
    let to_px = |value: f64, limit: f64| value.round().clamp(0.0, limit) as u32;

    let x = to_px((region.x - layout.x) / layout.width * iw, iw);
    let y = to_px((region.y - layout.y) / layout.height * ih, ih);
    let width = to_px(region.width / layout.width * iw, iw).min(image.width - x);
    let height = to_px(region.height / layout.height * ih, ih).min(image.height - y);

    Ok(PixelRect {
        x,
        y,
        width,
        height,
    })
}

/// Convert a source-pixel rectangle to screen space at the current layout.
pub fn image_pixels_to_screen_rect(
    rect: &PixelRect,
    layout: &Layout,
    image: ImageDimensions,
) -> Result<Region> {
    ready(layout)?;
    if image.width == 0 || image.height == 0 {
        return Err(GeometryError::NotReady);
    }
    let sx = layout.width / f64::from(image.width);
    let sy = layout.height / f64::from(image.height);
    Ok(Rect {
        x: layout.x + f64::from(rect.x) * sx,
        y: layout.y + f64::from(rect.y) * sy,
        width: f64::from(rect.width) * sx,
        height: f64::from(rect.height) * sy,
    })
}
