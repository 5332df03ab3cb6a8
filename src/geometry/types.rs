//! Value types shared by the fitter, solver, and mapper.
//!
//! Screen-space quantities are `f64` layout units; nothing here rounds.
//! Only [`PixelRect`] is integral, because it is handed to the crop backend.

use serde::{Deserialize, Serialize};

/// A point in container-local screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A width/height pair in screen units (e.g. a container).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True when either side is zero, negative, or NaN.
    pub fn is_degenerate(self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Natural pixel size of a source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

impl ImageDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn as_size(self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }
}

/// An axis-aligned rectangle in screen coordinates.
///
/// Used both for the fitted image [`Layout`] and for the user-manipulated
/// [`Region`]; the aliases exist so signatures say which one they expect.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// The on-screen rectangle a source image occupies after a contain-fit.
pub type Layout = Rect;

/// The crop box / tag region, always contained within a [`Layout`].
pub type Region = Rect;

impl Rect {
    pub const EMPTY: Rect = Rect {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Width over height. Infinite or NaN for a zero-height rect.
    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }

    /// An empty rect cannot be mapped or solved against.
    pub fn is_empty(&self) -> bool {
        self.size().is_degenerate()
    }

    /// Inclusive containment: points on the border count as inside.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// Strict containment: points on the border are outside.
    pub fn contains_strictly(&self, p: Point) -> bool {
        p.x > self.x && p.x < self.right() && p.y > self.y && p.y < self.bottom()
    }

    /// Shrink by `margin` on every side. Negative margins grow the rect.
    pub fn inset(&self, margin: f64) -> Rect {
        Rect::new(
            self.x + margin,
            self.y + margin,
            self.width - 2.0 * margin,
            self.height - 2.0 * margin,
        )
    }

    /// True when `other` lies entirely within `self`, allowing `eps` of slack.
    pub fn contains_rect(&self, other: &Rect, eps: f64) -> bool {
        other.x >= self.x - eps
            && other.y >= self.y - eps
            && other.right() <= self.right() + eps
            && other.bottom() <= self.bottom() + eps
    }
}

/// A position relative to image content, in percent of the rendered size.
///
/// Independent of the current layout: recomputing the [`Layout`] does not
/// invalidate it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NormalizedPoint {
    pub x_percent: f64,
    pub y_percent: f64,
}

impl NormalizedPoint {
    pub const fn new(x_percent: f64, y_percent: f64) -> Self {
        Self {
            x_percent,
            y_percent,
        }
    }
}

/// A rectangle in the source image's native pixel space.
///
/// This is the only form handed to the crop/export backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_edges() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.bottom(), 60.0);
        assert_eq!(r.center(), Point::new(25.0, 40.0));
    }

    #[test]
    fn empty_detection() {
        assert!(Rect::EMPTY.is_empty());
        assert!(Rect::new(0.0, 0.0, 10.0, 0.0).is_empty());
        assert!(Rect::new(0.0, 0.0, f64::NAN, 10.0).is_empty());
        assert!(!Rect::new(0.0, 0.0, 1.0, 1.0).is_empty());
    }

    #[test]
    fn border_points_are_contained_but_not_strictly() {
        let r = Rect::new(0.0, 0.0, 100.0, 100.0);
        let edge = Point::new(100.0, 50.0);
        assert!(r.contains(edge));
        assert!(!r.contains_strictly(edge));
        assert!(r.contains_strictly(Point::new(50.0, 50.0)));
    }

    #[test]
    fn inset_shrinks_all_sides() {
        let r = Rect::new(0.0, 0.0, 100.0, 60.0).inset(10.0);
        assert_eq!(r, Rect::new(10.0, 10.0, 80.0, 40.0));
    }

    #[test]
    fn contains_rect_with_slack() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(outer.contains_rect(&Rect::new(0.0, 0.0, 100.0, 100.0), 0.0));
        assert!(!outer.contains_rect(&Rect::new(0.0, 0.0, 100.1, 100.0), 0.0));
        assert!(outer.contains_rect(&Rect::new(0.0, 0.0, 100.1, 100.0), 0.5));
    }
}
