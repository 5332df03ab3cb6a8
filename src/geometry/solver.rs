//! Region constraint solver.
//!
//! Turns a drag on one of nine handles into the next crop region. Every
//! result is contained in the bounds, at least `min_size` on both sides, and
//! within the aspect-ratio range, with that precedence when they conflict:
//! bounds beat minimum size, minimum size beats aspect ratio.
//!
//! Resizes resolve in a fixed order:
//!
//! ```text
//! 1. raw delta      move the edges the handle owns
//! 2. containment    cut anything outside the bounds
//! 3. minimum size   grow back to min_size, anchored on the opposite edge
//! 4. aspect ratio   correct width or height; shrink both if bounds run out
//! 5. minimum size   again, since step 4 can undercut it (this pass wins)
//! ```
//!
//! Everything is O(1) arithmetic with no rounding, so it can run on every
//! pointer-move event.

use super::types::{Layout, Rect, Region};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One of the nine control points of a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Handle {
    /// Translates the whole region.
    Move,
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
}

impl Handle {
    /// The eight resize handles, clockwise from the top-left corner.
    pub const RESIZE: [Handle; 8] = [
        Handle::TopLeft,
        Handle::Top,
        Handle::TopRight,
        Handle::Right,
        Handle::BottomRight,
        Handle::Bottom,
        Handle::BottomLeft,
        Handle::Left,
    ];

    pub fn moves_left(self) -> bool {
        matches!(self, Handle::TopLeft | Handle::Left | Handle::BottomLeft)
    }

    pub fn moves_right(self) -> bool {
        matches!(self, Handle::TopRight | Handle::Right | Handle::BottomRight)
    }

    pub fn moves_top(self) -> bool {
        matches!(self, Handle::TopLeft | Handle::Top | Handle::TopRight)
    }

    pub fn moves_bottom(self) -> bool {
        matches!(
            self,
            Handle::BottomLeft | Handle::Bottom | Handle::BottomRight
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Handle::Move => "move",
            Handle::TopLeft => "top-left",
            Handle::Top => "top",
            Handle::TopRight => "top-right",
            Handle::Right => "right",
            Handle::BottomRight => "bottom-right",
            Handle::Bottom => "bottom",
            Handle::BottomLeft => "bottom-left",
            Handle::Left => "left",
        }
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("unknown handle '{0}' (expected move, top-left, top, top-right, right, bottom-right, bottom, bottom-left or left)")]
pub struct ParseHandleError(pub String);

impl FromStr for Handle {
    type Err = ParseHandleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        std::iter::once(Handle::Move)
            .chain(Handle::RESIZE)
            .find(|h| h.as_str() == normalized)
            .ok_or_else(|| ParseHandleError(s.to_string()))
    }
}

/// Size and shape limits every region must satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Constraints {
    /// Minimum width and height in screen units.
    pub min_size: f64,
    /// Smallest allowed width / height.
    pub min_aspect_ratio: f64,
    /// Largest allowed width / height.
    pub max_aspect_ratio: f64,
}

impl Default for Constraints {
    fn default() -> Self {
        Self {
            min_size: 150.0,
            min_aspect_ratio: 0.5,
            max_aspect_ratio: 2.0,
        }
    }
}

/// Resolve a drag of `handle` by `(dx, dy)` applied to `base`.
///
/// `base` should be the region as it was when the gesture started, with
/// `(dx, dy)` measured from the gesture's start point. Feeding the previous
/// frame's output back in works but accumulates clamping error.
///
/// Never fails: when the constraints cannot all hold (bounds smaller than
/// `min_size`), the result is the best rectangle that still fits the bounds.
pub fn resolve(
    base: Region,
    handle: Handle,
    dx: f64,
    dy: f64,
    bounds: &Layout,
    constraints: &Constraints,
) -> Region {
    if handle == Handle::Move {
        return translate(base, dx, dy, bounds);
    }

    let candidate = apply_delta(base, handle, dx, dy);
    let contained = clamp_to_bounds(candidate, bounds);
    let sized = enforce_min_size(contained, handle, bounds, constraints.min_size);
    let proportioned = enforce_aspect_ratio(sized, handle, bounds, constraints);
    enforce_min_size(proportioned, handle, bounds, constraints.min_size)
}

/// The square region shown when a layout first becomes available.
///
/// Side is `fill` of the shorter layout side, raised to `min_size` and capped
/// at the shorter side, centered in the layout.
pub fn initial_region(layout: &Layout, constraints: &Constraints, fill: f64) -> Region {
    let shorter = layout.width.min(layout.height);
    let side = (shorter * fill).max(constraints.min_size).min(shorter);
    Rect {
        x: layout.x + (layout.width - side) / 2.0,
        y: layout.y + (layout.height - side) / 2.0,
        width: side,
        height: side,
    }
}

/// Bring an arbitrary rectangle into compliance with `bounds` and `constraints`.
///
/// Runs the resize pipeline with a zero delta, anchored at the top-left.
pub fn conform(region: Region, bounds: &Layout, constraints: &Constraints) -> Region {
    resolve(region, Handle::BottomRight, 0.0, 0.0, bounds, constraints)
}

/// Carry a region from one layout to another.
///
/// The region is mapped proportionally into the new layout and then
/// conformed, because `min_size` is in screen units and may no longer hold
/// after scaling. Returns `None` if either layout is empty.
pub fn rederive(
    region: Region,
    old_layout: &Layout,
    new_layout: &Layout,
    constraints: &Constraints,
) -> Option<Region> {
    if old_layout.is_empty() || new_layout.is_empty() {
        return None;
    }
    let sx = new_layout.width / old_layout.width;
    let sy = new_layout.height / old_layout.height;
    let mapped = Rect {
        x: new_layout.x + (region.x - old_layout.x) * sx,
        y: new_layout.y + (region.y - old_layout.y) * sy,
        width: region.width * sx,
        height: region.height * sy,
    };
    Some(conform(mapped, new_layout, constraints))
}

fn translate(base: Region, dx: f64, dy: f64, bounds: &Layout) -> Region {
    Rect {
        x: (base.x + dx).min(bounds.right() - base.width).max(bounds.x),
        y: (base.y + dy).min(bounds.bottom() - base.height).max(bounds.y),
        ..base
    }
}

fn apply_delta(base: Region, handle: Handle, dx: f64, dy: f64) -> Region {
    let mut r = base;
    if handle.moves_left() {
        r.x += dx;
        r.width -= dx;
    }
    if handle.moves_right() {
        r.width += dx;
    }
    if handle.moves_top() {
        r.y += dy;
        r.height -= dy;
    }
    if handle.moves_bottom() {
        r.height += dy;
    }
    r
}

fn clamp_to_bounds(mut r: Region, bounds: &Layout) -> Region {
    if r.x < bounds.x {
        r.width -= bounds.x - r.x;
        r.x = bounds.x;
    }
    if r.y < bounds.y {
        r.height -= bounds.y - r.y;
        r.y = bounds.y;
    }
    if r.right() > bounds.right() {
        r.width = bounds.right() - r.x;
    }
    if r.bottom() > bounds.bottom() {
        r.height = bounds.bottom() - r.y;
    }
    r
}

fn enforce_min_size(mut r: Region, handle: Handle, bounds: &Layout, min_size: f64) -> Region {
    if r.width < min_size {
        if handle.moves_left() {
            r.x = r.right() - min_size;
        }
        r.width = min_size;
    }
    if r.height < min_size {
        if handle.moves_top() {
            r.y = r.bottom() - min_size;
        }
        r.height = min_size;
    }
    fit_within(r, bounds)
}

/// Position is clamped before size, so an oversized region ends up pinned to
/// the bounds' leading edge and cut to the bounds' extent.
fn fit_within(mut r: Region, bounds: &Layout) -> Region {
    r.x = r.x.min(bounds.right() - r.width).max(bounds.x);
    r.width = r.width.min(bounds.right() - r.x);
    r.y = r.y.min(bounds.bottom() - r.height).max(bounds.y);
    r.height = r.height.min(bounds.bottom() - r.y);
    r
}

fn enforce_aspect_ratio(
    r: Region,
    handle: Handle,
    bounds: &Layout,
    constraints: &Constraints,
) -> Region {
    if r.height <= 0.0 {
        return r;
    }
    let ratio = r.aspect_ratio();
    if ratio < constraints.min_aspect_ratio {
        correct_ratio(r, handle, bounds, constraints.min_aspect_ratio)
    } else if ratio > constraints.max_aspect_ratio {
        correct_ratio(r, handle, bounds, constraints.max_aspect_ratio)
    } else {
        r
    }
}

fn correct_ratio(r: Region, handle: Handle, bounds: &Layout, target: f64) -> Region {
    // Edge handles correct the dimension they drag. Corners shrink whichever
    // side is out of proportion, which can never leave the bounds.
    let adjust_width = match handle {
        Handle::Left | Handle::Right => true,
        Handle::Top | Handle::Bottom => false,
        _ => r.aspect_ratio() > target,
    };

    if adjust_width {
        let wanted = r.height * target;
        let available = if handle.moves_left() {
            r.right() - bounds.x
        } else {
            bounds.right() - r.x
        };
        if wanted <= available {
            resize_anchored(r, handle, wanted, r.height)
        } else {
            resize_anchored(r, handle, available, available / target)
        }
    } else {
        let wanted = r.width / target;
        let available = if handle.moves_top() {
            r.bottom() - bounds.y
        } else {
            bounds.bottom() - r.y
        };
        if wanted <= available {
            resize_anchored(r, handle, r.width, wanted)
        } else {
            resize_anchored(r, handle, available * target, available)
        }
    }
}

/// Resize keeping the edges opposite the dragged ones in place.
fn resize_anchored(r: Region, handle: Handle, width: f64, height: f64) -> Region {
    let x = if handle.moves_left() {
        r.right() - width
    } else {
        r.x
    };
    let y = if handle.moves_top() {
        r.bottom() - height
    } else {
        r.y
    };
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{assert_close, assert_rect_close, assert_satisfies};

    fn bounds() -> Layout {
        Rect::new(0.0, 0.0, 300.0, 300.0)
    }

    fn c() -> Constraints {
        Constraints::default()
    }

    // =========================================================================
    // Handle parsing
    // =========================================================================

    #[test]
    fn handle_round_trips_through_str() {
        for h in std::iter::once(Handle::Move).chain(Handle::RESIZE) {
            assert_eq!(h.as_str().parse::<Handle>(), Ok(h));
        }
    }

    #[test]
    fn handle_parse_accepts_underscores_and_case() {
        assert_eq!("Bottom_Right".parse::<Handle>(), Ok(Handle::BottomRight));
    }

    #[test]
    fn handle_parse_rejects_unknown() {
        assert!("middle".parse::<Handle>().is_err());
    }

    #[test]
    fn handle_edge_ownership() {
        assert!(Handle::TopLeft.moves_left() && Handle::TopLeft.moves_top());
        assert!(!Handle::Top.moves_left() && !Handle::Top.moves_right());
        assert!(Handle::BottomRight.moves_right() && Handle::BottomRight.moves_bottom());
        assert!(!Handle::Move.moves_left() && !Handle::Move.moves_bottom());
    }

    // =========================================================================
    // Move
    // =========================================================================

    #[test]
    fn move_past_right_bound_clamps() {
        let base = Rect::new(250.0, 0.0, 100.0, 100.0);
        let out = resolve(base, Handle::Move, 100.0, 0.0, &bounds(), &c());
        assert_eq!(out.x, 200.0);
        assert_eq!(out.width, 100.0);
    }

    #[test]
    fn move_past_top_left_clamps() {
        let base = Rect::new(50.0, 50.0, 150.0, 150.0);
        let out = resolve(base, Handle::Move, -80.0, -500.0, &bounds(), &c());
        assert_eq!(out, Rect::new(0.0, 0.0, 150.0, 150.0));
    }

    #[test]
    fn move_never_changes_size() {
        let base = Rect::new(10.0, 20.0, 160.0, 200.0);
        let out = resolve(base, Handle::Move, 33.0, -7.0, &bounds(), &c());
        assert_eq!(out.size(), base.size());
        assert_eq!(out, Rect::new(43.0, 13.0, 160.0, 200.0));
    }

    #[test]
    fn move_respects_offset_bounds() {
        let layout = Rect::new(0.0, 150.0, 300.0, 300.0);
        let base = Rect::new(30.0, 180.0, 240.0, 240.0);
        let out = resolve(base, Handle::Move, 0.0, -100.0, &layout, &c());
        assert_eq!(out.y, 150.0);
    }

    // =========================================================================
    // Plain resizes
    // =========================================================================

    #[test]
    fn bottom_right_grows_freely() {
        let base = Rect::new(50.0, 50.0, 150.0, 150.0);
        let out = resolve(base, Handle::BottomRight, 40.0, 20.0, &bounds(), &c());
        assert_eq!(out, Rect::new(50.0, 50.0, 190.0, 170.0));
    }

    #[test]
    fn top_left_moves_origin() {
        let base = Rect::new(100.0, 100.0, 150.0, 150.0);
        let out = resolve(base, Handle::TopLeft, -50.0, -30.0, &bounds(), &c());
        assert_eq!(out, Rect::new(50.0, 70.0, 200.0, 180.0));
    }

    #[test]
    fn edge_handle_touches_one_dimension() {
        let base = Rect::new(50.0, 50.0, 150.0, 150.0);
        let out = resolve(base, Handle::Right, 30.0, 999.0, &bounds(), &c());
        assert_eq!(out, Rect::new(50.0, 50.0, 180.0, 150.0));

        let out = resolve(base, Handle::Top, 999.0, -20.0, &bounds(), &c());
        assert_eq!(out, Rect::new(50.0, 30.0, 150.0, 170.0));
    }

    // =========================================================================
    // Containment
    // =========================================================================

    #[test]
    fn left_overflow_cuts_width() {
        let base = Rect::new(50.0, 50.0, 150.0, 150.0);
        let out = resolve(base, Handle::Left, -100.0, 0.0, &bounds(), &c());
        assert_eq!(out, Rect::new(0.0, 50.0, 200.0, 150.0));
    }

    #[test]
    fn bottom_right_overflow_cuts_both() {
        let base = Rect::new(100.0, 100.0, 150.0, 150.0);
        let out = resolve(base, Handle::BottomRight, 500.0, 500.0, &bounds(), &c());
        assert_eq!(out, Rect::new(100.0, 100.0, 200.0, 200.0));
    }

    // =========================================================================
    // Minimum size
    // =========================================================================

    #[test]
    fn corner_drag_past_minimum_stops_at_minimum() {
        let base = Rect::new(50.0, 50.0, 150.0, 150.0);
        let out = resolve(base, Handle::BottomRight, -100.0, -100.0, &bounds(), &c());
        assert_eq!(out, Rect::new(50.0, 50.0, 150.0, 150.0));
    }

    #[test]
    fn leading_edge_minimum_keeps_trailing_edge_anchored() {
        let base = Rect::new(50.0, 50.0, 200.0, 200.0);
        let out = resolve(base, Handle::TopLeft, 180.0, 180.0, &bounds(), &c());
        assert_rect_close(out, Rect::new(100.0, 100.0, 150.0, 150.0));
    }

    #[test]
    fn dragging_left_edge_across_right_edge_stays_anchored() {
        let base = Rect::new(50.0, 50.0, 200.0, 150.0);
        let out = resolve(base, Handle::Left, 1000.0, 0.0, &bounds(), &c());
        assert_rect_close(out, Rect::new(100.0, 50.0, 150.0, 150.0));
    }

    #[test]
    fn bounds_beat_minimum_size() {
        let tiny = Rect::new(0.0, 0.0, 100.0, 80.0);
        let base = Rect::new(0.0, 0.0, 100.0, 80.0);
        let out = resolve(base, Handle::BottomRight, -60.0, -60.0, &tiny, &c());
        assert_satisfies(out, &tiny, None);
        assert_eq!(out, Rect::new(0.0, 0.0, 100.0, 80.0));
    }

    // =========================================================================
    // Aspect ratio
    // =========================================================================

    #[test]
    fn right_edge_too_wide_pulls_width_back() {
        let wide = Rect::new(0.0, 0.0, 600.0, 300.0);
        let base = Rect::new(0.0, 0.0, 200.0, 150.0);
        let out = resolve(base, Handle::Right, 300.0, 0.0, &wide, &c());
        assert_rect_close(out, Rect::new(0.0, 0.0, 300.0, 150.0));
    }

    #[test]
    fn left_edge_too_narrow_grows_width_from_right_anchor() {
        let tall = Rect::new(0.0, 0.0, 300.0, 600.0);
        let base = Rect::new(100.0, 0.0, 150.0, 400.0);
        // Candidate 150 x 400 is ratio 0.375 → width must become 200
        let out = resolve(base, Handle::Left, 0.0, 0.0, &tall, &c());
        assert_rect_close(out, Rect::new(50.0, 0.0, 200.0, 400.0));
    }

    #[test]
    fn ratio_growth_blocked_by_bounds_shrinks_proportionally() {
        let tall = Rect::new(0.0, 0.0, 300.0, 600.0);
        // Right edge at 180; width 150 needs 250 for height 500 but only 180 fits
        let base = Rect::new(30.0, 0.0, 150.0, 500.0);
        let out = resolve(base, Handle::Left, 0.0, 0.0, &tall, &c());
        assert_rect_close(out, Rect::new(0.0, 0.0, 180.0, 360.0));
        assert_close(out.aspect_ratio(), 0.5);
    }

    #[test]
    fn bottom_edge_too_tall_pulls_height_back() {
        let tall = Rect::new(0.0, 0.0, 300.0, 800.0);
        let base = Rect::new(0.0, 0.0, 150.0, 200.0);
        let out = resolve(base, Handle::Bottom, 0.0, 400.0, &tall, &c());
        assert_rect_close(out, Rect::new(0.0, 0.0, 150.0, 300.0));
    }

    #[test]
    fn top_edge_too_wide_grows_height_upward() {
        let layout = Rect::new(0.0, 0.0, 800.0, 400.0);
        let base = Rect::new(0.0, 200.0, 500.0, 200.0);
        // 500 x 200 is 2.5 → height must reach 250, bottom edge anchored at 400
        let out = resolve(base, Handle::Top, 0.0, 0.0, &layout, &c());
        assert_rect_close(out, Rect::new(0.0, 150.0, 500.0, 250.0));
    }

    #[test]
    fn corner_too_wide_shrinks_width() {
        let layout = Rect::new(0.0, 0.0, 800.0, 800.0);
        let base = Rect::new(100.0, 100.0, 200.0, 200.0);
        let out = resolve(base, Handle::TopLeft, -100.0, 40.0, &layout, &c());
        // Candidate 300 x 160 → 1.875 is fine
        assert_rect_close(out, Rect::new(0.0, 140.0, 300.0, 160.0));

        let out = resolve(base, Handle::TopLeft, -100.0, 50.0, &layout, &c());
        // Candidate 300 x 150 → exactly 2.0, still fine
        assert_close(out.aspect_ratio(), 2.0);

        let out = resolve(base, Handle::BottomRight, 300.0, -50.0, &layout, &c());
        // Candidate 500 x 150 → width cut to 300, left edge anchored
        assert_rect_close(out, Rect::new(100.0, 100.0, 300.0, 150.0));
    }

    #[test]
    fn corner_too_tall_shrinks_height_from_bottom_anchor() {
        let layout = Rect::new(0.0, 0.0, 800.0, 800.0);
        let base = Rect::new(300.0, 300.0, 200.0, 200.0);
        // Candidate 150 x 500 → height cut to 300, bottom edge at 500 anchored
        let out = resolve(base, Handle::TopLeft, 50.0, -300.0, &layout, &c());
        assert_rect_close(out, Rect::new(350.0, 200.0, 150.0, 300.0));
    }

    // =========================================================================
    // Initial region, conform, rederive
    // =========================================================================

    #[test]
    fn initial_region_centered_square() {
        let layout = Rect::new(0.0, 150.0, 300.0, 300.0);
        let r = initial_region(&layout, &c(), 0.8);
        assert_rect_close(r, Rect::new(30.0, 180.0, 240.0, 240.0));
    }

    #[test]
    fn initial_region_raised_to_minimum() {
        let layout = Rect::new(0.0, 0.0, 400.0, 160.0);
        let r = initial_region(&layout, &c(), 0.5);
        assert_rect_close(r, Rect::new(125.0, 5.0, 150.0, 150.0));
    }

    #[test]
    fn initial_region_capped_by_small_layout() {
        let layout = Rect::new(0.0, 0.0, 100.0, 120.0);
        let r = initial_region(&layout, &c(), 0.8);
        assert_rect_close(r, Rect::new(0.0, 10.0, 100.0, 100.0));
    }

    #[test]
    fn conform_pulls_region_into_bounds() {
        let out = conform(Rect::new(-20.0, 10.0, 100.0, 400.0), &bounds(), &c());
        assert_satisfies(out, &bounds(), Some(&c()));
    }

    #[test]
    fn rederive_scales_with_layout() {
        let old = Rect::new(0.0, 150.0, 300.0, 300.0);
        let new = Rect::new(100.0, 0.0, 600.0, 600.0);
        let region = Rect::new(30.0, 180.0, 240.0, 240.0);
        let out = rederive(region, &old, &new, &c()).unwrap();
        assert_rect_close(out, Rect::new(160.0, 60.0, 480.0, 480.0));
    }

    #[test]
    fn rederive_restores_minimum_after_shrink() {
        let old = Rect::new(0.0, 0.0, 600.0, 600.0);
        let new = Rect::new(0.0, 0.0, 300.0, 300.0);
        let region = Rect::new(100.0, 100.0, 160.0, 160.0);
        let out = rederive(region, &old, &new, &c()).unwrap();
        assert_rect_close(out, Rect::new(50.0, 50.0, 150.0, 150.0));
    }

    #[test]
    fn rederive_from_empty_layout_is_none() {
        let region = Rect::new(0.0, 0.0, 150.0, 150.0);
        assert!(rederive(region, &Rect::EMPTY, &bounds(), &c()).is_none());
    }
}
