//! Hit-testing and placement of region handles.

use super::solver::Handle;
use super::types::{Point, Region};

/// Find the handle under `point`, if any.
///
/// Corners win over edges, edges win over the move area. Corners and edges
/// are hit within `tolerance`; edges only between their two corners. The
/// move area is the strict interior of the region.
pub fn hit_test(point: Point, region: &Region, tolerance: f64) -> Option<Handle> {
    const CORNERS: [Handle; 4] = [
        Handle::TopLeft,
        Handle::TopRight,
        Handle::BottomLeft,
        Handle::BottomRight,
    ];
    if let Some(corner) = CORNERS
        .into_iter()
        .find(|&h| point.distance(handle_position(region, h)) < tolerance)
    {
        return Some(corner);
    }

    let within_x = point.x > region.x && point.x < region.right();
    let within_y = point.y > region.y && point.y < region.bottom();

    if within_y && (point.x - region.x).abs() < tolerance {
        return Some(Handle::Left);
    }
    if within_y && (point.x - region.right()).abs() < tolerance {
        return Some(Handle::Right);
    }
    if within_x && (point.y - region.y).abs() < tolerance {
        return Some(Handle::Top);
    }
    if within_x && (point.y - region.bottom()).abs() < tolerance {
        return Some(Handle::Bottom);
    }

    region.contains_strictly(point).then_some(Handle::Move)
}

/// Where a handle is drawn: corners, edge midpoints, and the center for `Move`.
pub fn handle_position(region: &Region, handle: Handle) -> Point {
    let cx = region.x + region.width / 2.0;
    let cy = region.y + region.height / 2.0;
    match handle {
        Handle::Move => Point::new(cx, cy),
        Handle::TopLeft => Point::new(region.x, region.y),
        Handle::Top => Point::new(cx, region.y),
        Handle::TopRight => Point::new(region.right(), region.y),
        Handle::Right => Point::new(region.right(), cy),
        Handle::BottomRight => Point::new(region.right(), region.bottom()),
        Handle::Bottom => Point::new(cx, region.bottom()),
        Handle::BottomLeft => Point::new(region.x, region.bottom()),
        Handle::Left => Point::new(region.x, cy),
    }
}
