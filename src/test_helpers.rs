//! Shared test utilities for the geometry and session tests.
//!
//! Floating-point geometry never lands exactly, so everything here compares
//! with a small epsilon and panics with both values on a miss.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_helpers::*;
//!
//! let out = resolve(base, Handle::TopLeft, -20.0, -20.0, &bounds, &constraints);
//! assert_rect_close(out, Rect::new(10.0, 10.0, 200.0, 200.0));
//! assert_satisfies(out, &bounds, Some(&constraints));
//! ```

use crate::geometry::{Constraints, Rect};

pub const EPS: f64 = 1e-6;

// =========================================================================
// Scalar and rect comparisons
// =========================================================================

/// Assert two floats agree within [`EPS`].
#[track_caller]
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() <= EPS,
        "expected {expected}, got {actual}"
    );
}

/// Assert every field of two rects agrees within [`EPS`].
#[track_caller]
pub fn assert_rect_close(actual: Rect, expected: Rect) {
    let fields = [
        ("x", actual.x, expected.x),
        ("y", actual.y, expected.y),
        ("width", actual.width, expected.width),
        ("height", actual.height, expected.height),
    ];
    for (name, a, e) in fields {
        assert!(
            (a - e).abs() <= EPS,
            "{name} differs: expected {expected:?}, got {actual:?}"
        );
    }
}

// =========================================================================
// Region invariants
// =========================================================================

/// Assert `region` sits inside `bounds` and, when given, honors the minimum
/// size and aspect-ratio range of `constraints`.
#[track_caller]
pub fn assert_satisfies(region: Rect, bounds: &Rect, constraints: Option<&Constraints>) {
    assert!(
        bounds.contains_rect(&region, EPS),
        "region {region:?} escapes bounds {bounds:?}"
    );
    let Some(c) = constraints else {
        return;
    };
    assert!(
        region.width >= c.min_size - EPS && region.height >= c.min_size - EPS,
        "region {region:?} is smaller than min size {}",
        c.min_size
    );
    let ratio = region.aspect_ratio();
    assert!(
        ratio >= c.min_aspect_ratio - EPS && ratio <= c.max_aspect_ratio + EPS,
        "region {region:?} has ratio {ratio}, outside [{}, {}]",
        c.min_aspect_ratio,
        c.max_aspect_ratio
    );
}
