//! Crop and tag geometry. Pure functions, no I/O, no framework types.
//!
//! | Piece | Module | Entry point |
//! |---|---|---|
//! | **Layout fitter** | `fit` | [`fit`] |
//! | **Constraint solver** | `solver` | [`resolve`] |
//! | **Handle hit-testing** | `handles` | [`hit_test`] |
//! | **Coordinate mapper** | `mapping` | [`screen_to_percent`], [`screen_rect_to_image_pixels`] |
//!
//! Data flows one way: the fitter's [`Layout`] is the basis for both the
//! solver's bounds and the mapper's transform. Nothing here keeps state; the
//! [`session`](crate::session) module owns the current layout and region.

mod fit;
mod handles;
mod mapping;
mod solver;
mod types;

pub use fit::fit;
pub use handles::{handle_position, hit_test};
pub use mapping::{
    GeometryError, image_pixels_to_screen_rect, percent_to_screen, screen_rect_to_image_pixels,
    screen_to_percent, screen_to_percent_inset,
};
pub use solver::{
    Constraints, Handle, ParseHandleError, conform, initial_region, rederive, resolve,
};
pub use types::{
    ImageDimensions, Layout, NormalizedPoint, PixelRect, Point, Rect, Region, Size,
};
