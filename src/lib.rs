//! # Tagcrop
//!
//! Geometry engine for an interactive photo editor: fit a photo into a
//! viewport, let the user drag a crop region around under constraints, map
//! taps to stable tag positions, and export the crop in source pixels.
//!
//! # Architecture: One-Way Data Flow
//!
//! ```text
//! container + image dims ──fit──▶ Layout
//!                                   │
//!         ┌─────────────────────────┼──────────────────────────┐
//!         ▼                         ▼                          ▼
//!   solver bounds            tap → percent                region → pixels
//!  (drag sessions)          (tag placement)               (crop export)
//! ```
//!
//! The [`Layout`](geometry::Layout) is the single basis for every other
//! computation. Whenever the container or image changes it is recomputed,
//! and everything derived from it (the crop region, tag screen positions)
//! is derived again rather than patched.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`geometry`] | Pure math: layout fitter, constraint solver, handle hit-testing, coordinate mapper |
//! | [`session`] | Drag state machine and the [`CropEditor`](session::CropEditor) that owns layout + region |
//! | [`tags`] | Product tags: tap-to-place, metadata edits, removal, render positions |
//! | [`imaging`] | Image probe and crop export behind the [`ImageBackend`](imaging::ImageBackend) trait |
//! | [`config`] | `tagcrop.toml` loading, merging over stock defaults, and validation |
//! | [`output`] | CLI output formatting for each command |
//!
//! # Design Decisions
//!
//! ## Screen Space Is Authoritative
//!
//! The crop region lives in screen units, because that is where the user's
//! fingers are and where the minimum size makes sense. Source pixels only
//! appear at export time, through
//! [`screen_rect_to_image_pixels`](geometry::screen_rect_to_image_pixels).
//! Tags, on the other hand, are stored as percentages of the image so they
//! survive rotation, resizing and re-layout untouched.
//!
//! ## Constraint Precedence
//!
//! Bounds containment beats the minimum size, which beats the aspect-ratio
//! range. On a photo whose fitted layout is smaller than the minimum crop
//! size, the region simply fills the layout on that axis.
//!
//! ## Solving From the Gesture Base
//!
//! Every pointer move re-solves from the region captured when the gesture
//! began plus the total displacement, never from the previous frame. A drag
//! that overshoots a wall and comes back returns exactly to where it started.

pub mod config;
pub mod geometry;
pub mod imaging;
pub mod output;
pub mod session;
pub mod tags;

#[cfg(test)]
pub(crate) mod test_helpers;
