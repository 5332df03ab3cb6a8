//! Gesture handling and the owning crop editor.
//!
//! [`DragSession`] is the per-gesture state machine:
//!
//! ```text
//!            begin(handle)              finish / cancel
//!   Idle  ─────────────────▶ Dragging ─────────────────▶ Idle
//!                             │    ▲
//!                             └────┘ update(point)
//! ```
//!
//! While dragging, every update re-solves from the region captured at
//! `begin`, with the delta measured from the gesture's start point. Solving
//! from the previous frame instead lets repeated clamping drift the region.
//!
//! A `begin` while already dragging is ignored: the first gesture keeps
//! ownership until it ends.
//!
//! [`CropEditor`] owns the image dimensions, container size, layout, committed
//! region, and drag session. The UI pushes size changes and pointer events in
//! and reads back the layout and live region to render.

use crate::config::CropConfig;
use crate::geometry::{
    self, Constraints, GeometryError, Handle, ImageDimensions, Layout, PixelRect, Point, Region,
    Size,
};
use log::{debug, trace, warn};

/// Pointer phase as delivered by the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Start,
    Move,
    End,
}

/// A pointer event in container-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub point: Point,
    pub phase: Phase,
}

impl PointerEvent {
    pub fn start(x: f64, y: f64) -> Self {
        Self {
            point: Point::new(x, y),
            phase: Phase::Start,
        }
    }

    pub fn moved(x: f64, y: f64) -> Self {
        Self {
            point: Point::new(x, y),
            phase: Phase::Move,
        }
    }

    pub fn end(x: f64, y: f64) -> Self {
        Self {
            point: Point::new(x, y),
            phase: Phase::End,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        handle: Handle,
        /// Pointer position at gesture start.
        origin: Point,
        /// Region at gesture start; every update solves from here.
        base: Region,
        /// Most recent solver output.
        current: Region,
    },
}

#[derive(Debug, Clone, Default)]
pub struct DragSession {
    state: DragState,
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub fn active_handle(&self) -> Option<Handle> {
        match self.state {
            DragState::Dragging { handle, .. } => Some(handle),
            DragState::Idle => None,
        }
    }

    /// Start a gesture on `handle`. Returns `false` (and changes nothing)
    /// if a gesture is already in progress.
    pub fn begin(&mut self, handle: Handle, origin: Point, region: Region) -> bool {
        if let DragState::Dragging { handle: active, .. } = self.state {
            warn!("ignoring {handle} gesture while {active} is being dragged");
            return false;
        }
        debug!("drag begin: {handle} at ({:.1}, {:.1})", origin.x, origin.y);
        self.state = DragState::Dragging {
            handle,
            origin,
            base: region,
            current: region,
        };
        true
    }

    /// Solve for the pointer now being at `point`. `None` when idle.
    pub fn update(
        &mut self,
        point: Point,
        bounds: &Layout,
        constraints: &Constraints,
    ) -> Option<Region> {
        let DragState::Dragging {
            handle,
            origin,
            base,
            ..
        } = self.state
        else {
            return None;
        };
        let next = geometry::resolve(
            base,
            handle,
            point.x - origin.x,
            point.y - origin.y,
            bounds,
            constraints,
        );
        trace!(
            "drag {handle}: x={:.1} y={:.1} w={:.1} h={:.1}",
            next.x, next.y, next.width, next.height
        );
        self.state = DragState::Dragging {
            handle,
            origin,
            base,
            current: next,
        };
        Some(next)
    }

    /// End the gesture, returning the region to commit.
    pub fn finish(&mut self) -> Option<Region> {
        match std::mem::take(&mut self.state) {
            DragState::Dragging {
                handle, current, ..
            } => {
                debug!(
                    "drag end: {handle} committed {:.1}x{:.1} at ({:.1}, {:.1})",
                    current.width, current.height, current.x, current.y
                );
                Some(current)
            }
            DragState::Idle => None,
        }
    }

    /// Abandon the gesture, returning the region it started from.
    pub fn cancel(&mut self) -> Option<Region> {
        match std::mem::take(&mut self.state) {
            DragState::Dragging { handle, base, .. } => {
                debug!("drag cancelled: {handle}");
                Some(base)
            }
            DragState::Idle => None,
        }
    }
}

/// Owns everything the crop screen needs: image size, container size, the
/// fitted layout, the committed region, and the active gesture.
#[derive(Debug, Clone)]
pub struct CropEditor {
    constraints: Constraints,
    initial_fill: f64,
    handle_tolerance: f64,
    image: Option<ImageDimensions>,
    container: Size,
    layout: Layout,
    region: Option<Region>,
    drag: DragSession,
}

impl CropEditor {
    pub fn new(config: &CropConfig) -> Self {
        Self {
            constraints: config.constraints(),
            initial_fill: config.initial_fill,
            handle_tolerance: config.handle_tolerance,
            image: None,
            container: Size::default(),
            layout: Layout::EMPTY,
            region: None,
            drag: DragSession::new(),
        }
    }

    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    pub fn image(&self) -> Option<ImageDimensions> {
        self.image
    }

    pub fn container(&self) -> Size {
        self.container
    }

    /// True once both the image and the container have positive size.
    pub fn is_ready(&self) -> bool {
        !self.layout.is_empty()
    }

    /// The fitted image rectangle, if ready.
    pub fn layout(&self) -> Option<Layout> {
        self.is_ready().then_some(self.layout)
    }

    /// The region to draw: the in-flight solve while dragging, otherwise the
    /// committed region.
    pub fn region(&self) -> Option<Region> {
        match self.drag.state() {
            DragState::Dragging { current, .. } => Some(*current),
            DragState::Idle => self.region,
        }
    }

    /// The region as of the last completed gesture.
    pub fn committed_region(&self) -> Option<Region> {
        self.region
    }

    pub fn drag_session(&self) -> &DragSession {
        &self.drag
    }

    /// Load a new photo. The crop starts over at the initial square, even
    /// when the dimensions match the previous photo.
    pub fn set_image(&mut self, image: ImageDimensions) {
        self.image = Some(image);
        self.drag.cancel();
        self.region = None;
        self.relayout();
        if self.region.is_none() {
            self.reset_region();
        }
    }

    pub fn set_container(&mut self, container: Size) {
        self.container = container;
        self.relayout();
    }

    /// Put the region back to its initial centered square.
    pub fn reset_region(&mut self) {
        self.drag.cancel();
        self.region = self
            .layout()
            .map(|layout| geometry::initial_region(&layout, &self.constraints, self.initial_fill));
    }

    fn relayout(&mut self) {
        let old = self.layout;
        self.layout = match self.image {
            Some(image) => geometry::fit(self.container, image),
            None => Layout::EMPTY,
        };
        if self.layout == old {
            return;
        }
        // The gesture's base region belongs to the old layout.
        self.drag.cancel();

        if self.layout.is_empty() {
            debug!("layout not ready");
            self.region = None;
            return;
        }
        debug!(
            "layout {:.1}x{:.1} at ({:.1}, {:.1})",
            self.layout.width, self.layout.height, self.layout.x, self.layout.y
        );
        let region = self
            .region
            .and_then(|region| geometry::rederive(region, &old, &self.layout, &self.constraints))
            .unwrap_or_else(|| {
                geometry::initial_region(&self.layout, &self.constraints, self.initial_fill)
            });
        self.region = Some(region);
    }

    /// Start dragging `handle` from `point`. Returns `false` when not ready or
    /// when another gesture is active.
    pub fn begin_drag(&mut self, handle: Handle, point: Point) -> bool {
        match self.region {
            Some(region) if self.is_ready() => self.drag.begin(handle, point, region),
            _ => false,
        }
    }

    /// Continue the active gesture. Returns the live region.
    pub fn drag_to(&mut self, point: Point) -> Option<Region> {
        self.drag.update(point, &self.layout, &self.constraints)
    }

    /// Finish the active gesture and commit its last region.
    pub fn end_drag(&mut self) -> Option<Region> {
        let committed = self.drag.finish()?;
        self.region = Some(committed);
        Some(committed)
    }

    /// Dispatch a raw pointer event.
    ///
    /// `Start` hit-tests the region to pick a handle; a start that misses
    /// every handle starts nothing, and the following moves are ignored.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Option<Region> {
        match event.phase {
            Phase::Start => {
                let region = self.region?;
                let handle = geometry::hit_test(event.point, &region, self.handle_tolerance)?;
                self.begin_drag(handle, event.point).then_some(region)
            }
            Phase::Move => self.drag_to(event.point),
            Phase::End => {
                if self.drag.is_dragging() {
                    self.drag_to(event.point);
                }
                self.end_drag()
            }
        }
    }

    /// Run a complete gesture on `handle` by `(dx, dy)` and commit it.
    pub fn apply_drag(&mut self, handle: Handle, dx: f64, dy: f64) -> Option<Region> {
        let region = self.region?;
        let origin = geometry::handle_position(&region, handle);
        if !self.begin_drag(handle, origin) {
            return None;
        }
        self.drag_to(Point::new(origin.x + dx, origin.y + dy));
        self.end_drag()
    }

    /// The committed region in source-image pixels, ready for export.
    pub fn pixel_rect(&self) -> Result<PixelRect, GeometryError> {
        match (self.image, self.region) {
            (Some(image), Some(region)) => {
                geometry::screen_rect_to_image_pixels(&region, &self.layout, image)
            }
            _ => Err(GeometryError::NotReady),
        }
    }
}
