//! CLI output formatting for every command.
//!
//! # Output Format
//!
//! ## Fit
//!
//! ```text
//! Image     1200x1200
//! Container 300.0x600.0
//! Layout    300.0x300.0 at (0.0, 150.0)
//! Region    240.0x240.0 at (30.0, 180.0)
//! ```
//!
//! ## Crop
//!
//! ```text
//! Layout    300.0x300.0 at (0.0, 150.0)
//! 001 bottom-right +100.0,+100.0 → 270.0x270.0 at (30.0, 180.0)
//! 002 move -50.0,+0.0 → 270.0x270.0 at (0.0, 180.0)
//! Region    270.0x270.0 at (0.0, 180.0)
//! Pixels    1080x1080+0+120
//! Exported → crop.png
//! ```
//!
//! ## Tag
//!
//! ```text
//! 001 Wool jacket ($129.00)
//!     Id: dot-0-50.00-25.00
//!     At: 50.00%, 25.00% → (150.0, 225.0)
//!     Url: https://shop.example/jacket
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::geometry::{Handle, ImageDimensions, Layout, PixelRect, Rect, Region};
use crate::session::CropEditor;
use crate::tags::{Dot, TagBoard};
use std::path::Path;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// A labelled line with the value aligned past the longest label.
fn labelled(label: &str, value: &str) -> String {
    format!("{:<9} {}", label, value)
}

/// `300.0x300.0 at (0.0, 150.0)`
pub fn format_rect(rect: &Rect) -> String {
    format!(
        "{:.1}x{:.1} at ({:.1}, {:.1})",
        rect.width, rect.height, rect.x, rect.y
    )
}

/// `960x960+120+120`, the usual geometry notation for a crop.
pub fn format_pixel_rect(rect: &PixelRect) -> String {
    format!("{}x{}+{}+{}", rect.width, rect.height, rect.x, rect.y)
}

fn optional_rect(rect: Option<Rect>) -> String {
    rect.map_or_else(|| "not ready".to_string(), |r| format_rect(&r))
}

/// Dot header: title plus price when known.
///
/// ```text
/// 001 Wool jacket ($129.00)
/// 002 Scarf
/// 003 (untitled)
/// ```
fn dot_header(index: usize, dot: &Dot) -> String {
    let title = if dot.title.is_empty() {
        "(untitled)"
    } else {
        dot.title.as_str()
    };
    if dot.price.is_empty() {
        format!("{} {}", format_index(index), title)
    } else {
        format!(
            "{} {} ({}{})",
            format_index(index),
            title,
            dot.currency,
            dot.price
        )
    }
}

// ============================================================================
// fit
// ============================================================================

/// Format the layout and initial region computed for an image.
pub fn format_fit_output(image: ImageDimensions, editor: &CropEditor) -> Vec<String> {
    let container = editor.container();
    vec![
        labelled("Image", &format!("{}x{}", image.width, image.height)),
        labelled(
            "Container",
            &format!("{:.1}x{:.1}", container.width, container.height),
        ),
        labelled("Layout", &optional_rect(editor.layout())),
        labelled("Region", &optional_rect(editor.region())),
    ]
}

/// Print fit output to stdout.
pub fn print_fit_output(image: ImageDimensions, editor: &CropEditor) {
    for line in format_fit_output(image, editor) {
        println!("{}", line);
    }
}

// ============================================================================
// crop
// ============================================================================

/// One replayed drag gesture and the region it committed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragStep {
    pub handle: Handle,
    pub dx: f64,
    pub dy: f64,
    /// `None` when the gesture could not start.
    pub region: Option<Region>,
}

fn format_drag_step(index: usize, step: &DragStep) -> String {
    format!(
        "{} {} {:+.1},{:+.1} → {}",
        format_index(index),
        step.handle,
        step.dx,
        step.dy,
        step.region
            .map_or_else(|| "ignored".to_string(), |r| format_rect(&r))
    )
}

/// Format the replayed gestures, the final region and the export.
pub fn format_crop_output(
    editor: &CropEditor,
    steps: &[DragStep],
    pixels: &PixelRect,
    output: &Path,
) -> Vec<String> {
    let mut lines = vec![labelled("Layout", &optional_rect(editor.layout()))];
    lines.extend(
        steps
            .iter()
            .enumerate()
            .map(|(i, step)| format_drag_step(i + 1, step)),
    );
    lines.push(labelled("Region", &optional_rect(editor.region())));
    lines.push(labelled("Pixels", &format_pixel_rect(pixels)));
    lines.push(format!("Exported → {}", output.display()));
    lines
}

/// Print crop output to stdout.
pub fn print_crop_output(
    editor: &CropEditor,
    steps: &[DragStep],
    pixels: &PixelRect,
    output: &Path,
) {
    for line in format_crop_output(editor, steps, pixels, output) {
        println!("{}", line);
    }
}

// ============================================================================
// tag
// ============================================================================

/// Format every dot on the board with its screen position at `layout`.
///
/// Dots are listed in creation order. When the layout is not ready the screen
/// position is omitted.
pub fn format_tags(board: &TagBoard, layout: &Layout) -> Vec<String> {
    let positions = board.positions(layout).ok();
    let mut lines = Vec::new();

    for (i, dot) in board.dots().iter().enumerate() {
        lines.push(dot_header(i + 1, dot));
        lines.push(format!("{}Id: {}", indent(1), dot.id));

        let percent = format!(
            "{:.2}%, {:.2}%",
            dot.position.x_percent, dot.position.y_percent
        );
        let at = match positions.as_ref().and_then(|p| p.get(i)) {
            Some((_, point)) => format!("{} → ({:.1}, {:.1})", percent, point.x, point.y),
            None => percent,
        };
        lines.push(format!("{}At: {}", indent(1), at));

        if !dot.url.is_empty() {
            lines.push(format!("{}Url: {}", indent(1), dot.url));
        }
        if dot.has_image() {
            lines.push(format!("{}Image: {}", indent(1), dot.image_url));
        }
    }
    lines
}

/// Print tag output to stdout.
pub fn print_tags(board: &TagBoard, layout: &Layout) {
    for line in format_tags(board, layout) {
        println!("{}", line);
    }
}
