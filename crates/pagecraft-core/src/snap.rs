//! Snap functionality for aligning elements to the grid, the canvas center
//! and each other.

use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// Grid size for snapping (matches the visual grid).
pub const GRID_SIZE: f64 = 10.0;

/// Distance within which magnetic alignment snaps.
pub const SNAP_THRESHOLD: f64 = 5.0;

/// Snap mode for aligning elements to grid or other elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapMode {
    /// No snapping.
    None,
    /// Snap to grid intersections.
    Grid,
    /// Snap to other elements and the canvas center.
    Elements,
    /// Snap to both grid and elements.
    #[default]
    All,
}

impl SnapMode {
    /// Cycle to the next snap mode.
    pub fn next(self) -> Self {
        match self {
            SnapMode::None => SnapMode::Grid,
            SnapMode::Grid => SnapMode::Elements,
            SnapMode::Elements => SnapMode::All,
            SnapMode::All => SnapMode::None,
        }
    }

    /// Check if grid snapping is enabled.
    pub fn snaps_to_grid(self) -> bool {
        matches!(self, SnapMode::Grid | SnapMode::All)
    }

    /// Check if magnetic alignment is enabled.
    pub fn snaps_to_elements(self) -> bool {
        matches!(self, SnapMode::Elements | SnapMode::All)
    }

    /// Check if any snapping is enabled.
    pub fn is_enabled(self) -> bool {
        self != SnapMode::None
    }
}

/// Result of a snap operation.
#[derive(Debug, Clone, Copy)]
pub struct SnapResult {
    /// The snapped point.
    pub point: Point,
    /// Whether the X coordinate was snapped.
    pub snapped_x: bool,
    /// Whether the Y coordinate was snapped.
    pub snapped_y: bool,
}

impl SnapResult {
    /// Create a result with no snapping.
    pub fn none(point: Point) -> Self {
        Self {
            point,
            snapped_x: false,
            snapped_y: false,
        }
    }

    /// Check if any snapping occurred.
    pub fn is_snapped(&self) -> bool {
        self.snapped_x || self.snapped_y
    }
}

/// Snap a single coordinate to the nearest grid line.
pub fn snap_value(value: f64, grid_size: f64) -> f64 {
    if grid_size <= 0.0 {
        return value;
    }
    (value / grid_size).round() * grid_size
}

/// Snap a point to the nearest grid intersection.
pub fn snap_to_grid(point: Point, grid_size: f64) -> SnapResult {
    SnapResult {
        point: Point::new(snap_value(point.x, grid_size), snap_value(point.y, grid_size)),
        snapped_x: true,
        snapped_y: true,
    }
}

/// Snap a point based on the current snap mode (grid pass only).
pub fn snap_point(point: Point, mode: SnapMode, grid_size: f64) -> SnapResult {
    if mode.snaps_to_grid() {
        snap_to_grid(point, grid_size)
    } else {
        SnapResult::none(point)
    }
}

/// Alignment guides to draw while dragging.
///
/// Vertical guides are x coordinates, horizontal guides are y coordinates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Guides {
    pub vertical: Vec<f64>,
    pub horizontal: Vec<f64>,
}

impl Guides {
    pub fn is_empty(&self) -> bool {
        self.vertical.is_empty() && self.horizontal.is_empty()
    }

    pub fn clear(&mut self) {
        self.vertical.clear();
        self.horizontal.clear();
    }
}

/// Another element the dragged one can align with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignTarget {
    /// Top-left corner at the active breakpoint.
    pub origin: Point,
    /// Pixel width, if known.
    pub width: Option<f64>,
    /// Pixel height, if known.
    pub height: Option<f64>,
}

impl AlignTarget {
    /// Bounds, borrowing unknown dimensions from `fallback`.
    pub fn bounds(&self, fallback: Size) -> Rect {
        Rect::from_origin_size(
            self.origin,
            Size::new(
                self.width.unwrap_or(fallback.width),
                self.height.unwrap_or(fallback.height),
            ),
        )
    }
}

/// Result of magnetic alignment.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignResult {
    /// Adjusted top-left corner.
    pub origin: Point,
    /// Guides for every alignment that fired.
    pub guides: Guides,
}

/// Magnetically align an element of `size` whose top-left is `origin`.
///
/// First the element's horizontal center snaps to the canvas center, then
/// each target is tested in turn for top edge, vertical center, left edge
/// and horizontal center. A test fires when the distance is at most
/// `threshold`; a fired test moves the working position before the next
/// test runs. Targets with unknown dimensions borrow the dragged element's.
pub fn align_to_targets(
    origin: Point,
    size: Size,
    canvas_width: Option<f64>,
    targets: &[AlignTarget],
    threshold: f64,
) -> AlignResult {
    let mut x = origin.x;
    let mut y = origin.y;
    let mut guides = Guides::default();

    if let Some(canvas_width) = canvas_width {
        let canvas_center = canvas_width / 2.0;
        if (x + size.width / 2.0 - canvas_center).abs() <= threshold {
            x = canvas_center - size.width / 2.0;
            guides.vertical.push(canvas_center);
        }
    }

    for target in targets {
        let bounds = target.bounds(size);

        if (y - bounds.y0).abs() <= threshold {
            y = bounds.y0;
            guides.horizontal.push(bounds.y0);
        }

        let other_center_y = bounds.y0 + bounds.height() / 2.0;
        if (y + size.height / 2.0 - other_center_y).abs() <= threshold {
            y = other_center_y - size.height / 2.0;
            guides.horizontal.push(other_center_y);
        }

        if (x - bounds.x0).abs() <= threshold {
            x = bounds.x0;
            guides.vertical.push(bounds.x0);
        }

        let other_center_x = bounds.x0 + bounds.width() / 2.0;
        if (x + size.width / 2.0 - other_center_x).abs() <= threshold {
            x = other_center_x - size.width / 2.0;
            guides.vertical.push(other_center_x);
        }
    }

    AlignResult {
        origin: Point::new(x, y),
        guides,
    }
}
