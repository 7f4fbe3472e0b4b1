//! Gesture math for drag, resize, and rotate.
//!
//! Every function here is pure and computes the overlay geometry from the
//! snapshot taken at pointer-down plus the current pointer position. Nothing is
//! accumulated across pointer moves, so long gestures do not drift.

#[cfg(test)]
#[path = "transform_test.rs"]
mod transform_test;

use crate::camera::Point;
use crate::doc::Overlay;
use crate::hit::ResizeAnchor;

/// Map any angle in degrees into `[0, 360)`. Non-finite input maps to `0`.
#[must_use]
pub fn normalize_degrees(degrees: f64) -> f64 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let r = degrees.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360.
    if r >= 360.0 { 0.0 } else { r }
}

/// Overlay geometry captured at pointer-down, decoupled from any render node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSnapshot {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rotation_degrees: f64,
    /// Pointer position in document space at pointer-down.
    pub pointer: Point,
}

impl GestureSnapshot {
    #[must_use]
    pub fn of(overlay: &Overlay, pointer: Point) -> Self {
        Self {
            x: overlay.x,
            y: overlay.y,
            width: overlay.width,
            height: overlay.height,
            rotation_degrees: overlay.rotation_degrees,
            pointer,
        }
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Snapshot geometry unchanged.
    #[must_use]
    pub fn geometry(&self) -> Geometry {
        Geometry { x: self.x, y: self.y, width: self.width, height: self.height, rotation_degrees: self.rotation_degrees }
    }
}

/// Canonical overlay geometry. Width and height are the true rendered size;
/// there is no separate scale factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rotation_degrees: f64,
}

impl Geometry {
    /// Write this geometry into `overlay`.
    pub fn apply_to(&self, overlay: &mut Overlay) {
        overlay.x = self.x;
        overlay.y = self.y;
        overlay.width = self.width;
        overlay.height = self.height;
        overlay.rotation_degrees = self.rotation_degrees;
    }
}

// =============================================================
// Drag
// =============================================================

/// Translate by the pointer delta since pointer-down.
#[must_use]
pub fn drag(snap: &GestureSnapshot, pointer: Point) -> Geometry {
    Geometry { x: snap.x + (pointer.x - snap.pointer.x), y: snap.y + (pointer.y - snap.pointer.y), ..snap.geometry() }
}

// =============================================================
// Resize
// =============================================================

fn anchor_signs(anchor: ResizeAnchor) -> (f64, f64) {
    match anchor {
        ResizeAnchor::Nw => (-1.0, -1.0),
        ResizeAnchor::Ne => (1.0, -1.0),
        ResizeAnchor::Sw => (-1.0, 1.0),
        ResizeAnchor::Se => (1.0, 1.0),
    }
}

/// Independent x/y scale factors implied by dragging `anchor` from the
/// snapshot pointer to `pointer`, measured in the overlay's rotated frame.
///
/// With `keep_aspect` both axes use the larger factor.
#[must_use]
pub fn resize_scales(snap: &GestureSnapshot, anchor: ResizeAnchor, pointer: Point, keep_aspect: bool) -> (f64, f64) {
    let origin = Point::new(0.0, 0.0);
    let delta = Point::new(pointer.x - snap.pointer.x, pointer.y - snap.pointer.y)
        .rotate_about(origin, -snap.rotation_degrees);
    let (sx, sy) = anchor_signs(anchor);
    let scale_x = (snap.width + sx * delta.x) / snap.width;
    let scale_y = (snap.height + sy * delta.y) / snap.height;
    if keep_aspect {
        let s = scale_x.max(scale_y);
        (s, s)
    } else {
        (scale_x, scale_y)
    }
}

fn floor_size(v: f64, min_size: f64) -> f64 {
    if v.is_finite() { v.max(min_size) } else { min_size }
}

/// Resize by independent scale factors, keeping the corner opposite `anchor`
/// fixed in document space. Width and height never drop below `min_size`.
#[must_use]
pub fn resize(snap: &GestureSnapshot, anchor: ResizeAnchor, scale_x: f64, scale_y: f64, min_size: f64) -> Geometry {
    let width = floor_size(snap.width * scale_x, min_size);
    let height = floor_size(snap.height * scale_y, min_size);

    let (sx, sy) = anchor_signs(anchor);
    let rot = snap.rotation_degrees;
    let origin = Point::new(0.0, 0.0);
    let c = snap.center();

    let fixed_local = Point::new(-sx * snap.width / 2.0, -sy * snap.height / 2.0).rotate_about(origin, rot);
    let fixed = Point::new(c.x + fixed_local.x, c.y + fixed_local.y);

    let half = Point::new(sx * width / 2.0, sy * height / 2.0).rotate_about(origin, rot);
    let center = Point::new(fixed.x + half.x, fixed.y + half.y);

    Geometry { x: center.x - width / 2.0, y: center.y - height / 2.0, width, height, rotation_degrees: rot }
}

// =============================================================
// Rotate
// =============================================================

/// Rotation taken directly from the pointer angle about the overlay center.
///
/// The rotate handle sits above the top edge, so a pointer straight above the
/// center is `0°` and a pointer to its right is `90°`.
#[must_use]
pub fn rotate(snap: &GestureSnapshot, pointer: Point) -> Geometry {
    let c = snap.center();
    let angle = (pointer.y - c.y).atan2(pointer.x - c.x).to_degrees() + 90.0;
    Geometry { rotation_degrees: normalize_degrees(angle), ..snap.geometry() }
}
