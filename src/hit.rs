#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::Point;
use crate::doc::{Overlay, OverlayId, OverlayStore};

/// Which part of an overlay was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    ResizeHandle(ResizeAnchor),
    RotateHandle,
}

/// Corner handle used for resizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeAnchor {
    Nw,
    Ne,
    Sw,
    Se,
}

impl ResizeAnchor {
    /// Cursor name for hovering this handle.
    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::Nw | Self::Se => "nwse-resize",
            Self::Ne | Self::Sw => "nesw-resize",
        }
    }
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub overlay_id: OverlayId,
    pub part: HitPart,
}

/// Handle sizes in document units (screen sizes divided by the preview scale).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitSlop {
    pub handle_radius: f64,
    pub rotate_offset: f64,
}

/// Corner handle positions of `overlay` in document space.
#[must_use]
pub fn corner_handles(overlay: &Overlay) -> [(ResizeAnchor, Point); 4] {
    let c = overlay.center();
    let hw = overlay.width / 2.0;
    let hh = overlay.height / 2.0;
    let at = |dx: f64, dy: f64| Point::new(c.x + dx, c.y + dy).rotate_about(c, overlay.rotation_degrees);
    [
        (ResizeAnchor::Nw, at(-hw, -hh)),
        (ResizeAnchor::Ne, at(hw, -hh)),
        (ResizeAnchor::Sw, at(-hw, hh)),
        (ResizeAnchor::Se, at(hw, hh)),
    ]
}

/// Rotate handle position of `overlay` in document space: `offset` above the top edge center.
#[must_use]
pub fn rotate_handle(overlay: &Overlay, offset: f64) -> Point {
    let c = overlay.center();
    Point::new(c.x, c.y - overlay.height / 2.0 - offset).rotate_about(c, overlay.rotation_degrees)
}

/// Whether `pt` lies inside the rotated box of `overlay`.
#[must_use]
pub fn contains(overlay: &Overlay, pt: Point) -> bool {
    let c = overlay.center();
    let local = pt.rotate_about(c, -overlay.rotation_degrees);
    (local.x - c.x).abs() <= overlay.width / 2.0 && (local.y - c.y).abs() <= overlay.height / 2.0
}

fn near(a: Point, b: Point, radius: f64) -> bool {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    dx * dx + dy * dy <= radius * radius
}

/// Test which overlay on `page_index` (if any) is under `doc_pt`.
///
/// Handles of the selected overlay win over any body. Bodies are tested
/// topmost first, i.e. in reverse insertion order.
#[must_use]
pub fn hit_test(doc_pt: Point, store: &OverlayStore, page_index: usize, slop: HitSlop) -> Option<Hit> {
    if let Some(sel) = store.selected().filter(|o| o.page_index == page_index) {
        if near(doc_pt, rotate_handle(sel, slop.rotate_offset), slop.handle_radius) {
            return Some(Hit { overlay_id: sel.id, part: HitPart::RotateHandle });
        }
        for (anchor, p) in corner_handles(sel) {
            if near(doc_pt, p, slop.handle_radius) {
                return Some(Hit { overlay_id: sel.id, part: HitPart::ResizeHandle(anchor) });
            }
        }
    }

    store
        .list_for_page(page_index)
        .into_iter()
        .rev()
        .find(|o| contains(o, doc_pt))
        .map(|o| Hit { overlay_id: o.id, part: HitPart::Body })
}
