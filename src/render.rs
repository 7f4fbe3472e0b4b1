//! Scene projection: what to draw for the current engine state.
//!
//! This module never touches a drawing surface. It reads the engine and
//! produces a [`Scene`], a flat description of the stage, the page image, the
//! overlays, and the selection UI. The host's drawing layer walks the scene
//! each frame; nothing here mutates application state.
//!
//! Page, overlays, and side-artifact lines all live in the page's unrotated
//! frame. The host applies [`PageGroup`] (rotation about the page box center)
//! and then the stage scale.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::camera::Point;
use crate::consts::{SIDE_ARTIFACT_INSET_PX, SIDE_ARTIFACT_LINES, SIDE_ARTIFACT_SPACING_PX, SIDE_ARTIFACT_STROKE_PX};
use crate::doc::{Overlay, OverlayId};
use crate::effects::{Effect, FilterKind};
use crate::engine::Engine;
use crate::fit::PageLayout;
use crate::hit::{ResizeAnchor, corner_handles, rotate_handle};
use crate::page::{ImageState, Orientation, PageBox};
use crate::palette::Palette;

/// How an image-backed node should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeImage {
    Ready,
    /// Still loading; draw a placeholder.
    Loading,
    /// Load failed; draw a placeholder.
    Failed,
}

impl From<&ImageState> for NodeImage {
    fn from(state: &ImageState) -> Self {
        match state {
            ImageState::Pending => Self::Loading,
            ImageState::Loaded(_) => Self::Ready,
            ImageState::Failed(_) => Self::Failed,
        }
    }
}

/// Rotation applied to everything drawn on the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGroup {
    pub center: Point,
    pub rotation_degrees: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageNode {
    pub index: usize,
    pub source: String,
    pub image: NodeImage,
    /// Image rectangle inside the page box.
    pub layout: PageLayout,
    pub filters: Vec<FilterKind>,
}

/// One overlay image in document units.
///
/// `x`/`y` is the top-left of the unrotated box. `rotation_degrees` turns the
/// box clockwise about its center, see [`OverlayNode::pivot`]. Hosts whose
/// transforms pivot at the top-left should translate to the pivot, rotate,
/// then draw at `(-width / 2, -height / 2)`.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayNode {
    pub id: OverlayId,
    pub source_url: String,
    pub image: NodeImage,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rotation_degrees: f64,
    pub selected: bool,
}

impl OverlayNode {
    /// Rotation center of the node.
    #[must_use]
    pub fn pivot(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Transformer UI around the selected overlay, in document units.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionFrame {
    pub overlay_id: OverlayId,
    pub corners: [(ResizeAnchor, Point); 4],
    pub rotate_handle: Point,
    pub handle_radius: f64,
}

/// A straight stroke from `(points[0], points[1])` to `(points[2], points[3])`.
#[derive(Debug, Clone, PartialEq)]
pub struct LineNode {
    pub points: [f64; 4],
    pub stroke: &'static str,
    pub stroke_width: f64,
}

/// Everything the host needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// Stage size in viewport pixels.
    pub stage_width: f64,
    pub stage_height: f64,
    pub scale: f64,
    pub group: PageGroup,
    /// `None` when no document is loaded.
    pub page: Option<PageNode>,
    /// Bottom first.
    pub overlays: Vec<OverlayNode>,
    pub selection: Option<SelectionFrame>,
    pub artifact_lines: Vec<LineNode>,
}

/// Project the engine's current state into a [`Scene`].
///
/// The overlay under an active gesture is drawn at its preview geometry.
#[must_use]
pub fn build_scene(engine: &Engine, palette: &Palette) -> Scene {
    let page_box = engine.doc.page_box();
    let scale = engine.camera.preview_scale;
    let current = engine.doc.current_page();

    let page = engine.doc.page(current).map(|p| PageNode {
        index: current,
        source: p.source.clone(),
        image: NodeImage::from(&p.image),
        layout: engine
            .doc
            .effective_layout(current)
            .unwrap_or_else(|| PageLayout::full_box(page_box.width, page_box.height)),
        filters: engine.page_filters(),
    });

    let selected = engine.selection();
    let visible = engine.visible_overlays();
    let overlays = visible.iter().map(|o| overlay_node(engine, o, selected == Some(o.id))).collect();

    let selection = visible.iter().find(|o| selected == Some(o.id)).map(|o| SelectionFrame {
        overlay_id: o.id,
        corners: corner_handles(o),
        rotate_handle: rotate_handle(o, engine.camera.viewport_dist_to_stage(engine.config.rotate_handle_offset_px)),
        handle_radius: engine.camera.viewport_dist_to_stage(engine.config.handle_radius_px),
    });

    let artifact_lines = if page.is_some() && engine.effects.contains(&Effect::SideArtifact) {
        side_artifact_lines(page_box, engine.doc.orientation(), palette)
    } else {
        Vec::new()
    };

    Scene {
        stage_width: page_box.width * scale,
        stage_height: page_box.height * scale,
        scale,
        group: PageGroup { center: page_box.center(), rotation_degrees: engine.doc.rotation_degrees() },
        page,
        overlays,
        selection,
        artifact_lines,
    }
}

fn overlay_node(engine: &Engine, overlay: &Overlay, selected: bool) -> OverlayNode {
    OverlayNode {
        id: overlay.id,
        source_url: overlay.source_url.clone(),
        image: NodeImage::from(engine.overlay_image(&overlay.id)),
        x: overlay.x,
        y: overlay.y,
        width: overlay.width,
        height: overlay.height,
        rotation_degrees: overlay.rotation_degrees,
        selected,
    }
}

/// Toner lines along the binding edge: vertical on portrait pages, horizontal
/// on landscape pages.
#[must_use]
pub fn side_artifact_lines(page_box: PageBox, orientation: Orientation, palette: &Palette) -> Vec<LineNode> {
    (0..SIDE_ARTIFACT_LINES)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let offset = SIDE_ARTIFACT_SPACING_PX * i as f64 + SIDE_ARTIFACT_INSET_PX;
            let points = match orientation {
                Orientation::Portrait => [offset, SIDE_ARTIFACT_INSET_PX, offset, page_box.height],
                Orientation::Landscape => [SIDE_ARTIFACT_INSET_PX, offset, page_box.width, offset],
            };
            LineNode { points, stroke: palette.line_color(i), stroke_width: SIDE_ARTIFACT_STROKE_PX }
        })
        .collect()
}
