use std::collections::HashMap;

use crate::camera::{Camera, Point};
use crate::config::ViewerConfig;
use crate::consts::MIN_OVERLAY_SIZE_PX;
use crate::doc::{NewOverlay, Overlay, OverlayError, OverlayId, OverlayStore, PartialOverlay, SealKind};
use crate::effects::{EffectSet, FilterBackend, FilterKind, FilterRegistry, page_filters};
use crate::error::ErrorCode;
use crate::fit::FitError;
use crate::hit::{HitPart, HitSlop, hit_test};
use crate::input::{Button, GestureKind, InputState, Modifiers};
use crate::page::{Document, ImageSize, ImageState, LoadError, Orientation, PageError};
use crate::payload::{DropPayload, PayloadError};
use crate::transform::{self, GestureSnapshot};
use crate::units::mm_to_px;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A dropped asset became a new overlay.
    OverlayCreated(Overlay),
    /// A drag, resize, or rotate gesture finished; emitted once per gesture.
    OverlayCommitted(Overlay),
    /// An overlay changed outside of a gesture (explicit edit or deferred sizing).
    OverlayUpdated(Overlay),
    OverlayRemoved(OverlayId),
    SelectionChanged(Option<OverlayId>),
    /// Page layouts were replaced (orientation change, page load, new document).
    LayoutsChanged,
    SetCursor(String),
    RenderNeeded,
}

/// Error returned by fallible engine calls.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Payload(#[from] PayloadError),
    #[error(transparent)]
    Overlay(#[from] OverlayError),
    #[error(transparent)]
    Page(#[from] PageError),
    #[error(transparent)]
    Fit(#[from] FitError),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("overlay {id} is on page {page_index}, not the active page {current_page}")]
    OffPage { id: OverlayId, page_index: usize, current_page: usize },
}

impl ErrorCode for EngineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Payload(e) => e.error_code(),
            Self::Overlay(e) => e.error_code(),
            Self::Page(e) => e.error_code(),
            Self::Fit(e) => e.error_code(),
            Self::Load(e) => e.error_code(),
            Self::OffPage { .. } => "E_OFF_PAGE",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Load(e) if e.retryable())
    }
}

/// Callback invoked once per committed gesture, for external persistence.
pub type CommitHook = Box<dyn FnMut(&Overlay)>;

/// Core engine state: pages, overlays, camera, and the active gesture.
///
/// All pointer positions enter through [`Engine::pointer_to_document`]; all
/// overlay writes go through [`OverlayStore`]. Pointer moves only update the
/// gesture preview; the store sees one write per gesture on release.
pub struct Engine {
    pub config: ViewerConfig,
    pub doc: Document,
    pub overlays: OverlayStore,
    pub camera: Camera,
    pub input: InputState,
    pub effects: EffectSet,
    overlay_images: HashMap<OverlayId, ImageState>,
    filters: FilterRegistry,
    commit_hook: Option<CommitHook>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(ViewerConfig::default())
    }
}

impl Engine {
    #[must_use]
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            config,
            doc: Document::new(config.paper),
            overlays: OverlayStore::new(),
            camera: Camera { origin_x: 0.0, origin_y: 0.0, preview_scale: config.preview_scale },
            input: InputState::default(),
            effects: EffectSet::new(),
            overlay_images: HashMap::new(),
            filters: FilterRegistry::default(),
            commit_hook: None,
        }
    }

    /// One-time registration of custom filters with the host backend.
    pub fn register_custom_filters(&mut self, backend: &mut dyn FilterBackend) -> bool {
        self.filters.register_custom_filters(backend)
    }

    /// Install the callback fired after every gesture commit.
    pub fn set_commit_hook<F>(&mut self, hook: F)
    where
        F: FnMut(&Overlay) + 'static,
    {
        self.commit_hook = Some(Box::new(hook));
    }

    // --- Coordinates ---

    /// Set the stage's top-left corner in viewport pixels.
    pub fn set_stage_origin(&mut self, origin_x: f64, origin_y: f64) {
        self.camera.origin_x = origin_x;
        self.camera.origin_y = origin_y;
    }

    /// Convert a viewport pointer position into the current page's unrotated frame.
    #[must_use]
    pub fn pointer_to_document(&self, viewport: Point) -> Point {
        let stage = self.camera.viewport_to_stage(viewport);
        stage.rotate_about(self.doc.page_box().center(), -self.doc.rotation_degrees())
    }

    /// Inverse of [`Engine::pointer_to_document`].
    #[must_use]
    pub fn document_to_pointer(&self, doc_pt: Point) -> Point {
        let stage = doc_pt.rotate_about(self.doc.page_box().center(), self.doc.rotation_degrees());
        self.camera.stage_to_viewport(stage)
    }

    fn hit_slop(&self) -> HitSlop {
        HitSlop {
            handle_radius: self.camera.viewport_dist_to_stage(self.config.handle_radius_px),
            rotate_offset: self.camera.viewport_dist_to_stage(self.config.rotate_handle_offset_px),
        }
    }

    // --- Pages ---

    /// Replace the document with pending pages for `sources`.
    pub fn load_document<I, S>(&mut self, sources: I) -> Vec<Action>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut actions = self.commit_gesture();
        self.doc.set_pages(sources);
        actions.extend(self.clear_selection());
        actions.push(Action::LayoutsChanged);
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Image loader callback for a page.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::OutOfRange`] for an unknown page index.
    pub fn on_page_loaded(&mut self, index: usize, size: ImageSize) -> Result<Vec<Action>, EngineError> {
        self.doc.on_page_loaded(index, size)?;
        Ok(vec![Action::LayoutsChanged, Action::RenderNeeded])
    }

    /// Image loader failure callback for a page.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::OutOfRange`] for an unknown page index.
    pub fn on_page_load_failed(&mut self, index: usize, error: LoadError) -> Result<Vec<Action>, EngineError> {
        self.doc.on_page_load_failed(index, error)?;
        Ok(vec![Action::RenderNeeded])
    }

    /// Change orientation. An active gesture is committed first.
    pub fn set_orientation(&mut self, orientation: Orientation) -> Vec<Action> {
        if orientation == self.doc.orientation() {
            return Vec::new();
        }
        let mut actions = self.commit_gesture();
        self.doc.set_orientation(orientation);
        actions.push(Action::LayoutsChanged);
        actions.push(Action::RenderNeeded);
        actions
    }

    pub fn toggle_orientation(&mut self) -> Vec<Action> {
        self.set_orientation(self.doc.orientation().toggled())
    }

    /// Switch the active page. Finishes any gesture and drops a selection that
    /// belongs to another page.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::OutOfRange`] for an unknown page index.
    pub fn set_current_page(&mut self, index: usize) -> Result<Vec<Action>, EngineError> {
        self.doc.set_current_page(index)?;
        let mut actions = self.commit_gesture();
        if self.overlays.selected().is_some_and(|o| o.page_index != index) {
            actions.extend(self.clear_selection());
        }
        actions.push(Action::RenderNeeded);
        Ok(actions)
    }

    /// Rotate the page group about the page box center. Commits any active gesture.
    pub fn set_page_rotation(&mut self, degrees: f64) -> Vec<Action> {
        let mut actions = self.commit_gesture();
        self.doc.set_rotation_degrees(degrees);
        actions.push(Action::RenderNeeded);
        actions
    }

    // --- Effects ---

    pub fn set_effects(&mut self, effects: EffectSet) -> Vec<Action> {
        self.effects = effects;
        vec![Action::RenderNeeded]
    }

    /// Filters the host should apply to the page image.
    #[must_use]
    pub fn page_filters(&self) -> Vec<FilterKind> {
        page_filters(&self.effects)
    }

    // --- Drop ---

    /// Create an overlay for `payload` centered on `pointer`, on `page_index`.
    /// The new overlay is selected only when `page_index` is the active page.
    ///
    /// Stamps get a fixed physical size. Other assets are `default_seal_width`
    /// wide with the asset's aspect ratio when `asset_size` is known; otherwise
    /// they start square and are re-proportioned by
    /// [`Engine::on_overlay_image_loaded`].
    ///
    /// # Errors
    ///
    /// Returns [`PageError::OutOfRange`] if `page_index` is not a loaded page.
    pub fn place_overlay(
        &mut self,
        pointer: Point,
        payload: &DropPayload,
        page_index: usize,
        asset_size: Option<ImageSize>,
    ) -> Result<Overlay, EngineError> {
        if page_index >= self.doc.len() {
            return Err(PageError::OutOfRange { index: page_index, len: self.doc.len() }.into());
        }
        let (width, height) = self.default_size(payload.kind, asset_size);
        let at = self.pointer_to_document(pointer);

        let overlay = self.overlays.create(NewOverlay {
            asset_id: payload.id.clone(),
            source_url: payload.url.clone(),
            display_name: payload.name.clone(),
            page_index,
            kind: payload.kind,
            x: at.x - width / 2.0,
            y: at.y - height / 2.0,
            width,
            height,
            rotation_degrees: 0.0,
            has_custom_size: false,
        })?;
        let image = asset_size.map_or(ImageState::Pending, ImageState::Loaded);
        self.overlay_images.insert(overlay.id, image);
        if page_index == self.doc.current_page() {
            self.overlays.select(Some(overlay.id))?;
        }
        Ok(overlay)
    }

    /// Drop handler: parse `raw`, place the overlay on the current page, and select it.
    ///
    /// Malformed payloads are ignored with a warning.
    pub fn on_drop(&mut self, pointer: Point, raw: &str, asset_size: Option<ImageSize>) -> Vec<Action> {
        let payload = match DropPayload::parse(raw) {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!(error = %e, code = e.error_code(), "ignoring drop");
                return Vec::new();
            }
        };
        let mut actions = self.commit_gesture();
        match self.place_overlay(pointer, &payload, self.doc.current_page(), asset_size) {
            Ok(overlay) => {
                let id = overlay.id;
                actions.push(Action::OverlayCreated(overlay));
                actions.push(Action::SelectionChanged(Some(id)));
                actions.push(Action::RenderNeeded);
            }
            Err(e) => tracing::warn!(error = %e, code = e.error_code(), "ignoring drop"),
        }
        actions
    }

    fn default_size(&self, kind: SealKind, asset_size: Option<ImageSize>) -> (f64, f64) {
        if kind == SealKind::Stamp {
            let side = mm_to_px(self.config.stamp_size_mm);
            return (side, side);
        }
        let width = self.config.default_seal_width;
        let height = asset_size
            .filter(|s| s.width > 0.0 && s.height > 0.0 && s.width.is_finite() && s.height.is_finite())
            .map_or(width, |s| width * s.height / s.width);
        (width, height)
    }

    // --- Overlay images ---

    /// Load state of an overlay's image. Unknown overlays read as pending.
    #[must_use]
    pub fn overlay_image(&self, id: &OverlayId) -> &ImageState {
        static PENDING: ImageState = ImageState::Pending;
        self.overlay_images.get(id).unwrap_or(&PENDING)
    }

    /// Image loader callback for an overlay. Re-derives the default height from
    /// the image aspect ratio unless the user has already resized the overlay.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::NotFound`] for an unknown overlay.
    pub fn on_overlay_image_loaded(&mut self, id: &OverlayId, size: ImageSize) -> Result<Vec<Action>, EngineError> {
        let overlay = self.overlays.get(id).ok_or(OverlayError::NotFound(*id))?;
        let (default_w, default_h) = self.default_size(overlay.kind, Some(size));
        let differs = (overlay.width - default_w).abs() > f64::EPSILON || (overlay.height - default_h).abs() > f64::EPSILON;
        // An overlay under gesture keeps its snapshot; the commit would overwrite the reshape.
        let reshape = differs && !overlay.has_custom_size && self.input.overlay_id() != Some(*id);
        let center = overlay.center();
        self.overlay_images.insert(*id, ImageState::Loaded(size));

        if !reshape {
            return Ok(vec![Action::RenderNeeded]);
        }
        let partial = PartialOverlay {
            x: Some(center.x - default_w / 2.0),
            y: Some(center.y - default_h / 2.0),
            width: Some(default_w),
            height: Some(default_h),
            ..Default::default()
        };
        let updated = self.overlays.update(id, &partial)?;
        Ok(vec![Action::OverlayUpdated(updated), Action::RenderNeeded])
    }

    /// Image loader failure callback for an overlay. The overlay stays in place
    /// and renders as a placeholder.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::NotFound`] for an unknown overlay.
    pub fn on_overlay_image_failed(&mut self, id: &OverlayId, error: LoadError) -> Result<Vec<Action>, EngineError> {
        if self.overlays.get(id).is_none() {
            return Err(OverlayError::NotFound(*id).into());
        }
        tracing::warn!(error = %error, %id, "overlay image unavailable");
        self.overlay_images.insert(*id, ImageState::Failed(error));
        Ok(vec![Action::RenderNeeded])
    }

    // --- Explicit edits ---

    /// Explicit property update outside of a gesture.
    ///
    /// # Errors
    ///
    /// Returns the store's [`OverlayError`]; the overlay is left unchanged.
    pub fn update_overlay(&mut self, id: &OverlayId, partial: &PartialOverlay) -> Result<Vec<Action>, EngineError> {
        let updated = self.overlays.update(id, partial)?;
        Ok(vec![Action::OverlayUpdated(updated), Action::RenderNeeded])
    }

    /// Remove an overlay. A gesture on it is abandoned without committing.
    pub fn remove_overlay(&mut self, id: &OverlayId) -> Vec<Action> {
        if self.input.overlay_id() == Some(*id) {
            self.input = InputState::Idle;
        }
        let was_selected = self.overlays.selected_id() == Some(*id);
        if self.overlays.remove(id).is_none() {
            return Vec::new();
        }
        self.overlay_images.remove(id);
        let mut actions = vec![Action::OverlayRemoved(*id)];
        if was_selected {
            actions.push(Action::SelectionChanged(None));
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Select an overlay by id, or clear the selection.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::NotFound`] for an unknown id and
    /// [`EngineError::OffPage`] for an overlay on a page other than the active
    /// one. The selection is unchanged in both cases.
    pub fn select(&mut self, id: Option<OverlayId>) -> Result<Vec<Action>, EngineError> {
        if self.overlays.selected_id() == id {
            return Ok(Vec::new());
        }
        if let Some(id) = id {
            let overlay = self.overlays.get(&id).ok_or(OverlayError::NotFound(id))?;
            let current_page = self.doc.current_page();
            if overlay.page_index != current_page {
                return Err(EngineError::OffPage { id, page_index: overlay.page_index, current_page });
            }
        }
        self.overlays.select(id)?;
        Ok(vec![Action::SelectionChanged(id), Action::RenderNeeded])
    }

    fn clear_selection(&mut self) -> Vec<Action> {
        if self.overlays.selected_id().is_none() {
            return Vec::new();
        }
        self.overlays.select(None).map_or_else(
            |e| {
                tracing::warn!(error = %e, "clearing selection failed");
                Vec::new()
            },
            |()| vec![Action::SelectionChanged(None)],
        )
    }

    // --- Input events ---

    /// Primary press starts a gesture on whatever is hit; a secondary press
    /// only clears the selection.
    pub fn on_pointer_down(&mut self, viewport: Point, button: Button) -> Vec<Action> {
        // A previous gesture that never saw its pointer-up is committed first.
        let mut actions = self.commit_gesture();
        let doc_pt = self.pointer_to_document(viewport);
        if !doc_pt.is_finite() {
            tracing::warn!(x = viewport.x, y = viewport.y, "ignoring non-finite pointer");
            return actions;
        }

        let page = self.doc.current_page();
        let hit = match button {
            Button::Primary => hit_test(doc_pt, &self.overlays, page, self.hit_slop()),
            Button::Secondary => None,
        };
        let Some(hit) = hit else {
            let cleared = self.clear_selection();
            if !cleared.is_empty() {
                actions.extend(cleared);
                actions.push(Action::RenderNeeded);
            }
            return actions;
        };

        let Some(overlay) = self.overlays.get(&hit.overlay_id) else {
            return actions;
        };
        let snapshot = GestureSnapshot::of(overlay, doc_pt);
        let id = overlay.id;
        let (state, cursor) = match hit.part {
            HitPart::Body => (InputState::Dragging { id, snapshot, preview: None }, "move"),
            HitPart::ResizeHandle(anchor) => (InputState::Resizing { id, anchor, snapshot, preview: None }, anchor.cursor()),
            HitPart::RotateHandle => (InputState::Rotating { id, snapshot, preview: None }, "grabbing"),
        };
        tracing::debug!(%id, gesture = ?state.kind(), "gesture started");
        self.input = state;

        if self.overlays.selected_id() != Some(id) {
            match self.overlays.select(Some(id)) {
                Ok(()) => actions.push(Action::SelectionChanged(Some(id))),
                Err(e) => tracing::warn!(error = %e, "selecting hit overlay failed"),
            }
        }
        actions.push(Action::SetCursor(cursor.to_string()));
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Update the gesture preview. Non-finite pointer samples are dropped.
    pub fn on_pointer_move(&mut self, viewport: Point, modifiers: Modifiers) -> Vec<Action> {
        if self.input.is_idle() {
            return Vec::new();
        }
        let doc_pt = self.pointer_to_document(viewport);
        if !doc_pt.is_finite() {
            tracing::warn!(x = viewport.x, y = viewport.y, "ignoring non-finite pointer");
            return Vec::new();
        }
        self.advance_gesture(doc_pt, modifiers);
        vec![Action::RenderNeeded]
    }

    /// Commit the gesture. A non-finite release position commits the last preview.
    pub fn on_pointer_up(&mut self, viewport: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        if self.input.is_idle() || button != Button::Primary {
            return Vec::new();
        }
        let doc_pt = self.pointer_to_document(viewport);
        if doc_pt.is_finite() && (self.input.preview().is_some() || self.moved_since_down(doc_pt)) {
            self.advance_gesture(doc_pt, modifiers);
        }
        self.commit_gesture()
    }

    /// Pointer cancelled by the platform. Commits like pointer-up.
    pub fn on_pointer_cancel(&mut self) -> Vec<Action> {
        self.commit_gesture()
    }

    /// Pointer released outside the canvas. Commits like pointer-up.
    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.commit_gesture()
    }

    /// Canvas lost focus mid-gesture. Commits like pointer-up.
    pub fn on_blur(&mut self) -> Vec<Action> {
        self.commit_gesture()
    }

    fn moved_since_down(&self, doc_pt: Point) -> bool {
        let snapshot = match &self.input {
            InputState::Idle => return false,
            InputState::Dragging { snapshot, .. }
            | InputState::Resizing { snapshot, .. }
            | InputState::Rotating { snapshot, .. } => snapshot,
        };
        snapshot.pointer != doc_pt
    }

    fn advance_gesture(&mut self, doc_pt: Point, modifiers: Modifiers) {
        let min_size = self.config.min_overlay_size.max(MIN_OVERLAY_SIZE_PX);
        match &mut self.input {
            InputState::Idle => {}
            InputState::Dragging { snapshot, preview, .. } => {
                *preview = Some(transform::drag(snapshot, doc_pt));
            }
            InputState::Resizing { anchor, snapshot, preview, .. } => {
                let (sx, sy) = transform::resize_scales(snapshot, *anchor, doc_pt, modifiers.shift);
                *preview = Some(transform::resize(snapshot, *anchor, sx, sy, min_size));
            }
            InputState::Rotating { snapshot, preview, .. } => {
                *preview = Some(transform::rotate(snapshot, doc_pt));
            }
        }
    }

    /// End the active gesture with a single store write. No-op when idle;
    /// writes nothing when the pointer never moved.
    fn commit_gesture(&mut self) -> Vec<Action> {
        let state = std::mem::take(&mut self.input);
        let Some(id) = state.overlay_id() else {
            return Vec::new();
        };
        let Some(geometry) = state.preview() else {
            return vec![Action::SetCursor("default".into())];
        };

        let mut partial = PartialOverlay {
            x: Some(geometry.x),
            y: Some(geometry.y),
            width: Some(geometry.width),
            height: Some(geometry.height),
            rotation_degrees: Some(geometry.rotation_degrees),
            ..Default::default()
        };
        if state.kind() == Some(GestureKind::Resize) {
            partial.has_custom_size = Some(true);
        }

        match self.overlays.update(&id, &partial) {
            Ok(overlay) => {
                tracing::info!(%id, gesture = ?state.kind(), x = overlay.x, y = overlay.y, width = overlay.width,
                    height = overlay.height, rotation = overlay.rotation_degrees, "gesture committed");
                if let Some(hook) = self.commit_hook.as_mut() {
                    hook(&overlay);
                }
                vec![Action::OverlayCommitted(overlay), Action::SetCursor("default".into()), Action::RenderNeeded]
            }
            Err(e) => {
                tracing::warn!(error = %e, %id, "gesture commit dropped");
                vec![Action::SetCursor("default".into()), Action::RenderNeeded]
            }
        }
    }

    // --- Queries ---

    /// The currently selected overlay id, if any.
    #[must_use]
    pub fn selection(&self) -> Option<OverlayId> {
        self.overlays.selected_id()
    }

    /// Look up an overlay by id.
    #[must_use]
    pub fn overlay(&self, id: &OverlayId) -> Option<&Overlay> {
        self.overlays.get(id)
    }

    /// The overlay under gesture with its in-progress geometry applied.
    #[must_use]
    pub fn preview(&self) -> Option<Overlay> {
        let id = self.input.overlay_id()?;
        let geometry = self.input.preview()?;
        let mut overlay = self.overlays.get(&id)?.clone();
        geometry.apply_to(&mut overlay);
        Some(overlay)
    }

    /// Overlays on the active page as they should be drawn, previews applied.
    #[must_use]
    pub fn visible_overlays(&self) -> Vec<Overlay> {
        let preview = self.preview();
        self.overlays
            .list_for_page(self.doc.current_page())
            .into_iter()
            .map(|o| match &preview {
                Some(p) if p.id == o.id => p.clone(),
                _ => o.clone(),
            })
            .collect()
    }
}
