//! Overlay model: seals placed on pages, sparse updates, and the store.
//!
//! This module defines what sits on top of the pages (`Overlay`, `SealKind`),
//! a sparse-update type for explicit edits (`PartialOverlay`), the creation
//! request (`NewOverlay`), and the runtime store that owns all live overlays
//! plus the single selection (`OverlayStore`).
//!
//! Overlay coordinates are always stored in the page's unrotated frame. The
//! store never clamps: callers clamp sizes before calling `update`, and a
//! non-positive size is rejected rather than silently adjusted.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::camera::Point;
use crate::error::ErrorCode;

/// Unique identifier for an overlay.
pub type OverlayId = Uuid;

/// The kind of asset an overlay shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SealKind {
    /// Round or square office stamp; dropped at a fixed physical size.
    Stamp,
    /// Embossed or wax-style seal image.
    Seal,
    /// Handwritten signature image.
    Signature,
    /// Any asset type this crate has no special rule for.
    #[default]
    #[serde(other)]
    Other,
}

/// Error returned by [`OverlayStore`] operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OverlayError {
    #[error("overlay not found: {0}")]
    NotFound(OverlayId),
    #[error("invalid overlay size: {width}x{height}")]
    InvalidSize { width: f64, height: f64 },
    #[error("invalid overlay position: ({x}, {y})")]
    InvalidPosition { x: f64, y: f64 },
}

impl ErrorCode for OverlayError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "E_NOT_FOUND",
            Self::InvalidSize { .. } => "E_INVALID_SIZE",
            Self::InvalidPosition { .. } => "E_INVALID_POSITION",
        }
    }
}

/// A seal overlay as stored in the model and emitted to observers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overlay {
    /// Unique identifier, fixed at creation.
    pub id: OverlayId,
    /// Identifier of the library asset this overlay was dropped from.
    pub asset_id: String,
    /// Image source for the overlay.
    pub source_url: String,
    /// Human-readable asset name.
    pub display_name: String,
    /// Page the overlay belongs to; it is visible only while that page is active.
    pub page_index: usize,
    pub kind: SealKind,
    /// Left edge of the unrotated box in document space.
    pub x: f64,
    /// Top edge of the unrotated box in document space.
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Clockwise rotation in degrees around the box center, in `[0, 360)`.
    pub rotation_degrees: f64,
    /// Set once the user has resized the overlay.
    pub has_custom_size: bool,
}

impl Overlay {
    /// Center of the unrotated box.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Everything needed to create an overlay except its id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOverlay {
    pub asset_id: String,
    pub source_url: String,
    pub display_name: String,
    pub page_index: usize,
    pub kind: SealKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rotation_degrees: f64,
    pub has_custom_size: bool,
}

/// Sparse update for an overlay. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialOverlay {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation_degrees: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_custom_size: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl PartialOverlay {
    /// A partial that sets every geometric field of `overlay`.
    #[must_use]
    pub fn geometry_of(overlay: &Overlay) -> Self {
        Self {
            x: Some(overlay.x),
            y: Some(overlay.y),
            width: Some(overlay.width),
            height: Some(overlay.height),
            rotation_degrees: Some(overlay.rotation_degrees),
            has_custom_size: Some(overlay.has_custom_size),
            display_name: None,
        }
    }
}

fn valid_size(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

/// In-memory store of overlays in insertion order, plus the selection.
#[derive(Debug, Default)]
pub struct OverlayStore {
    overlays: Vec<Overlay>,
    selected: Option<OverlayId>,
}

impl OverlayStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an overlay with a fresh id and append it.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::InvalidSize`] if width or height is not strictly
    /// positive, and [`OverlayError::InvalidPosition`] if `x` or `y` is not finite.
    pub fn create(&mut self, new: NewOverlay) -> Result<Overlay, OverlayError> {
        if !(valid_size(new.width) && valid_size(new.height)) {
            return Err(OverlayError::InvalidSize { width: new.width, height: new.height });
        }
        if !(new.x.is_finite() && new.y.is_finite()) {
            return Err(OverlayError::InvalidPosition { x: new.x, y: new.y });
        }
        let overlay = Overlay {
            id: Uuid::new_v4(),
            asset_id: new.asset_id,
            source_url: new.source_url,
            display_name: new.display_name,
            page_index: new.page_index,
            kind: new.kind,
            x: new.x,
            y: new.y,
            width: new.width,
            height: new.height,
            rotation_degrees: crate::transform::normalize_degrees(new.rotation_degrees),
            has_custom_size: new.has_custom_size,
        };
        tracing::debug!(id = %overlay.id, page = overlay.page_index, kind = ?overlay.kind, "overlay created");
        self.overlays.push(overlay.clone());
        Ok(overlay)
    }

    /// Apply a partial update and return the updated overlay.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::NotFound`] for an unknown id,
    /// [`OverlayError::InvalidSize`] for a non-positive width or height, and
    /// [`OverlayError::InvalidPosition`] for a non-finite `x` or `y`. In every
    /// case the store is left unchanged.
    pub fn update(&mut self, id: &OverlayId, partial: &PartialOverlay) -> Result<Overlay, OverlayError> {
        let obj = self
            .overlays
            .iter_mut()
            .find(|o| o.id == *id)
            .ok_or(OverlayError::NotFound(*id))?;

        let width = partial.width.unwrap_or(obj.width);
        let height = partial.height.unwrap_or(obj.height);
        if !(valid_size(width) && valid_size(height)) {
            return Err(OverlayError::InvalidSize { width, height });
        }
        let x = partial.x.unwrap_or(obj.x);
        let y = partial.y.unwrap_or(obj.y);
        if !(x.is_finite() && y.is_finite()) {
            return Err(OverlayError::InvalidPosition { x, y });
        }

        obj.x = x;
        obj.y = y;
        obj.width = width;
        obj.height = height;
        if let Some(r) = partial.rotation_degrees {
            obj.rotation_degrees = crate::transform::normalize_degrees(r);
        }
        if let Some(custom) = partial.has_custom_size {
            obj.has_custom_size = custom;
        }
        if let Some(ref name) = partial.display_name {
            obj.display_name.clone_from(name);
        }
        Ok(obj.clone())
    }

    /// Remove an overlay by id, returning it if it was present. Clears the
    /// selection when it pointed at the removed overlay.
    pub fn remove(&mut self, id: &OverlayId) -> Option<Overlay> {
        let index = self.overlays.iter().position(|o| o.id == *id)?;
        if self.selected == Some(*id) {
            self.selected = None;
        }
        Some(self.overlays.remove(index))
    }

    /// Return a reference to an overlay by id.
    #[must_use]
    pub fn get(&self, id: &OverlayId) -> Option<&Overlay> {
        self.overlays.iter().find(|o| o.id == *id)
    }

    /// Select an overlay, or clear the selection with `None`.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::NotFound`] for an unknown id; the selection is unchanged.
    pub fn select(&mut self, id: Option<OverlayId>) -> Result<(), OverlayError> {
        if let Some(id) = id {
            if self.get(&id).is_none() {
                return Err(OverlayError::NotFound(id));
            }
        }
        self.selected = id;
        Ok(())
    }

    /// Id of the selected overlay, if any.
    #[must_use]
    pub fn selected_id(&self) -> Option<OverlayId> {
        self.selected
    }

    /// The selected overlay, if any.
    #[must_use]
    pub fn selected(&self) -> Option<&Overlay> {
        self.selected.and_then(|id| self.get(&id))
    }

    /// Overlays bound to `page_index`, in insertion order.
    #[must_use]
    pub fn list_for_page(&self, page_index: usize) -> Vec<&Overlay> {
        self.overlays.iter().filter(|o| o.page_index == page_index).collect()
    }

    /// All overlays in insertion order.
    #[must_use]
    pub fn all(&self) -> &[Overlay] {
        &self.overlays
    }

    /// Number of overlays currently in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    /// Returns `true` if the store contains no overlays.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }
}
