//! Input model: mouse buttons, modifier keys, and the gesture state machine.
//!
//! `InputState` is the active gesture tracked between pointer-down and
//! pointer-up. Each active variant owns a plain [`GestureSnapshot`] taken at
//! pointer-down and the latest preview geometry, so pointer moves never touch
//! the overlay store and pointer-up can commit a single coherent update.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::doc::OverlayId;
use crate::hit::ResizeAnchor;
use crate::transform::{Geometry, GestureSnapshot};

/// Keyboard modifier keys held during an event.
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    /// Shift key is held. Locks the aspect ratio while resizing.
    pub shift: bool,
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap). Starts gestures.
    Primary,
    /// Right mouse button (or two-finger tap). Clears the selection.
    Secondary,
}

/// Gesture kind, for logging and cursor choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    Drag,
    Resize,
    Rotate,
}

/// Internal state for the input state machine.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is moving the selected overlay.
    Dragging {
        id: OverlayId,
        snapshot: GestureSnapshot,
        /// Latest geometry; `None` until the pointer has moved.
        preview: Option<Geometry>,
    },
    /// The user is resizing the selected overlay by one of its corner handles.
    Resizing {
        id: OverlayId,
        anchor: ResizeAnchor,
        snapshot: GestureSnapshot,
        preview: Option<Geometry>,
    },
    /// The user is rotating the selected overlay by its rotate handle.
    Rotating {
        id: OverlayId,
        snapshot: GestureSnapshot,
        preview: Option<Geometry>,
    },
}

impl InputState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Id of the overlay under gesture, if any.
    #[must_use]
    pub fn overlay_id(&self) -> Option<OverlayId> {
        match self {
            Self::Idle => None,
            Self::Dragging { id, .. } | Self::Resizing { id, .. } | Self::Rotating { id, .. } => Some(*id),
        }
    }

    #[must_use]
    pub fn kind(&self) -> Option<GestureKind> {
        match self {
            Self::Idle => None,
            Self::Dragging { .. } => Some(GestureKind::Drag),
            Self::Resizing { .. } => Some(GestureKind::Resize),
            Self::Rotating { .. } => Some(GestureKind::Rotate),
        }
    }

    /// Latest preview geometry of the active gesture, if the pointer has moved.
    #[must_use]
    pub fn preview(&self) -> Option<Geometry> {
        match self {
            Self::Idle => None,
            Self::Dragging { preview, .. } | Self::Resizing { preview, .. } | Self::Rotating { preview, .. } => *preview,
        }
    }
}
