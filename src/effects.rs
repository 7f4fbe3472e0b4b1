//! Visual effect flags and the filters they imply.
//!
//! The crate never touches pixels. It decides which named filters the host's
//! filter backend should apply to the page image, and it registers the one
//! custom filter the backend does not ship with through an explicit init call.

#[cfg(test)]
#[path = "effects_test.rs"]
mod effects_test;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::consts::SCAN2_CONTRAST;

/// A user-selectable effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Effect {
    /// Brightness gradient, as from a flatbed scanner lamp.
    Scan1,
    /// Grayscale with a contrast bump.
    Scan2,
    /// Decorative toner lines along the binding edge.
    SideArtifact,
}

/// Set of active effects.
pub type EffectSet = BTreeSet<Effect>;

/// A filter applied by the host's filter backend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterKind {
    /// Custom filter; must be registered with [`FilterRegistry::register_custom_filters`].
    BrightenGradient,
    Grayscale,
    Contrast(f64),
}

impl FilterKind {
    /// Backend filter name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::BrightenGradient => "BrightenGradient",
            Self::Grayscale => "Grayscale",
            Self::Contrast(_) => "Contrast",
        }
    }
}

/// Filters to apply to the page image for `effects`, in application order.
#[must_use]
pub fn page_filters(effects: &EffectSet) -> Vec<FilterKind> {
    let mut out = Vec::new();
    if effects.contains(&Effect::Scan1) {
        out.push(FilterKind::BrightenGradient);
    }
    if effects.contains(&Effect::Scan2) {
        out.push(FilterKind::Grayscale);
        out.push(FilterKind::Contrast(SCAN2_CONTRAST));
    }
    out
}

/// Host-side filter pipeline.
pub trait FilterBackend {
    /// Make a custom filter available under [`FilterKind::name`].
    fn register_filter(&mut self, filter: FilterKind);
}

/// Tracks one-time registration of custom filters.
#[derive(Debug, Default)]
pub struct FilterRegistry {
    registered: bool,
}

impl FilterRegistry {
    /// Register the crate's custom filters with `backend`. Only the first call
    /// registers; later calls return `false` and do nothing.
    pub fn register_custom_filters(&mut self, backend: &mut dyn FilterBackend) -> bool {
        if self.registered {
            return false;
        }
        backend.register_filter(FilterKind::BrightenGradient);
        self.registered = true;
        tracing::debug!("custom filters registered");
        true
    }

    #[must_use]
    pub fn is_registered(&self) -> bool {
        self.registered
    }
}
