//! Engine tunables.
//!
//! DESIGN
//! ======
//! Defaults live in [`crate::consts`]. The composing application may override
//! any of them through `SEALCANVAS_*` environment variables; unparseable values
//! fall back to the default.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::consts::{
    DEFAULT_PREVIEW_SCALE, DEFAULT_SEAL_WIDTH_PX, HANDLE_RADIUS_PX, MIN_OVERLAY_SIZE_PX, ROTATE_HANDLE_OFFSET_PX,
    STAMP_SIZE_MM,
};
use crate::units::PaperSize;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerConfig {
    /// Uniform zoom applied to the stage.
    pub preview_scale: f64,
    /// Paper the page box is derived from.
    pub paper: PaperSize,
    /// Floor for overlay width and height after a resize. Values below
    /// [`MIN_OVERLAY_SIZE_PX`] are raised to it.
    pub min_overlay_size: f64,
    /// Edge length of a dropped stamp, in millimetres.
    pub stamp_size_mm: f64,
    /// Width of a dropped non-stamp seal, in pixels.
    pub default_seal_width: f64,
    /// Handle hit slop in viewport pixels.
    pub handle_radius_px: f64,
    /// Rotate handle distance above the overlay, in viewport pixels.
    pub rotate_handle_offset_px: f64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            preview_scale: DEFAULT_PREVIEW_SCALE,
            paper: PaperSize::A4,
            min_overlay_size: MIN_OVERLAY_SIZE_PX,
            stamp_size_mm: STAMP_SIZE_MM,
            default_seal_width: DEFAULT_SEAL_WIDTH_PX,
            handle_radius_px: HANDLE_RADIUS_PX,
            rotate_handle_offset_px: ROTATE_HANDLE_OFFSET_PX,
        }
    }
}

impl ViewerConfig {
    /// Build a config from `SEALCANVAS_*` environment variables over the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).map_err(|_| ()))
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Result<String, ()>,
    {
        let d = Self::default();
        let paper = PaperSize {
            width_mm: positive(&lookup, "SEALCANVAS_PAPER_WIDTH_MM", d.paper.width_mm),
            height_mm: positive(&lookup, "SEALCANVAS_PAPER_HEIGHT_MM", d.paper.height_mm),
        };
        Self {
            preview_scale: positive(&lookup, "SEALCANVAS_PREVIEW_SCALE", d.preview_scale),
            paper,
            min_overlay_size: positive(&lookup, "SEALCANVAS_MIN_OVERLAY_SIZE", d.min_overlay_size).max(MIN_OVERLAY_SIZE_PX),
            stamp_size_mm: positive(&lookup, "SEALCANVAS_STAMP_SIZE_MM", d.stamp_size_mm),
            default_seal_width: positive(&lookup, "SEALCANVAS_SEAL_WIDTH", d.default_seal_width),
            handle_radius_px: positive(&lookup, "SEALCANVAS_HANDLE_RADIUS_PX", d.handle_radius_px),
            rotate_handle_offset_px: positive(&lookup, "SEALCANVAS_ROTATE_HANDLE_OFFSET_PX", d.rotate_handle_offset_px),
        }
    }
}

/// Parse `key` as a strictly positive finite number, else return `default`.
fn positive<F>(lookup: &F, key: &str, default: f64) -> f64
where
    F: Fn(&str) -> Result<String, ()>,
{
    let Ok(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => v,
        _ => {
            tracing::warn!(%key, value = %raw, "ignoring invalid config value");
            default
        }
    }
}
