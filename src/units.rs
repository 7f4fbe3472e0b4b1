//! Physical to pixel conversion at the reference resolution.

#[cfg(test)]
#[path = "units_test.rs"]
mod units_test;

use crate::consts::{MM_PER_INCH, REFERENCE_DPI};

/// Convert millimetres to pixels at [`REFERENCE_DPI`].
#[must_use]
pub fn mm_to_px(mm: f64) -> f64 {
    mm / MM_PER_INCH * REFERENCE_DPI
}

/// Physical paper size in portrait orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaperSize {
    pub width_mm: f64,
    pub height_mm: f64,
}

impl PaperSize {
    /// ISO A4, 210 × 297 mm.
    pub const A4: Self = Self { width_mm: 210.0, height_mm: 297.0 };

    /// Portrait dimensions in pixels, `(width, height)`.
    #[must_use]
    pub fn portrait_px(self) -> (f64, f64) {
        (mm_to_px(self.width_mm), mm_to_px(self.height_mm))
    }

    /// Landscape dimensions in pixels, `(width, height)`.
    #[must_use]
    pub fn landscape_px(self) -> (f64, f64) {
        (mm_to_px(self.height_mm), mm_to_px(self.width_mm))
    }
}

impl Default for PaperSize {
    fn default() -> Self {
        Self::A4
    }
}
