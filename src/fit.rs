//! Fit-inside layout: the largest centered rectangle with the image's aspect
//! ratio that fits within the page box. Never crops; may letterbox.

#[cfg(test)]
#[path = "fit_test.rs"]
mod fit_test;

use serde::{Deserialize, Serialize};

use crate::error::ErrorCode;

/// Error returned by [`fit_to_page`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FitError {
    /// An input dimension was zero, negative, or not finite.
    #[error("invalid dimension: image {image_width}x{image_height}, box {box_width}x{box_height}")]
    InvalidDimension { image_width: f64, image_height: f64, box_width: f64, box_height: f64 },
}

impl ErrorCode for FitError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidDimension { .. } => "E_INVALID_DIMENSION",
        }
    }
}

/// Fitted, centered rectangle for one page image inside a page box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageLayout {
    pub width: f64,
    pub height: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl PageLayout {
    /// A layout covering the whole box, used for pages with no image yet.
    #[must_use]
    pub fn full_box(box_width: f64, box_height: f64) -> Self {
        Self { width: box_width, height: box_height, offset_x: 0.0, offset_y: 0.0 }
    }
}

fn valid(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

/// Fit an `image_width × image_height` image inside a `box_width × box_height` box.
///
/// # Errors
///
/// Returns [`FitError::InvalidDimension`] if any input is not strictly positive and finite.
pub fn fit_to_page(image_width: f64, image_height: f64, box_width: f64, box_height: f64) -> Result<PageLayout, FitError> {
    if !(valid(image_width) && valid(image_height) && valid(box_width) && valid(box_height)) {
        return Err(FitError::InvalidDimension { image_width, image_height, box_width, box_height });
    }

    let scale = (box_width / image_width).min(box_height / image_height);
    let width = image_width * scale;
    let height = image_height * scale;

    Ok(PageLayout { width, height, offset_x: (box_width - width) / 2.0, offset_y: (box_height - height) / 2.0 })
}
