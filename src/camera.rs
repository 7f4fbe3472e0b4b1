#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use crate::consts::DEFAULT_PREVIEW_SCALE;

/// A point in viewport, stage, or document space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Rotate this point clockwise (screen convention, +y down) by `degrees` about `center`.
    #[must_use]
    pub fn rotate_about(self, center: Point, degrees: f64) -> Point {
        if degrees == 0.0 {
            return self;
        }
        let (sin, cos) = degrees.to_radians().sin_cos();
        let dx = self.x - center.x;
        let dy = self.y - center.y;
        Point { x: center.x + dx * cos - dy * sin, y: center.y + dx * sin + dy * cos }
    }
}

/// Preview transform of the stage inside the viewport.
///
/// `origin_x` / `origin_y` are the stage's top-left corner in viewport pixels.
/// `preview_scale` is the uniform zoom applied to the whole stage.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub origin_x: f64,
    pub origin_y: f64,
    pub preview_scale: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { origin_x: 0.0, origin_y: 0.0, preview_scale: DEFAULT_PREVIEW_SCALE }
    }
}

impl Camera {
    /// Convert a viewport point (CSS pixels) to stage coordinates.
    #[must_use]
    pub fn viewport_to_stage(&self, viewport: Point) -> Point {
        Point {
            x: (viewport.x - self.origin_x) / self.preview_scale,
            y: (viewport.y - self.origin_y) / self.preview_scale,
        }
    }

    /// Convert a stage point to viewport coordinates (CSS pixels).
    #[must_use]
    pub fn stage_to_viewport(&self, stage: Point) -> Point {
        Point {
            x: stage.x * self.preview_scale + self.origin_x,
            y: stage.y * self.preview_scale + self.origin_y,
        }
    }

    /// Convert a viewport distance (pixels) to a stage distance.
    #[must_use]
    pub fn viewport_dist_to_stage(&self, viewport_dist: f64) -> f64 {
        viewport_dist / self.preview_scale
    }
}
