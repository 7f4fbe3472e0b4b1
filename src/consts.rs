//! Shared numeric constants for the canvas crate.

// ── Units ───────────────────────────────────────────────────────

/// Millimetres per inch.
pub const MM_PER_INCH: f64 = 25.4;

/// Reference resolution used to turn paper sizes into pixels.
pub const REFERENCE_DPI: f64 = 96.0;

// ── Stage ───────────────────────────────────────────────────────

/// Uniform zoom applied to the whole stage in the preview.
pub const DEFAULT_PREVIEW_SCALE: f64 = 0.8;

// ── Overlays ────────────────────────────────────────────────────

/// Hard floor for overlay width and height, in document pixels.
pub const MIN_OVERLAY_SIZE_PX: f64 = 5.0;

/// Edge length of a dropped stamp, in millimetres.
pub const STAMP_SIZE_MM: f64 = 40.0;

/// Width of a dropped non-stamp seal, in document pixels.
pub const DEFAULT_SEAL_WIDTH_PX: f64 = 150.0;

// ── Hit-testing ─────────────────────────────────────────────────

/// Screen-space hit slop in pixels for handles.
pub const HANDLE_RADIUS_PX: f64 = 8.0;

/// Distance from the bounding box top edge to the rotate handle, in screen pixels.
pub const ROTATE_HANDLE_OFFSET_PX: f64 = 24.0;

// ── Side artifact ───────────────────────────────────────────────

/// Number of decorative lines drawn along the binding edge.
pub const SIDE_ARTIFACT_LINES: usize = 8;

/// Spacing between consecutive side artifact lines.
pub const SIDE_ARTIFACT_SPACING_PX: f64 = 1.3;

/// Inset of the first side artifact line from the page edge.
pub const SIDE_ARTIFACT_INSET_PX: f64 = 8.0;

/// Stroke width of a side artifact line.
pub const SIDE_ARTIFACT_STROKE_PX: f64 = 1.1;

/// Contrast applied by the `scan2` effect.
pub const SCAN2_CONTRAST: f64 = 0.2;
