//! Geometry and overlay engine for the document stamping canvas.
//!
//! This crate owns everything about the canvas that has invariants: fitting page
//! images into the page box, mapping pointer positions from the viewport into
//! document space, the seal overlay model with its single selection, and the
//! drag/resize/rotate gesture state machine. Image decoding, pixel filters, and
//! the drawing backend live in the host; the host feeds load results and pointer
//! events into [`engine::Engine`] and draws the [`render::Scene`] it builds.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine: drops, pointer events, gesture commits |
//! | [`doc`] | Overlay (seal) types and the insertion-ordered store |
//! | [`page`] | Pages, orientation, page box, and bulk re-layout |
//! | [`fit`] | Fit-inside layout of a page image within the page box |
//! | [`units`] | Millimetre to pixel conversion and paper sizes |
//! | [`camera`] | Preview scale / origin and pointer coordinate conversion |
//! | [`input`] | Input event types and the gesture state machine |
//! | [`transform`] | Pure drag/resize/rotate math over gesture snapshots |
//! | [`hit`] | Hit-testing against overlays and selection handles |
//! | [`payload`] | Drag-source payload parsing |
//! | [`effects`] | Effect flags and the filter names they imply |
//! | [`palette`] | Color palettes for decorative strokes |
//! | [`render`] | One-way projection of engine state into draw nodes |
//! | [`config`] | Tunables with environment overrides |
//! | [`error`] | Shared error code trait |
//! | [`consts`] | Shared numeric constants |

pub mod camera;
pub mod config;
pub mod consts;
pub mod doc;
pub mod effects;
pub mod engine;
pub mod error;
pub mod fit;
pub mod hit;
pub mod input;
pub mod page;
pub mod palette;
pub mod payload;
pub mod render;
pub mod transform;
pub mod units;
