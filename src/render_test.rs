#![allow(clippy::float_cmp)]

use super::*;
use crate::camera::Point;
use crate::engine::Engine;
use crate::input::{Button, Modifiers};
use crate::page::ImageSize;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

const SEAL: &str = r#"{"id": "s1", "url": "seal.png", "name": "Seal", "type": "seal"}"#;

fn engine_with_page() -> Engine {
    let mut engine = Engine::default();
    engine.load_document(["page-0.png"]);
    engine
}

// =============================================================
// Stage and page
// =============================================================

#[test]
fn empty_document_has_no_page() {
    let scene = build_scene(&Engine::default(), &Palette::default());
    assert!(scene.page.is_none());
    assert!(scene.overlays.is_empty());
    assert!(scene.selection.is_none());
}

#[test]
fn stage_is_page_box_times_scale() {
    let engine = engine_with_page();
    let scene = build_scene(&engine, &Palette::default());
    let page_box = engine.doc.page_box();
    assert!(approx(scene.stage_width, page_box.width * 0.8));
    assert!(approx(scene.stage_height, page_box.height * 0.8));
    assert_eq!(scene.group.center, page_box.center());
}

#[test]
fn pending_page_is_placeholder_over_full_box() {
    let engine = engine_with_page();
    let page = build_scene(&engine, &Palette::default()).page.unwrap();
    assert_eq!(page.image, NodeImage::Loading);
    assert!(approx(page.layout.width, engine.doc.page_box().width));
    assert_eq!(page.layout.offset_x, 0.0);
}

#[test]
fn loaded_page_uses_fitted_layout() {
    let mut engine = engine_with_page();
    engine.on_page_loaded(0, ImageSize { width: 800.0, height: 600.0 }).unwrap();
    let page = build_scene(&engine, &Palette::default()).page.unwrap();
    assert_eq!(page.image, NodeImage::Ready);
    assert!(approx(page.layout.width, engine.doc.page_box().width));
    assert!(page.layout.offset_y > 0.0);
}

#[test]
fn page_rotation_lands_on_group() {
    let mut engine = engine_with_page();
    engine.set_page_rotation(-90.0);
    let scene = build_scene(&engine, &Palette::default());
    assert!(approx(scene.group.rotation_degrees, 270.0));
}

#[test]
fn page_carries_effect_filters() {
    let mut engine = engine_with_page();
    engine.set_effects([Effect::Scan1].into_iter().collect());
    let page = build_scene(&engine, &Palette::default()).page.unwrap();
    assert_eq!(page.filters, vec![FilterKind::BrightenGradient]);
}

// =============================================================
// Overlays and selection
// =============================================================

#[test]
fn dropped_overlay_is_selected_node() {
    let mut engine = engine_with_page();
    engine.on_drop(Point::new(160.0, 160.0), SEAL, None);
    let scene = build_scene(&engine, &Palette::default());

    assert_eq!(scene.overlays.len(), 1);
    let node = &scene.overlays[0];
    assert!(node.selected);
    assert_eq!(node.image, NodeImage::Loading);
    assert!(approx(node.x, 125.0));

    let frame = scene.selection.unwrap();
    assert_eq!(frame.overlay_id, node.id);
    assert!(approx(frame.corners[3].1.x, 275.0));
    assert!(approx(frame.rotate_handle.y, 125.0 - 30.0));
    assert!(approx(frame.handle_radius, 10.0));
}

#[test]
fn selection_frame_follows_preview() {
    let mut engine = engine_with_page();
    engine.on_drop(Point::new(160.0, 160.0), SEAL, None);
    engine.on_pointer_down(Point::new(160.0, 160.0), Button::Primary);
    engine.on_pointer_move(Point::new(200.0, 160.0), Modifiers::default());

    let scene = build_scene(&engine, &Palette::default());
    assert!(approx(scene.overlays[0].x, 175.0));
    assert!(approx(scene.selection.unwrap().corners[0].1.x, 175.0));
}

#[test]
fn rotated_node_pivots_on_box_center() {
    let mut engine = engine_with_page();
    engine.on_drop(Point::new(160.0, 160.0), SEAL, None);
    let id = engine.overlays.all()[0].id;
    engine.update_overlay(&id, &crate::doc::PartialOverlay { rotation_degrees: Some(90.0), ..Default::default() }).unwrap();

    let scene = build_scene(&engine, &Palette::default());
    let node = &scene.overlays[0];
    assert!(approx(node.x, 125.0));
    assert_eq!(node.pivot(), engine.overlay(&id).unwrap().center());
    assert!(approx(node.pivot().x, 200.0));

    // The handle sits above the pivot once the box is turned a quarter clockwise.
    let frame = scene.selection.unwrap();
    assert!(approx(frame.rotate_handle.y, 200.0));
    assert!(frame.rotate_handle.x > node.pivot().x);
}

#[test]
fn overlays_on_other_pages_are_hidden() {
    let mut engine = Engine::default();
    engine.load_document(["a.png", "b.png"]);
    engine.on_drop(Point::new(160.0, 160.0), SEAL, None);
    engine.set_current_page(1).unwrap();

    let scene = build_scene(&engine, &Palette::default());
    assert!(scene.overlays.is_empty());
    assert!(scene.selection.is_none());
}

// =============================================================
// Side artifact
// =============================================================

#[test]
fn side_artifact_off_by_default() {
    let scene = build_scene(&engine_with_page(), &Palette::default());
    assert!(scene.artifact_lines.is_empty());
}

#[test]
fn portrait_lines_are_vertical() {
    let mut engine = engine_with_page();
    engine.set_effects([Effect::SideArtifact].into_iter().collect());
    let palette = Palette::default();
    let lines = build_scene(&engine, &palette).artifact_lines;

    assert_eq!(lines.len(), 8);
    let height = engine.doc.page_box().height;
    assert_eq!(lines[0].points, [8.0, 8.0, 8.0, height]);
    assert!(approx(lines[2].points[0], 10.6));
    assert_eq!(lines[0].points[0], lines[0].points[2]);
    assert_eq!(lines[0].stroke, palette.accents[0]);
    assert_eq!(lines[1].stroke, palette.main);
    assert_eq!(lines[0].stroke_width, 1.1);
}

#[test]
fn landscape_lines_are_horizontal() {
    let mut engine = engine_with_page();
    engine.toggle_orientation();
    engine.set_effects([Effect::SideArtifact].into_iter().collect());
    let lines = build_scene(&engine, &Palette::default()).artifact_lines;

    let width = engine.doc.page_box().width;
    assert_eq!(lines[0].points, [8.0, 8.0, width, 8.0]);
    assert!(approx(lines[7].points[1], 1.3 * 7.0 + 8.0));
    assert_eq!(lines[7].points[1], lines[7].points[3]);
}
