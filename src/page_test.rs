#![allow(clippy::float_cmp)]

use super::*;

fn loaded_doc(sizes: &[(f64, f64)]) -> Document {
    let mut doc = Document::default();
    doc.set_pages((0..sizes.len()).map(|i| format!("page-{i}.png")));
    for (i, &(w, h)) in sizes.iter().enumerate() {
        doc.on_page_loaded(i, ImageSize { width: w, height: h }).unwrap();
    }
    doc
}

// =============================================================
// Orientation
// =============================================================

#[test]
fn orientation_default_is_portrait() {
    assert_eq!(Orientation::default(), Orientation::Portrait);
}

#[test]
fn orientation_serde_accepts_legacy_names() {
    let o: Orientation = serde_json::from_str("\"album\"").unwrap();
    assert_eq!(o, Orientation::Landscape);
    let o: Orientation = serde_json::from_str("\"book\"").unwrap();
    assert_eq!(o, Orientation::Portrait);
    assert_eq!(serde_json::to_string(&Orientation::Landscape).unwrap(), "\"landscape\"");
}

#[test]
fn portrait_box_is_a4_pixels() {
    let doc = Document::default();
    let b = doc.page_box();
    assert!((b.width - 793.7).abs() < 1.0);
    assert!((b.height - 1122.5).abs() < 1.0);
}

#[test]
fn landscape_box_swaps_axes() {
    let mut doc = Document::default();
    assert!(doc.set_orientation(Orientation::Landscape));
    let b = doc.page_box();
    assert!((b.width - 1122.5).abs() < 1.0);
    assert!((b.height - 793.7).abs() < 1.0);
}

#[test]
fn toggling_twice_round_trips() {
    let mut doc = Document::default();
    let before = doc.page_box();
    doc.toggle_orientation();
    assert_ne!(doc.page_box(), before);
    doc.toggle_orientation();
    assert_eq!(doc.page_box(), before);
    assert_eq!(doc.orientation(), Orientation::Portrait);
}

#[test]
fn setting_same_orientation_is_noop() {
    let mut doc = loaded_doc(&[(800.0, 600.0)]);
    let before = doc.pages().to_vec();
    assert!(!doc.set_orientation(Orientation::Portrait));
    assert_eq!(doc.pages(), before.as_slice());
}

// =============================================================
// Layout
// =============================================================

#[test]
fn pending_pages_have_no_layout() {
    let mut doc = Document::default();
    doc.set_pages(["a", "b"]);
    assert!(doc.pages().iter().all(|p| p.layout.is_none()));
    assert_eq!(doc.pages()[0].image, ImageState::Pending);
}

#[test]
fn loaded_page_gets_fitted_layout() {
    let doc = loaded_doc(&[(800.0, 600.0)]);
    let layout = doc.page(0).unwrap().layout.unwrap();
    assert!((layout.width - 793.7).abs() < 0.5);
    assert!((layout.height - 595.3).abs() < 0.5);
    assert!((layout.offset_y - 263.6).abs() < 0.5);
}

#[test]
fn orientation_change_relays_every_page() {
    let mut doc = loaded_doc(&[(800.0, 600.0), (600.0, 800.0)]);
    doc.set_orientation(Orientation::Landscape);
    let b = doc.page_box();
    for page in doc.pages() {
        let l = page.layout.unwrap();
        let size = page.image.size().unwrap();
        assert_eq!(Some(l), fit_to_page(size.width, size.height, b.width, b.height).ok());
    }
}

#[test]
fn recompute_layouts_is_pure() {
    let doc = loaded_doc(&[(800.0, 600.0)]);
    let original = doc.pages().to_vec();
    let relaid = recompute_layouts(doc.pages(), PageBox { width: 100.0, height: 100.0 });
    assert_eq!(doc.pages(), original.as_slice());
    assert_eq!(relaid[0].layout.unwrap().width, 100.0);
    assert_eq!(relaid[0].layout.unwrap().height, 75.0);
}

#[test]
fn recompute_layouts_keeps_pending_pages_placeholder() {
    let pages = vec![Page::pending("x")];
    let relaid = recompute_layouts(&pages, PageBox { width: 10.0, height: 10.0 });
    assert_eq!(relaid[0].layout, None);
}

#[test]
fn zero_sized_image_leaves_layout_empty() {
    let mut doc = Document::default();
    doc.set_pages(["broken"]);
    let page = doc.on_page_loaded(0, ImageSize { width: 0.0, height: 10.0 }).unwrap();
    assert_eq!(page.layout, None);
}

#[test]
fn effective_layout_falls_back_to_box() {
    let mut doc = Document::default();
    doc.set_pages(["a"]);
    let l = doc.effective_layout(0).unwrap();
    assert_eq!(l.width, doc.page_box().width);
    assert_eq!(l.offset_x, 0.0);
    assert!(doc.effective_layout(5).is_none());
}

#[test]
fn load_failure_marks_page_failed() {
    let mut doc = loaded_doc(&[(800.0, 600.0)]);
    let err = LoadError { source_id: "page-0.png".into(), reason: "404".into() };
    doc.on_page_load_failed(0, err.clone()).unwrap();
    assert_eq!(doc.page(0).unwrap().image, ImageState::Failed(err.clone()));
    assert_eq!(doc.page(0).unwrap().layout, None);
    assert_eq!(err.error_code(), "E_LOAD_FAILED");
    assert!(err.retryable());
}

#[test]
fn load_callbacks_reject_unknown_page() {
    let mut doc = Document::default();
    let err = doc.on_page_loaded(3, ImageSize { width: 1.0, height: 1.0 }).unwrap_err();
    assert_eq!(err, PageError::OutOfRange { index: 3, len: 0 });
}

// =============================================================
// Navigation
// =============================================================

#[test]
fn set_pages_resets_current_page() {
    let mut doc = Document::default();
    doc.set_pages(["a", "b", "c"]);
    doc.set_current_page(2).unwrap();
    doc.set_pages(["d"]);
    assert_eq!(doc.current_page(), 0);
    assert_eq!(doc.len(), 1);
}

#[test]
fn set_current_page_out_of_range() {
    let mut doc = Document::default();
    doc.set_pages(["a"]);
    let err = doc.set_current_page(1).unwrap_err();
    assert_eq!(err.error_code(), "E_PAGE_OUT_OF_RANGE");
    assert_eq!(doc.current_page(), 0);
}

#[test]
fn thumbnails_mark_active_page() {
    let mut doc = Document::default();
    doc.set_pages(["a", "b"]);
    doc.set_current_page(1).unwrap();
    let thumbs = doc.thumbnails();
    assert_eq!(thumbs.len(), 2);
    assert!(!thumbs[0].active);
    assert!(thumbs[1].active);
    assert_eq!(thumbs[1].source, "b");
}

// =============================================================
// Page rotation
// =============================================================

#[test]
fn page_rotation_is_normalized() {
    let mut doc = Document::default();
    doc.set_rotation_degrees(-90.0);
    assert_eq!(doc.rotation_degrees(), 270.0);
    doc.set_rotation_degrees(720.0);
    assert_eq!(doc.rotation_degrees(), 0.0);
}
