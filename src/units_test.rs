#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn one_inch_is_reference_dpi() {
    assert_eq!(mm_to_px(25.4), 96.0);
}

#[test]
fn zero_mm_is_zero_px() {
    assert_eq!(mm_to_px(0.0), 0.0);
}

#[test]
fn a4_portrait_matches_expected_pixels() {
    let (w, h) = PaperSize::A4.portrait_px();
    assert!((w - 793.7).abs() < 1.0);
    assert!((h - 1122.5).abs() < 1.0);
}

#[test]
fn a4_landscape_swaps_axes() {
    let (pw, ph) = PaperSize::A4.portrait_px();
    let (lw, lh) = PaperSize::A4.landscape_px();
    assert_eq!(pw, lh);
    assert_eq!(ph, lw);
}

#[test]
fn stamp_size_is_about_151_px() {
    let px = mm_to_px(crate::consts::STAMP_SIZE_MM);
    assert!((px - 151.18).abs() < 0.01);
}

#[test]
fn default_paper_is_a4() {
    assert_eq!(PaperSize::default(), PaperSize::A4);
}
