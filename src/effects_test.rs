use super::*;

#[derive(Default)]
struct RecordingBackend {
    registered: Vec<&'static str>,
}

impl FilterBackend for RecordingBackend {
    fn register_filter(&mut self, filter: FilterKind) {
        self.registered.push(filter.name());
    }
}

fn set(effects: &[Effect]) -> EffectSet {
    effects.iter().copied().collect()
}

#[test]
fn no_effects_no_filters() {
    assert!(page_filters(&EffectSet::new()).is_empty());
}

#[test]
fn scan1_brightens() {
    assert_eq!(page_filters(&set(&[Effect::Scan1])), vec![FilterKind::BrightenGradient]);
}

#[test]
fn scan2_grayscale_and_contrast() {
    assert_eq!(page_filters(&set(&[Effect::Scan2])), vec![FilterKind::Grayscale, FilterKind::Contrast(0.2)]);
}

#[test]
fn side_artifact_adds_no_image_filter() {
    assert!(page_filters(&set(&[Effect::SideArtifact])).is_empty());
}

#[test]
fn combined_effects_keep_order() {
    let filters = page_filters(&set(&[Effect::Scan2, Effect::Scan1]));
    let names: Vec<_> = filters.iter().map(FilterKind::name).collect();
    assert_eq!(names, vec!["BrightenGradient", "Grayscale", "Contrast"]);
}

#[test]
fn effect_serde_names() {
    assert_eq!(serde_json::to_string(&Effect::SideArtifact).unwrap(), "\"sideArtifact\"");
    let e: Effect = serde_json::from_str("\"scan1\"").unwrap();
    assert_eq!(e, Effect::Scan1);
}

#[test]
fn registration_happens_once() {
    let mut registry = FilterRegistry::default();
    let mut backend = RecordingBackend::default();
    assert!(!registry.is_registered());
    assert!(registry.register_custom_filters(&mut backend));
    assert!(!registry.register_custom_filters(&mut backend));
    assert!(registry.is_registered());
    assert_eq!(backend.registered, vec!["BrightenGradient"]);
}
