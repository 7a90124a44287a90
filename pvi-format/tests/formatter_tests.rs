//! Writing screen files through the `Formatter` trait.

mod common;

use common::{detector, device, init_tracing};
use pvi_format::{ApsFormatter, DlsFormatter, FormatError, Formatter};
use serde_json::json;

#[test]
fn test_writes_each_format_by_extension() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let device = detector();
    let dls = DlsFormatter::default();
    let aps = ApsFormatter::default();

    let edl = dir.path().join("detector.edl");
    dls.format(&device, "P:", &edl).unwrap();
    let text = std::fs::read_to_string(&edl).unwrap();
    assert!(text.starts_with("4 0 1\n"));
    assert_eq!(text, dls.render(&device, "P:", "edl").unwrap());

    let bob = dir.path().join("detector.bob");
    dls.format(&device, "P:", &bob).unwrap();
    let text = std::fs::read_to_string(&bob).unwrap();
    assert!(text.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(text.contains("<name>Simple Detector - P:</name>"));

    let adl = dir.path().join("detector.adl");
    aps.format(&device, "P:", &adl).unwrap();
    let text = std::fs::read_to_string(&adl).unwrap();
    assert!(text.starts_with("file {"));
    assert!(text.contains("textix=\"Simple Detector - P:\""));
}

#[test]
fn test_unsupported_extension_writes_nothing() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("detector.adl");

    let err = DlsFormatter::default()
        .format(&detector(), "P:", &path)
        .unwrap_err();
    match err.downcast_ref::<FormatError>() {
        Some(FormatError::UnsupportedOutput(msg)) => assert!(msg.contains("adl")),
        other => panic!("Expected unsupported output, got {:?}", other),
    }
    assert!(!path.exists());

    let path = dir.path().join("detector");
    assert!(ApsFormatter::default().format(&detector(), "P:", &path).is_err());
    assert!(!path.exists());
}

#[test]
fn test_failed_screen_leaves_other_files_alone() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let dls = DlsFormatter::default();

    let good = dir.path().join("good.edl");
    dls.format(&detector(), "P:", &good).unwrap();
    let before = std::fs::read_to_string(&good).unwrap();

    let broken = device(json!({
        "label": "Broken",
        "children": [{"type": "SignalRef", "name": "Nowhere"}]
    }));
    let bad = dir.path().join("bad.edl");
    let err = dls.format(&broken, "P:", &bad).unwrap_err();
    assert!(format!("{:#}", err).contains("Nowhere"));
    assert!(!bad.exists());

    assert_eq!(std::fs::read_to_string(&good).unwrap(), before);
}

#[test]
fn test_presets_load_from_config() {
    let dls: DlsFormatter = serde_json::from_value(json!({
        "edl": {
            "spacing": 10, "title_height": 30, "max_height": 600,
            "group_label_height": 10, "label_width": 150, "widget_width": 150,
            "widget_height": 25
        }
    }))
    .unwrap();
    assert_eq!(dls.edl.spacing, 10);
    assert_eq!(dls.edl.group_widget_indent, 0);
    assert_eq!(dls.bob, DlsFormatter::default().bob);

    let aps: ApsFormatter = serde_json::from_value(json!({})).unwrap();
    assert_eq!(aps, ApsFormatter::default());
    assert_eq!(aps.layout.label_width, 205);
}
