//! End-to-end layout tests through the DLS and APS formatters.
//!
//! Each test lays out a small device with the shipped presets and checks
//! the placed widgets in the rendered screen text.

mod common;

use std::sync::Arc;

use common::{detector, detector_with_reference, device, init_tracing};
use pvi_format::template::Element;
use pvi_format::widget::WidgetBinding;
use pvi_format::{ApsFormatter, DlsFormatter, EdlTemplate, FormatError};
use serde_json::json;

fn gain() -> pvi_api::Device {
    device(json!({
        "label": "Simple",
        "children": [
            {"type": "SignalRW", "name": "Gain", "pv": "Gain",
             "widget": {"type": "TextWrite"},
             "read_pv": "Gain_RBV", "read_widget": {"type": "TextRead"}}
        ]
    }))
}

fn position(text: &str, needle: &str) -> usize {
    text.find(needle)
        .unwrap_or_else(|| panic!("{:?} not found in output", needle))
}

#[test]
fn test_read_write_signal_gives_label_and_two_widgets() {
    init_tracing();
    let text = DlsFormatter::default().format_edl(&gain(), "P:").unwrap();

    // title, label, write widget, read widget
    assert_eq!(text.matches("endObjectProperties").count(), 4);

    let screen = position(&text, "x 0\ny 0\nw 260\nh 55\n");
    let title = position(&text, "value {\n  \"Simple - P:\"\n}");
    let label = position(&text, "x 10\ny 30\nw 115\nh 20\n");
    let write = position(&text, "x 130\ny 30\nw 60\nh 20\ncontrolPv \"P:Gain\"\n");
    let read = position(&text, "x 195\ny 30\nw 60\nh 20\ncontrolPv \"P:Gain_RBV\"\n");
    assert!(screen < title && title < label && label < write && write < read);

    assert!(text.contains("title \"Simple - P:\""));
    assert!(text.contains("value {\n  \"Gain\"\n}"));
}

#[test]
fn test_edl_group_box_precedes_children() {
    init_tracing();
    let text = DlsFormatter::default()
        .format_edl(&detector_with_reference(), "P:")
        .unwrap();

    let group_box = position(&text, "fillColor index 5");
    let group_title = position(&text, "\"  Status  \"");
    let led = position(&text, "controlPv \"P:Connected\"");
    assert!(group_box < group_title && group_title < led);

    // the reference adds its own label, then the target's label and LED
    assert_eq!(text.matches("controlPv \"P:Connected\"").count(), 2);
    assert_eq!(text.matches("value {\n  \"Connected\"\n}").count(), 2);
    assert!(text.contains("value {\n  \"Online\"\n}"));
    assert!(!text.contains("\"LED\""));
}

#[test]
fn test_reference_repeats_target_label() {
    init_tracing();
    let gain = device(json!({
        "label": "Simple",
        "children": [
            {"type": "SignalR", "name": "Gain", "pv": "Gain", "widget": {"type": "TextRead"}},
            {"type": "SignalRef", "name": "Gain"}
        ]
    }));
    let text = DlsFormatter::default().format_edl(&gain, "P:").unwrap();
    assert_eq!(text.matches("value {\n  \"Gain\"\n}").count(), 3);
    assert_eq!(text.matches("controlPv \"P:Gain\"").count(), 2);
}

#[test]
fn test_action_pv_is_not_prefixed() {
    init_tracing();
    let reset = device(json!({
        "label": "Simple",
        "children": [{"type": "SignalX", "name": "Reset", "pv": "Reset", "value": "1"}]
    }));
    let text = DlsFormatter::default().format_edl(&reset, "P:").unwrap();
    assert!(text.contains("controlPv \"Reset\""));
    assert!(!text.contains("P:Reset"));
    assert!(text.contains("pressValue \"1\""));
}

#[test]
fn test_huge_line_count_is_rejected() {
    init_tracing();
    let message = device(json!({
        "label": "Simple",
        "children": [
            {"type": "SignalR", "name": "Message", "pv": "Msg",
             "widget": {"type": "TextRead", "lines": 1_073_741_824u32}}
        ]
    }));
    match DlsFormatter::default().format_edl(&message, "P:") {
        Err(FormatError::Geometry { pv, lines }) => {
            assert_eq!(pv, "Msg");
            assert_eq!(lines, 1_073_741_824);
        }
        other => panic!("Expected geometry error, got {:?}", other),
    }
}

#[test]
fn test_bob_groups_nest_children_relative_to_group() {
    init_tracing();
    let status = device(json!({
        "label": "Simple",
        "children": [
            {"type": "Group", "name": "Status", "children": [
                {"type": "SignalR", "name": "Connected", "pv": "Connected",
                 "widget": {"type": "LED"}}
            ]}
        ]
    }));
    let text = DlsFormatter::default().format_bob(&status, "P:").unwrap();
    let doc = Element::parse(&text).unwrap();

    assert_eq!(doc.child_text("name"), Some("Simple - P:"));
    assert_eq!(doc.child_text("width"), Some("290"));
    assert_eq!(doc.child_text("height"), Some("90"));

    let widgets: Vec<&Element> = doc.children.iter().filter(|c| c.tag == "widget").collect();
    assert_eq!(widgets.len(), 2);
    assert_eq!(widgets[0].child_text("text"), Some("Simple - P:"));
    assert_eq!(widgets[0].child_text("width"), Some("290"));

    let group = widgets[1];
    assert_eq!(group.child_text("name"), Some("Status"));
    assert_eq!(group.child_text("x"), Some("4"));
    assert_eq!(group.child_text("y"), Some("32"));
    assert_eq!(group.child_text("width"), Some("282"));
    assert_eq!(group.child_text("height"), Some("54"));

    let children: Vec<&Element> = group.children.iter().filter(|c| c.tag == "widget").collect();
    assert_eq!(children.len(), 2);
    assert_eq!(children[0].child_text("text"), Some("Connected"));
    assert_eq!(children[0].child_text("x"), Some("4"));
    assert_eq!(children[0].child_text("y"), Some("30"));
    assert_eq!(children[1].child_text("pv_name"), Some("P:Connected"));
    assert_eq!(children[1].child_text("x"), Some("180"));
    assert_eq!(children[1].child_text("y"), Some("30"));
    assert_eq!(children[1].child_text("width"), Some("20"));
}

#[test]
fn test_adl_group_decorations() {
    init_tracing();
    let text = ApsFormatter::default().format_adl(&detector(), "P:").unwrap();

    assert_eq!(text.matches("fill=\"solid\"").count(), 2);
    assert_eq!(text.matches("fill=\"outline\"").count(), 1);
    let group_box = position(&text, "fill=\"outline\"");
    let group_title = position(&text, "textix=\"Status\"");
    let led = position(&text, "chan=\"P:Connected\"");
    assert!(group_box < group_title && group_title < led);

    assert!(text.contains("label=\"Start\""));
    assert!(text.contains("press_msg=\"1\""));
    assert!(text.contains("chan=\"Acquire\""));
}

#[test]
fn test_formatting_is_deterministic() {
    init_tracing();
    let device = detector();
    let dls = DlsFormatter::default();
    let aps = ApsFormatter::default();

    assert_eq!(
        dls.format_edl(&device, "P:").unwrap(),
        dls.format_edl(&device, "P:").unwrap()
    );
    assert_eq!(
        dls.format_bob(&device, "P:").unwrap(),
        dls.format_bob(&device, "P:").unwrap()
    );
    assert_eq!(
        aps.format_adl(&device, "P:").unwrap(),
        aps.format_adl(&device, "P:").unwrap()
    );
}

#[test]
fn test_unresolved_reference_is_reported() {
    init_tracing();
    let forward = device(json!({
        "label": "Forward",
        "children": [
            {"type": "SignalRef", "name": "Gain"},
            {"type": "SignalR", "name": "Gain", "pv": "Gain", "widget": {"type": "TextRead"}}
        ]
    }));
    match DlsFormatter::default().format_edl(&forward, "P:") {
        Err(FormatError::UnresolvedReference(name)) => assert_eq!(name, "Gain"),
        other => panic!("Expected unresolved reference, got {:?}", other),
    }
}

#[test]
fn test_row_layout_is_rejected() {
    init_tracing();
    let table = device(json!({
        "label": "Table",
        "children": [
            {"type": "Group", "name": "Channels", "layout": {"type": "Row"}, "children": []}
        ]
    }));
    match ApsFormatter::default().format_adl(&table, "P:") {
        Err(FormatError::UnsupportedLayout { group, layout }) => {
            assert_eq!(group, "Channels");
            assert_eq!(layout, "Row");
        }
        other => panic!("Expected unsupported layout, got {:?}", other),
    }
}

#[test]
fn test_missing_and_ambiguous_searches() {
    let template = Arc::new(
        EdlTemplate::new(
            "4 0 1
beginScreenProperties
x 0
endScreenProperties
object ByteClass
beginObjectProperties
controlPv \"LED\"
endObjectProperties
object TextupdateClass
beginObjectProperties
controlPv \"TextRead\"
endObjectProperties
",
        )
        .unwrap(),
    );

    match WidgetBinding::from_template(&template, "\"CheckBox\"") {
        Err(FormatError::TemplateMatch { search, count }) => {
            assert_eq!(search, "\"CheckBox\"");
            assert_eq!(count, 0);
        }
        other => panic!("Expected no match, got {:?}", other),
    }
    match WidgetBinding::from_template(&template, "controlPv") {
        Err(FormatError::TemplateMatch { count, .. }) => assert_eq!(count, 2),
        other => panic!("Expected ambiguous match, got {:?}", other),
    }
    assert!(WidgetBinding::from_template(&template, "\"LED\"").is_ok());
}
