//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use pvi_api::Device;
use serde_json::json;
use tracing_subscriber::EnvFilter;

/// Route library logs through the test harness, filtered by `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn device(value: serde_json::Value) -> Device {
    serde_json::from_value(value).expect("valid device description")
}

/// A camera-like device touching every widget type.
pub fn detector() -> Device {
    device(json!({
        "label": "Simple Detector",
        "children": [
            {"type": "SignalRW", "name": "AcquireTime", "pv": "AcquireTime",
             "widget": {"type": "TextWrite"},
             "read_pv": "AcquireTime_RBV", "read_widget": {"type": "TextRead"}},
            {"type": "SignalX", "name": "Start", "pv": "Acquire", "value": "1"},
            {"type": "Group", "name": "Status", "children": [
                {"type": "SignalR", "name": "Connected", "pv": "Connected",
                 "widget": {"type": "LED"}},
                {"type": "SignalR", "name": "Message", "pv": "Message",
                 "widget": {"type": "TextRead", "lines": 2}},
                {"type": "SignalW", "name": "Enable", "pv": "Enable",
                 "widget": {"type": "CheckBox"}},
                {"type": "SignalRW", "name": "ImageMode", "pv": "ImageMode",
                 "widget": {"type": "ComboBox"}}
            ]}
        ]
    }))
}

/// The detector with a trailing reference back to its `Connected` signal.
pub fn detector_with_reference() -> Device {
    let mut device = detector();
    device.children.push(
        serde_json::from_value(json!(
            {"type": "SignalRef", "name": "Connected", "label": "Online"}
        ))
        .expect("valid reference"),
    );
    device
}
