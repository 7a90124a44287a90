//! PVI screen formatting.
//!
//! Lays out a device description as a screen and writes it in the format of
//! a legacy display manager by editing copies of the widgets in a template
//! document.
//!
//! # Architecture
//!
//! - [`template`]: parses a template document into a catalog of widget
//!   fragments and overwrites properties on copies of them
//! - [`widget`]: bindings from catalog fragments to placed widgets, and the
//!   placed [`WidgetFactory`] tree that renders itself into fragments
//! - [`screen`]: the layout engine that places every component of a device
//! - [`formatter`]: complete DLS and APS screens with embedded templates
//!
//! # Usage
//!
//! ```ignore
//! use pvi_format::{DlsFormatter, Formatter};
//!
//! let device: pvi_api::Device = serde_json::from_str(&json)?;
//! DlsFormatter::default().format(&device, "BL01:CAM:", Path::new("cam.bob"))?;
//! ```

mod bounds;
mod error;

pub mod formatter;
pub mod screen;
pub mod template;
pub mod widget;

pub use bounds::Bounds;
pub use error::FormatError;
pub use formatter::{ApsFormatter, DlsFormatter, Formatter};
pub use screen::{LayoutProperties, Screen, ScreenWidgets};
pub use template::{AdlTemplate, BobTemplate, EdlTemplate, WidgetTemplate};
pub use widget::{WidgetFactory, WidgetKind};
