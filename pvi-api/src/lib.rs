//! PVI API - Device description types shared by the PVI formatters.
//!
//! A `Device` is a tree of `Component`s: signals, actions, back-references
//! and groups. The formatters only ever read these values.

mod component;
mod widget;

pub use component::*;
pub use widget::*;
