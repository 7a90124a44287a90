//! Template catalogs - named widget fragments cut out of a template document.
//!
//! Each screen format has a hand-authored template document containing one
//! example of every widget the formatters emit. A catalog parses that
//! document once, hands out copies of individual fragments by name, and
//! writes bounds and properties into those copies.

mod adl;
mod bob;
mod edl;
mod xml;

pub use adl::AdlTemplate;
pub use bob::BobTemplate;
pub use edl::EdlTemplate;
pub use xml::Element;

use std::fmt;

use indexmap::IndexMap;
use regex::Regex;

use crate::{Bounds, FormatError};

/// A value written into a template property.
///
/// Text formats quote strings and leave integers bare.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    Str(String),
    Int(i64),
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Str(s) => f.write_str(s),
            PropertyValue::Int(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::Str(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::Str(s)
    }
}

impl From<i32> for PropertyValue {
    fn from(n: i32) -> Self {
        PropertyValue::Int(n.into())
    }
}

/// Property name to value, applied in insertion order.
pub type Properties = IndexMap<String, PropertyValue>;

/// The capabilities every template catalog provides.
pub trait WidgetTemplate: fmt::Debug + Send + Sync {
    /// One widget (or the screen shell) in this format.
    type Fragment: Clone + fmt::Debug + Send + Sync;

    /// The screen shell with no widgets in it.
    fn screen(&self) -> &Self::Fragment;

    /// Find the single widget fragment matching `search`.
    fn search(&self, search: &str) -> Result<Self::Fragment, FormatError>;

    /// Return a copy of `fragment` with its bounds and properties overwritten.
    fn set(
        &self,
        fragment: &Self::Fragment,
        bounds: Option<Bounds>,
        properties: Properties,
    ) -> Result<Self::Fragment, FormatError>;

    /// Whether group children are nested inside the group fragment.
    ///
    /// Nested children are positioned relative to their group.
    fn nests_children(&self) -> bool {
        false
    }

    /// Combine a group's own fragments with its formatted children.
    fn create_group(
        &self,
        mut group_object: Vec<Self::Fragment>,
        children: Vec<Self::Fragment>,
    ) -> Result<Vec<Self::Fragment>, FormatError> {
        group_object.extend(children);
        Ok(group_object)
    }

    /// Produce the final file contents from the formatted screen.
    ///
    /// The first fragment is always the screen shell.
    fn render(&self, fragments: Vec<Self::Fragment>) -> Result<String, FormatError>;
}

/// Split `text` into the pieces terminated by `sep`, keeping the separator.
///
/// Anything after the last separator is dropped if it is only whitespace.
pub(crate) fn split_with_sep(text: &str, sep: &str) -> Vec<String> {
    let mut pieces: Vec<String> = Vec::new();
    let mut rest = text;
    while let Some(index) = rest.find(sep) {
        let end = index + sep.len();
        pieces.push(rest[..end].to_string());
        rest = &rest[end..];
    }
    if !rest.trim().is_empty() {
        pieces.push(rest.to_string());
    }
    pieces
}

/// Find the single text fragment the `search` regex matches.
pub(crate) fn search_text(widgets: &[String], search: &str) -> Result<String, FormatError> {
    let pattern = Regex::new(search)
        .map_err(|e| FormatError::Template(format!("invalid search {:?}: {}", search, e)))?;
    let matches: Vec<&String> = widgets.iter().filter(|w| pattern.is_match(w)).collect();
    match matches.as_slice() {
        [only] => Ok((*only).clone()),
        _ => Err(FormatError::TemplateMatch {
            search: search.to_string(),
            count: matches.len(),
        }),
    }
}

/// Compile a property pattern built from an escaped property name.
pub(crate) fn property_pattern(pattern: &str) -> Result<Regex, FormatError> {
    Regex::new(pattern)
        .map_err(|e| FormatError::Template(format!("invalid property pattern {:?}: {}", pattern, e)))
}

/// Insert the four bounds values under the format's key names.
pub(crate) fn insert_bounds(properties: &mut Properties, bounds: Bounds, keys: [&str; 4]) {
    let [x, y, w, h] = keys;
    properties.insert(x.to_string(), bounds.x.into());
    properties.insert(y.to_string(), bounds.y.into());
    properties.insert(w.to_string(), bounds.w.into());
    properties.insert(h.to_string(), bounds.h.into());
}
