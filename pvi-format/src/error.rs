//! Format error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("got {count} matches for {search:?}")]
    TemplateMatch { search: String, count: usize },

    #[error("failed to locate '{property}' in {fragment}")]
    MissingProperty { fragment: String, property: String },

    #[error("expected one replacement for '{property}', made {count}")]
    Substitution { property: String, count: usize },

    #[error("widget bound to {search:?} has no field '{field}'")]
    UnknownField { search: String, field: &'static str },

    #[error("can't do groups in {0} templates")]
    GroupedTemplate(&'static str),

    #[error("can only lay out Grid groups, {group} uses {layout}")]
    UnsupportedLayout { group: String, layout: &'static str },

    #[error("nested group {child} in {group} is not supported")]
    NestedGroup { group: String, child: String },

    #[error("reference to {0} before it was defined")]
    UnresolvedReference(String),

    #[error("can't split off {requested} from {available}")]
    Split { requested: i32, available: i32 },

    #[error("{lines} lines is too tall a widget for {pv}")]
    Geometry { pv: String, lines: u32 },

    #[error("can't write {0} files")]
    UnsupportedOutput(String),

    #[error("malformed template: {0}")]
    Template(String),

    #[error("xml error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
