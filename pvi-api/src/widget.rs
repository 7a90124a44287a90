//! Widget specifications attached to signals.

use serde::{Deserialize, Serialize};

fn one_line() -> u32 {
    1
}

/// Widget that displays a PV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ReadWidget {
    /// LED display of a boolean PV.
    #[serde(rename = "LED")]
    Led,
    /// Text view of any PV.
    TextRead {
        #[serde(default = "one_line")]
        lines: u32,
    },
    /// Read-only view of an enum PV.
    ComboBox,
}

/// Widget that controls a PV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum WriteWidget {
    /// Checkable control of a boolean PV.
    CheckBox,
    /// Selection of an enum PV.
    ComboBox,
    /// Text control of any PV.
    TextWrite {
        #[serde(default = "one_line")]
        lines: u32,
    },
}

impl ReadWidget {
    /// Number of widget rows this widget occupies.
    pub fn lines(&self) -> u32 {
        match self {
            ReadWidget::TextRead { lines } => *lines,
            ReadWidget::Led | ReadWidget::ComboBox => 1,
        }
    }
}

impl WriteWidget {
    /// Number of widget rows this widget occupies.
    pub fn lines(&self) -> u32 {
        match self {
            WriteWidget::TextWrite { lines } => *lines,
            WriteWidget::CheckBox | WriteWidget::ComboBox => 1,
        }
    }
}

/// How a group lays out its children on screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Layout {
    /// Children are rows in the grid.
    Grid {
        /// If true, use the names of children as labels.
        #[serde(default = "labelled_default")]
        labelled: bool,
    },
    /// Children are columns in the row.
    Row {
        #[serde(default)]
        header: Option<Vec<String>>,
    },
    /// Children are traces of a plot.
    Plot,
}

fn labelled_default() -> bool {
    true
}

impl Default for Layout {
    fn default() -> Self {
        Layout::Grid { labelled: true }
    }
}

impl Layout {
    /// Short name used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Layout::Grid { .. } => "Grid",
            Layout::Row { .. } => "Row",
            Layout::Plot => "Plot",
        }
    }
}
