//! Components - the nodes of a device description tree.

use serde::{Deserialize, Serialize};

use crate::{Layout, ReadWidget, WriteWidget};

/// One node of a device description.
///
/// Signals carry the PVs and widget choices for a single value, `SignalX`
/// puts a fixed value to a PV, `SignalRef` refers back to a signal defined
/// earlier in the same device, and `Group` nests further components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Component {
    /// Read only value backed by a single PV.
    SignalR {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        pv: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        widget: Option<ReadWidget>,
    },
    /// Write only value backed by a single PV.
    SignalW {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        pv: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        widget: Option<WriteWidget>,
    },
    /// Read/write value backed by one or two PVs.
    SignalRW {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        pv: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        widget: Option<WriteWidget>,
        /// PV used for read, empty means use `pv`.
        #[serde(default, skip_serializing_if = "String::is_empty")]
        read_pv: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        read_widget: Option<ReadWidget>,
    },
    /// Executable that puts a fixed value to a PV.
    SignalX {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        pv: String,
        /// Value to write, `None` means zero.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<String>,
    },
    /// Reference to another signal with the same name in this device.
    SignalRef {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
    /// Group of child components in a layout.
    Group {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        #[serde(default)]
        layout: Layout,
        #[serde(default)]
        children: Vec<Component>,
    },
}

impl Component {
    /// The PascalCase name identifying this component.
    pub fn name(&self) -> &str {
        match self {
            Component::SignalR { name, .. }
            | Component::SignalW { name, .. }
            | Component::SignalRW { name, .. }
            | Component::SignalX { name, .. }
            | Component::SignalRef { name, .. }
            | Component::Group { name, .. } => name,
        }
    }

    /// Display label: the explicit label if given, else the name in Title Case.
    pub fn label(&self) -> String {
        let label = match self {
            Component::SignalR { label, .. }
            | Component::SignalW { label, .. }
            | Component::SignalRW { label, .. }
            | Component::SignalX { label, .. }
            | Component::SignalRef { label, .. }
            | Component::Group { label, .. } => label,
        };
        match label {
            Some(label) => label.clone(),
            None => to_title_case(self.name()),
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, Component::Group { .. })
    }

    /// Layout and children if this is a group.
    pub fn as_group(&self) -> Option<(&Layout, &[Component])> {
        match self {
            Component::Group {
                layout, children, ..
            } => Some((layout, children)),
            _ => None,
        }
    }

    /// Short name of the variant, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Component::SignalR { .. } => "SignalR",
            Component::SignalW { .. } => "SignalW",
            Component::SignalRW { .. } => "SignalRW",
            Component::SignalX { .. } => "SignalX",
            Component::SignalRef { .. } => "SignalRef",
            Component::Group { .. } => "Group",
        }
    }
}

/// A collection of components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub label: String,
    #[serde(default)]
    pub children: Vec<Component>,
}

/// Depth first traversal of a component tree; groups come before their children.
pub fn walk(tree: &[Component]) -> Walk<'_> {
    Walk {
        stack: vec![tree.iter()],
    }
}

/// Iterator returned by [`walk`].
pub struct Walk<'a> {
    stack: Vec<std::slice::Iter<'a, Component>>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a Component;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(iter) = self.stack.last_mut() {
            match iter.next() {
                Some(component) => {
                    if let Component::Group { children, .. } = component {
                        self.stack.push(children.iter());
                    }
                    return Some(component);
                }
                None => {
                    self.stack.pop();
                }
            }
        }
        None
    }
}

/// Convert a PascalCase name into Title Case words.
///
/// A space goes before an uppercase letter that starts a word (not preceded
/// by another uppercase letter, or followed by a lowercase one) and before
/// a digit that follows a lowercase letter. Acronyms stay together:
/// `ADCMode` becomes `ADC Mode`.
pub fn to_title_case(pascal: &str) -> String {
    let chars: Vec<char> = pascal.chars().collect();
    let mut out = String::with_capacity(pascal.len() + 8);

    for (i, &c) in chars.iter().enumerate() {
        let prev = i.checked_sub(1).map(|p| chars[p]);
        let next = chars.get(i + 1).copied();

        let starts_word = if c.is_ascii_uppercase() {
            !prev.is_some_and(|p| p.is_ascii_uppercase())
                || next.is_some_and(|n| n.is_ascii_lowercase())
        } else if c.is_ascii_digit() {
            prev.is_some_and(|p| p.is_ascii_lowercase())
        } else {
            false
        };

        if starts_word && !out.is_empty() {
            out.push(' ');
        }
        out.push(c);
    }
    out
}
