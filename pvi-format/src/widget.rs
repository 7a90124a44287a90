//! Widget factories - placed widgets bound to template fragments.
//!
//! A [`WidgetBinding`] ties one template fragment to a sizing rule and a map
//! from template property names to factory fields. Bindings are built once
//! per template and shared; every widget placed by the layout engine is a
//! [`WidgetFactory`] holding its final bounds, its own field values and the
//! binding used to render it.

use std::fmt;
use std::sync::Arc;

use crate::template::{Properties, PropertyValue, WidgetTemplate};
use crate::{Bounds, FormatError};

/// A value carried by a widget factory that can be written into a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Text,
    Pv,
    Label,
    Value,
    Title,
}

impl Field {
    pub fn name(&self) -> &'static str {
        match self {
            Field::Text => "text",
            Field::Pv => "pv",
            Field::Label => "label",
            Field::Value => "value",
            Field::Title => "title",
        }
    }
}

/// How a factory's bounds are adjusted before being written to the template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sizing {
    /// Use the bounds unchanged.
    #[default]
    Copy,
    /// Largest centred square.
    Square,
    /// Add a fixed margin to every component.
    Padded(Bounds),
}

impl Sizing {
    pub fn apply(&self, bounds: Bounds) -> Bounds {
        match self {
            Sizing::Copy => bounds,
            Sizing::Square => bounds.square(),
            Sizing::Padded(padding) => bounds.added_to(padding),
        }
    }
}

/// Sizing that reserves a title bar of `title_height` and a `spacing` border.
pub fn with_title(spacing: i32, title_height: i32) -> Sizing {
    Sizing::Padded(Bounds::new(
        spacing,
        spacing + title_height,
        2 * spacing,
        2 * spacing + title_height,
    ))
}

/// Build the property map for a binding's attribute list.
fn properties(
    search: &str,
    attrs: &[(String, Field)],
    lookup: impl Fn(Field) -> Option<String>,
) -> Result<Properties, FormatError> {
    let mut props = Properties::new();
    for (property, field) in attrs {
        let value = lookup(*field).ok_or_else(|| FormatError::UnknownField {
            search: search.to_string(),
            field: field.name(),
        })?;
        props.insert(property.clone(), PropertyValue::Str(value));
    }
    Ok(props)
}

// =========================================================================
// WidgetBinding
// =========================================================================

/// One template fragment bound to a sizing rule and attribute mapping.
pub struct WidgetBinding<T: WidgetTemplate> {
    template: Arc<T>,
    search: String,
    fragment: T::Fragment,
    sizing: Sizing,
    attrs: Vec<(String, Field)>,
}

impl<T: WidgetTemplate> fmt::Debug for WidgetBinding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetBinding")
            .field("search", &self.search)
            .field("sizing", &self.sizing)
            .field("attrs", &self.attrs)
            .finish()
    }
}

impl<T: WidgetTemplate> WidgetBinding<T> {
    /// Bind to the fragment of `template` matching `search`.
    pub fn from_template(template: &Arc<T>, search: &str) -> Result<Self, FormatError> {
        let fragment = template.search(search)?;
        Ok(Self {
            template: Arc::clone(template),
            search: search.to_string(),
            fragment,
            sizing: Sizing::Copy,
            attrs: Vec::new(),
        })
    }

    /// Set the sizing rule.
    pub fn sized(mut self, sizing: Sizing) -> Self {
        self.sizing = sizing;
        self
    }

    /// Write `field` into the template property `property`.
    pub fn attr(mut self, property: &str, field: Field) -> Self {
        self.attrs.push((property.to_string(), field));
        self
    }

    /// Finish building, ready to be shared between factories.
    pub fn build(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// A decoration with no fields of its own.
    pub fn shape(self: &Arc<Self>, bounds: Bounds) -> WidgetFactory<T> {
        WidgetFactory {
            bounds,
            kind: WidgetKind::Shape {
                binding: Arc::clone(self),
            },
        }
    }

    pub fn label(self: &Arc<Self>, bounds: Bounds, text: impl Into<String>) -> WidgetFactory<T> {
        WidgetFactory {
            bounds,
            kind: WidgetKind::Label {
                binding: Arc::clone(self),
                text: text.into(),
            },
        }
    }

    pub fn pv_widget(self: &Arc<Self>, bounds: Bounds, pv: impl Into<String>) -> WidgetFactory<T> {
        WidgetFactory {
            bounds,
            kind: WidgetKind::PvWidget {
                binding: Arc::clone(self),
                pv: pv.into(),
            },
        }
    }

    pub fn action(
        self: &Arc<Self>,
        bounds: Bounds,
        label: impl Into<String>,
        pv: impl Into<String>,
        value: impl Into<String>,
    ) -> WidgetFactory<T> {
        WidgetFactory {
            bounds,
            kind: WidgetKind::Action {
                binding: Arc::clone(self),
                label: label.into(),
                pv: pv.into(),
                value: value.into(),
            },
        }
    }

    fn format(
        &self,
        bounds: Bounds,
        lookup: impl Fn(Field) -> Option<String>,
    ) -> Result<T::Fragment, FormatError> {
        let props = properties(&self.search, &self.attrs, lookup)?;
        self.template
            .set(&self.fragment, Some(self.sizing.apply(bounds)), props)
    }
}

// =========================================================================
// GroupBinding
// =========================================================================

/// Whether a group binding produces the whole screen or a group within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupType {
    Screen,
    Group,
}

/// Decorations added around a group: title bars, boxes, backgrounds.
pub type MakeWidgets<T> = Box<dyn Fn(Bounds, &str) -> Vec<WidgetFactory<T>> + Send + Sync>;

/// Binding for screens and groups: a sizing rule plus decoration callback.
pub struct GroupBinding<T: WidgetTemplate> {
    template: Arc<T>,
    group_type: GroupType,
    sizing: Sizing,
    make_widgets: Option<MakeWidgets<T>>,
    attrs: Vec<(String, Field)>,
}

impl<T: WidgetTemplate> fmt::Debug for GroupBinding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroupBinding")
            .field("group_type", &self.group_type)
            .field("sizing", &self.sizing)
            .field("make_widgets", &self.make_widgets.is_some())
            .field("attrs", &self.attrs)
            .finish()
    }
}

impl<T: WidgetTemplate> GroupBinding<T> {
    pub fn new(template: &Arc<T>, group_type: GroupType) -> Self {
        Self {
            template: Arc::clone(template),
            group_type,
            sizing: Sizing::Copy,
            make_widgets: None,
            attrs: Vec::new(),
        }
    }

    pub fn sized(mut self, sizing: Sizing) -> Self {
        self.sizing = sizing;
        self
    }

    /// Write `field` into a screen property. Only used for screens.
    pub fn attr(mut self, property: &str, field: Field) -> Self {
        self.attrs.push((property.to_string(), field));
        self
    }

    /// Set the decoration callback, called with the group bounds and title.
    pub fn make_widgets(
        mut self,
        f: impl Fn(Bounds, &str) -> Vec<WidgetFactory<T>> + Send + Sync + 'static,
    ) -> Self {
        self.make_widgets = Some(Box::new(f));
        self
    }

    pub fn build(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Create a group around already placed children.
    ///
    /// The width and height grow by the sizing margin so that the reported
    /// bounds include any title bar and border.
    pub fn group(
        self: &Arc<Self>,
        bounds: Bounds,
        title: impl Into<String>,
        children: Vec<WidgetFactory<T>>,
    ) -> WidgetFactory<T> {
        let padded = self.sizing.apply(bounds);
        WidgetFactory {
            bounds: Bounds {
                w: padded.w,
                h: padded.h,
                ..bounds
            },
            kind: WidgetKind::Group(GroupFactory {
                binding: Arc::clone(self),
                title: title.into(),
                children,
            }),
        }
    }

    fn decorations(&self, bounds: Bounds, title: &str) -> Result<Vec<T::Fragment>, FormatError> {
        let mut fragments = Vec::new();
        if let Some(make_widgets) = &self.make_widgets {
            for widget in make_widgets(bounds, title) {
                fragments.extend(widget.format()?);
            }
        }
        Ok(fragments)
    }

    fn format(
        &self,
        bounds: Bounds,
        title: String,
        children: Vec<WidgetFactory<T>>,
    ) -> Result<Vec<T::Fragment>, FormatError> {
        let padding = self.sizing.apply(bounds);

        match self.group_type {
            GroupType::Screen => {
                let props = properties("screen", &self.attrs, |field| match field {
                    Field::Title => Some(title.clone()),
                    _ => None,
                })?;
                let mut fragments = vec![self.template.set(
                    self.template.screen(),
                    Some(bounds),
                    props,
                )?];
                fragments.extend(self.decorations(bounds, &title)?);
                for mut child in children {
                    child.bounds = child.bounds.translate(padding.x, padding.y);
                    fragments.extend(child.format()?);
                }
                Ok(fragments)
            }
            GroupType::Group => {
                let group_object = self.decorations(bounds, &title)?;
                let (dx, dy) = if self.template.nests_children() {
                    (padding.x - bounds.x, padding.y - bounds.y)
                } else {
                    (padding.x, padding.y)
                };
                let mut formatted = Vec::new();
                for mut child in children {
                    child.bounds = child.bounds.translate(dx, dy);
                    formatted.extend(child.format()?);
                }
                self.template.create_group(group_object, formatted)
            }
        }
    }
}

// =========================================================================
// WidgetFactory
// =========================================================================

/// A placed widget, ready to be formatted once.
#[derive(Debug)]
pub struct WidgetFactory<T: WidgetTemplate> {
    pub bounds: Bounds,
    pub kind: WidgetKind<T>,
}

/// The widget variants and their field values.
#[derive(Debug)]
pub enum WidgetKind<T: WidgetTemplate> {
    Shape {
        binding: Arc<WidgetBinding<T>>,
    },
    Label {
        binding: Arc<WidgetBinding<T>>,
        text: String,
    },
    PvWidget {
        binding: Arc<WidgetBinding<T>>,
        pv: String,
    },
    Action {
        binding: Arc<WidgetBinding<T>>,
        label: String,
        pv: String,
        value: String,
    },
    Group(GroupFactory<T>),
}

/// A screen or group and the widgets placed inside it.
#[derive(Debug)]
pub struct GroupFactory<T: WidgetTemplate> {
    pub binding: Arc<GroupBinding<T>>,
    pub title: String,
    pub children: Vec<WidgetFactory<T>>,
}

impl<T: WidgetTemplate> WidgetFactory<T> {
    /// Render into template fragments, consuming the factory.
    ///
    /// Groups emit their own fragments first, then their children in order.
    pub fn format(self) -> Result<Vec<T::Fragment>, FormatError> {
        let bounds = self.bounds;
        let fragment = match self.kind {
            WidgetKind::Shape { binding } => binding.format(bounds, |_| None)?,
            WidgetKind::Label { binding, text } => binding.format(bounds, |field| match field {
                Field::Text => Some(text.clone()),
                _ => None,
            })?,
            WidgetKind::PvWidget { binding, pv } => binding.format(bounds, |field| match field {
                Field::Pv => Some(pv.clone()),
                _ => None,
            })?,
            WidgetKind::Action {
                binding,
                label,
                pv,
                value,
            } => binding.format(bounds, |field| match field {
                Field::Label => Some(label.clone()),
                Field::Pv => Some(pv.clone()),
                Field::Value => Some(value.clone()),
                _ => None,
            })?,
            WidgetKind::Group(group) => {
                return group.binding.format(bounds, group.title, group.children);
            }
        };
        Ok(vec![fragment])
    }

    /// Children of a group, empty for other widgets.
    pub fn children(&self) -> &[WidgetFactory<T>] {
        match &self.kind {
            WidgetKind::Group(group) => &group.children,
            _ => &[],
        }
    }
}

/// Rightmost edge of the widgets plus `spacing`, or 0 if there are none.
pub fn max_x<T: WidgetTemplate>(widgets: &[WidgetFactory<T>], spacing: i32) -> i32 {
    widgets
        .iter()
        .map(|w| w.bounds.right() + spacing)
        .max()
        .unwrap_or(0)
}

/// Bottom edge of the widgets plus `spacing`, or 0 if there are none.
pub fn max_y<T: WidgetTemplate>(widgets: &[WidgetFactory<T>], spacing: i32) -> i32 {
    widgets
        .iter()
        .map(|w| w.bounds.bottom() + spacing)
        .max()
        .unwrap_or(0)
}
