//! Screen layout - turns a component tree into placed widget factories.
//!
//! Top level groups are packed into columns first-fit: each group goes in
//! the first column it fits in below `max_height`, and a fresh empty column
//! is always kept open to the right of everything placed so far. Leaf
//! components become one row each, with a label on the left and one or two
//! widgets filling the rest of the row. A row that would run off the bottom
//! of its parent is retried at the top of a new column.

use std::collections::HashMap;
use std::sync::Arc;

use indexmap::IndexMap;
use pvi_api::{Component, Layout, ReadWidget, WriteWidget};
use serde::{Deserialize, Serialize};

use crate::template::WidgetTemplate;
use crate::widget::{GroupBinding, WidgetBinding, WidgetFactory, max_x, max_y};
use crate::{Bounds, FormatError};

/// The numeric knobs of a layout run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutProperties {
    /// Gap between widgets and around group borders.
    pub spacing: i32,
    pub title_height: i32,
    /// Columns are wrapped once they would grow past this.
    pub max_height: i32,
    pub group_label_height: i32,
    pub label_width: i32,
    pub widget_width: i32,
    pub widget_height: i32,
    /// Shift applied to top level rows so they line up with group contents.
    #[serde(default)]
    pub group_widget_indent: i32,
    /// Extra width given to every top level group.
    #[serde(default)]
    pub group_width_offset: i32,
}

impl LayoutProperties {
    /// Width of one labelled row.
    pub fn full_width(&self) -> i32 {
        self.label_width + self.widget_width + 2 * self.spacing
    }
}

/// The widget bindings a screen is built from.
#[derive(Debug)]
pub struct ScreenWidgets<T: WidgetTemplate> {
    pub label: Arc<WidgetBinding<T>>,
    pub led: Arc<WidgetBinding<T>>,
    pub text_read: Arc<WidgetBinding<T>>,
    pub check_box: Arc<WidgetBinding<T>>,
    pub combo_box: Arc<WidgetBinding<T>>,
    pub text_write: Arc<WidgetBinding<T>>,
    pub action_button: Arc<WidgetBinding<T>>,
}

impl<T: WidgetTemplate> ScreenWidgets<T> {
    /// Widget displaying `prefix + pv`. Text widgets are `lines` rows high.
    pub fn read_widget(
        &self,
        widget: &ReadWidget,
        bounds: Bounds,
        pv: &str,
        prefix: &str,
    ) -> Result<WidgetFactory<T>, FormatError> {
        let binding = match widget {
            ReadWidget::Led => &self.led,
            ReadWidget::TextRead { .. } => &self.text_read,
            ReadWidget::ComboBox => &self.combo_box,
        };
        let bounds = with_lines(bounds, widget.lines(), pv)?;
        Ok(binding.pv_widget(bounds, format!("{}{}", prefix, pv)))
    }

    /// Widget controlling `prefix + pv`. Text widgets are `lines` rows high.
    pub fn write_widget(
        &self,
        widget: &WriteWidget,
        bounds: Bounds,
        pv: &str,
        prefix: &str,
    ) -> Result<WidgetFactory<T>, FormatError> {
        let binding = match widget {
            WriteWidget::CheckBox => &self.check_box,
            WriteWidget::ComboBox => &self.combo_box,
            WriteWidget::TextWrite { .. } => &self.text_write,
        };
        let bounds = with_lines(bounds, widget.lines(), pv)?;
        Ok(binding.pv_widget(bounds, format!("{}{}", prefix, pv)))
    }
}

/// Tallest widget a line count may produce.
pub const MAX_WIDGET_HEIGHT: i32 = 1 << 16;

/// `bounds` stretched to `lines` rows.
fn with_lines(mut bounds: Bounds, lines: u32, pv: &str) -> Result<Bounds, FormatError> {
    bounds.h = i32::try_from(lines)
        .ok()
        .and_then(|lines| bounds.h.checked_mul(lines))
        .filter(|h| *h <= MAX_WIDGET_HEIGHT)
        .ok_or_else(|| FormatError::Geometry {
            pv: pv.to_string(),
            lines,
        })?;
    Ok(bounds)
}

/// One layout run over a component tree.
///
/// The registry of components seen so far lives for the run only, so
/// `SignalRef`s can only refer back to components placed earlier.
#[derive(Debug)]
pub struct Screen<'a, T: WidgetTemplate> {
    screen_binding: Arc<GroupBinding<T>>,
    group_binding: Arc<GroupBinding<T>>,
    widgets: ScreenWidgets<T>,
    layout: LayoutProperties,
    prefix: String,
    components: HashMap<&'a str, &'a Component>,
}

impl<'a, T: WidgetTemplate> Screen<'a, T> {
    pub fn new(
        screen_binding: Arc<GroupBinding<T>>,
        group_binding: Arc<GroupBinding<T>>,
        widgets: ScreenWidgets<T>,
        layout: LayoutProperties,
        prefix: impl Into<String>,
    ) -> Self {
        Self {
            screen_binding,
            group_binding,
            widgets,
            layout,
            prefix: prefix.into(),
            components: HashMap::new(),
        }
    }

    /// Lay out `components` and wrap them in a screen titled `title`.
    pub fn screen(
        &mut self,
        components: &'a [Component],
        title: &str,
    ) -> Result<WidgetFactory<T>, FormatError> {
        let spacing = self.layout.spacing;
        let max_height = self.layout.max_height;
        let screen_bounds = Bounds::sized(0, max_height);
        let mut widget_bounds = Bounds::sized(self.layout.full_width(), self.layout.widget_height);
        let mut screen_widgets: Vec<WidgetFactory<T>> = Vec::new();
        // x of each column -> y of its bottom
        let mut columns: IndexMap<i32, i32> = IndexMap::from([(0, 0)]);

        for c in components {
            let Some((layout, children)) = c.as_group() else {
                let placed = self.make_component_widgets(
                    c,
                    &mut widget_bounds,
                    screen_bounds,
                    self.layout.group_widget_indent,
                    true,
                )?;
                screen_widgets.extend(placed);
                continue;
            };

            let candidates: Vec<(i32, i32)> = columns.iter().map(|(x, y)| (*x, *y)).collect();
            let mut placed = None;
            for (col_x, col_y) in candidates {
                let group = self.group(
                    c,
                    layout,
                    children,
                    Bounds::new(col_x, col_y, 0, max_height),
                )?;
                let fits = group.bounds.bottom() <= max_height;
                placed = Some(group);
                if fits {
                    break;
                }
            }
            let Some(mut group) = placed else {
                continue;
            };

            group.bounds.w += self.layout.group_width_offset;
            tracing::debug!(
                "placed group {} at ({}, {}) size {}x{}",
                c.name(),
                group.bounds.x,
                group.bounds.y,
                group.bounds.w,
                group.bounds.h
            );
            columns.insert(group.bounds.x, group.bounds.bottom() + spacing);
            screen_widgets.push(group);
            columns.insert(max_x(&screen_widgets, 0) + spacing, 0);
        }

        let bounds = Bounds::sized(max_x(&screen_widgets, 0), max_y(&screen_widgets, 0));
        Ok(self.screen_binding.group(bounds, title, screen_widgets))
    }

    /// Lay out the children of a grid group in one column and wrap them.
    ///
    /// The group shrinks to fit its children before the group binding adds
    /// its border.
    fn group(
        &mut self,
        group: &'a Component,
        layout: &Layout,
        children: &'a [Component],
        mut bounds: Bounds,
    ) -> Result<WidgetFactory<T>, FormatError> {
        let labelled = match layout {
            Layout::Grid { labelled } => *labelled,
            other => {
                return Err(FormatError::UnsupportedLayout {
                    group: group.name().to_string(),
                    layout: other.kind(),
                });
            }
        };

        let mut child_bounds = Bounds::sized(self.layout.full_width(), self.layout.widget_height);
        let mut widgets = Vec::new();
        for c in children {
            if c.is_group() {
                return Err(FormatError::NestedGroup {
                    group: group.name().to_string(),
                    child: c.name().to_string(),
                });
            }
            widgets.extend(self.make_component_widgets(c, &mut child_bounds, bounds, 0, labelled)?);
        }

        bounds.h = max_y(&widgets, 0);
        bounds.w = max_x(&widgets, 0);
        Ok(self.group_binding.group(bounds, group.label(), widgets))
    }

    /// Place one component at `bounds` and move `bounds` down a row.
    ///
    /// If the widgets end below the bottom of `parent` the component is laid
    /// out again at the top of a new column to the right.
    fn make_component_widgets(
        &mut self,
        c: &'a Component,
        bounds: &mut Bounds,
        parent: Bounds,
        indent: i32,
        add_label: bool,
    ) -> Result<Vec<WidgetFactory<T>>, FormatError> {
        let spacing = self.layout.spacing;
        let mut widgets = self.component(c, *bounds, indent, add_label)?;
        if widgets.is_empty() {
            return Ok(widgets);
        }

        bounds.y = max_y(&widgets, spacing);
        if max_y(&widgets, 0) > parent.h {
            bounds.x = max_x(&widgets, spacing);
            bounds.y = 0;
            tracing::warn!(
                "{} overflows height {}, moving to new column at x={}",
                c.name(),
                parent.h,
                bounds.x
            );
            widgets = self.component(c, *bounds, indent, add_label)?;
            bounds.y = max_y(&widgets, spacing);
        }
        Ok(widgets)
    }

    /// Convert one component into its label and widgets.
    fn component(
        &mut self,
        c: &'a Component,
        bounds: Bounds,
        indent: i32,
        add_label: bool,
    ) -> Result<Vec<WidgetFactory<T>>, FormatError> {
        if !matches!(c, Component::SignalRef { .. } | Component::Group { .. }) {
            self.components.insert(c.name(), c);
        }

        let spacing = self.layout.spacing;
        let mut bounds = bounds;
        let mut widgets = Vec::new();

        if add_label {
            let (left, right) = bounds.split(self.layout.label_width, spacing)?;
            widgets.push(self.widgets.label.label(left.indented(indent), c.label()));
            bounds = right;
        }

        let prefix = self.prefix.as_str();
        match c {
            Component::SignalX { pv, value, .. } => {
                widgets.push(self.widgets.action_button.action(
                    bounds.indented(indent),
                    c.label(),
                    pv.clone(),
                    value.as_deref().unwrap_or("0"),
                ));
            }
            Component::SignalR {
                pv,
                widget: Some(widget),
                ..
            } => {
                widgets.push(self.widgets.read_widget(
                    widget,
                    bounds.indented(indent),
                    pv,
                    prefix,
                )?);
            }
            Component::SignalRW {
                pv,
                widget: Some(widget),
                read_pv,
                read_widget: Some(read_widget),
                ..
            } if !read_pv.is_empty() => {
                let (left, right) = bounds.split((bounds.w - spacing) / 2, spacing)?;
                widgets.push(self.widgets.write_widget(
                    widget,
                    left.indented(indent),
                    pv,
                    prefix,
                )?);
                widgets.push(self.widgets.read_widget(
                    read_widget,
                    right.indented(indent),
                    read_pv,
                    prefix,
                )?);
            }
            Component::SignalW {
                pv,
                widget: Some(widget),
                ..
            }
            | Component::SignalRW {
                pv,
                widget: Some(widget),
                ..
            } => {
                widgets.push(self.widgets.write_widget(
                    widget,
                    bounds.indented(indent),
                    pv,
                    prefix,
                )?);
            }
            Component::SignalRef { name, .. } => {
                // the target lays itself out in what is left of the row
                let target: &'a Component = self
                    .components
                    .get(name.as_str())
                    .copied()
                    .ok_or_else(|| FormatError::UnresolvedReference(name.clone()))?;
                widgets.extend(self.component(target, bounds, indent, add_label)?);
            }
            _ => {}
        }

        tracing::debug!(
            "{} {} -> {} widgets from ({}, {})",
            c.kind(),
            c.name(),
            widgets.len(),
            bounds.x,
            bounds.y
        );
        Ok(widgets)
    }
}
