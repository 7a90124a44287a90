//! Diamond Light Source screens: EDM `.edl` and Phoebus `.bob`.

use std::sync::Arc;

use pvi_api::Device;
use serde::{Deserialize, Serialize};

use super::{Formatter, render_screen};
use crate::screen::{LayoutProperties, Screen, ScreenWidgets};
use crate::template::{BobTemplate, EdlTemplate};
use crate::widget::{Field, GroupBinding, GroupType, Sizing, WidgetBinding, with_title};
use crate::{Bounds, FormatError};

const EDL_TEMPLATE: &str = include_str!("../../templates/dls.edl");
const BOB_TEMPLATE: &str = include_str!("../../templates/dls.bob");

/// Formatter for `.edl` and `.bob` screens in the DLS style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DlsFormatter {
    pub edl: LayoutProperties,
    pub bob: LayoutProperties,
}

impl Default for DlsFormatter {
    fn default() -> Self {
        Self {
            edl: LayoutProperties {
                spacing: 5,
                title_height: 25,
                max_height: 900,
                group_label_height: 10,
                label_width: 115,
                widget_width: 120,
                widget_height: 20,
                group_widget_indent: 5,
                group_width_offset: 0,
            },
            bob: LayoutProperties {
                spacing: 4,
                title_height: 28,
                max_height: 900,
                group_label_height: 26,
                label_width: 120,
                widget_width: 120,
                widget_height: 20,
                group_widget_indent: 18,
                group_width_offset: 26,
            },
        }
    }
}

impl Formatter for DlsFormatter {
    fn render(
        &self,
        device: &Device,
        prefix: &str,
        extension: &str,
    ) -> Result<String, FormatError> {
        match extension {
            "edl" => self.format_edl(device, prefix),
            "bob" => self.format_bob(device, prefix),
            other => Err(FormatError::UnsupportedOutput(format!(
                "{:?}, can only write .edl or .bob",
                other
            ))),
        }
    }
}

impl DlsFormatter {
    /// EDM screen text for `device`.
    pub fn format_edl(&self, device: &Device, prefix: &str) -> Result<String, FormatError> {
        let template = Arc::new(EdlTemplate::new(EDL_TEMPLATE)?);
        let layout = self.edl.clone();

        let pv_widget = |search: &str, sizing: Sizing| -> Result<_, FormatError> {
            Ok(WidgetBinding::from_template(&template, search)?
                .sized(sizing)
                .attr("controlPv", Field::Pv)
                .build())
        };
        let widgets = ScreenWidgets {
            label: WidgetBinding::from_template(&template, "\"Label\"")?
                .attr("value", Field::Text)
                .build(),
            led: pv_widget("\"LED\"", Sizing::Square)?,
            text_read: pv_widget("\"TextRead\"", Sizing::Copy)?,
            check_box: pv_widget("\"CheckBox\"", Sizing::Copy)?,
            combo_box: pv_widget("\"ComboBox\"", Sizing::Copy)?,
            text_write: pv_widget("\"TextWrite\"", Sizing::Copy)?,
            action_button: WidgetBinding::from_template(&template, "\"SignalX\"")?
                .attr("onLabel", Field::Label)
                .attr("offLabel", Field::Label)
                .attr("controlPv", Field::Pv)
                .attr("pressValue", Field::Value)
                .build(),
        };

        let screen_title = WidgetBinding::from_template(&template, "\"Title\"")?
            .attr("value", Field::Text)
            .build();
        let group_title = WidgetBinding::from_template(&template, "\"  Group  \"")?
            .attr("value", Field::Text)
            .build();
        let group_box = WidgetBinding::from_template(&template, "fillColor index 5")?.build();

        let title_height = layout.title_height;
        let screen_binding = GroupBinding::new(&template, GroupType::Screen)
            .sized(with_title(layout.spacing, layout.title_height))
            .attr("title", Field::Title)
            .make_widgets(move |bounds, title| {
                vec![screen_title.label(Bounds::sized(bounds.w, title_height), title)]
            })
            .build();

        let (spacing, group_label_height) = (layout.spacing, layout.group_label_height);
        let group_binding = GroupBinding::new(&template, GroupType::Group)
            .sized(with_title(layout.spacing, layout.group_label_height))
            .make_widgets(move |b, title| {
                vec![
                    group_box.shape(Bounds::new(b.x, b.y + spacing, b.w, b.h - spacing)),
                    group_title.label(
                        Bounds::new(b.x, b.y, b.w, group_label_height),
                        format!("  {}  ", title),
                    ),
                ]
            })
            .build();

        let screen = Screen::new(screen_binding, group_binding, widgets, layout, prefix);
        render_screen(template.as_ref(), screen, device, prefix)
    }

    /// Phoebus display builder XML for `device`.
    pub fn format_bob(&self, device: &Device, prefix: &str) -> Result<String, FormatError> {
        let template = Arc::new(BobTemplate::new(BOB_TEMPLATE)?);
        let layout = self.bob.clone();

        let pv_widget = |search: &str, sizing: Sizing| -> Result<_, FormatError> {
            Ok(WidgetBinding::from_template(&template, search)?
                .sized(sizing)
                .attr("pv_name", Field::Pv)
                .build())
        };
        let widgets = ScreenWidgets {
            label: WidgetBinding::from_template(&template, "Label")?
                .attr("text", Field::Text)
                .build(),
            led: pv_widget("LED", Sizing::Square)?,
            text_read: pv_widget("TextUpdate", Sizing::Copy)?,
            check_box: pv_widget("ChoiceButton", Sizing::Copy)?,
            combo_box: pv_widget("ComboBox", Sizing::Copy)?,
            text_write: pv_widget("TextEntry", Sizing::Copy)?,
            action_button: WidgetBinding::from_template(&template, "ActionButton")?
                .attr("text", Field::Label)
                .attr("pv_name", Field::Pv)
                .build(),
        };

        let screen_title = WidgetBinding::from_template(&template, "Title")?
            .attr("text", Field::Text)
            .build();
        let group_object = WidgetBinding::from_template(&template, "Group")?
            .attr("name", Field::Text)
            .build();

        let title_height = layout.title_height;
        let screen_binding = GroupBinding::new(&template, GroupType::Screen)
            .sized(with_title(layout.spacing, layout.title_height))
            .attr("name", Field::Title)
            .make_widgets(move |bounds, title| {
                vec![screen_title.label(Bounds::sized(bounds.w, title_height), title)]
            })
            .build();

        let group_binding = GroupBinding::new(&template, GroupType::Group)
            .sized(with_title(layout.spacing, layout.group_label_height))
            .make_widgets(move |bounds, title| vec![group_object.label(bounds, title)])
            .build();

        let screen = Screen::new(screen_binding, group_binding, widgets, layout, prefix);
        render_screen(template.as_ref(), screen, device, prefix)
    }
}
