//! Advanced Photon Source screens: MEDM `.adl`.

use std::sync::Arc;

use pvi_api::Device;
use serde::{Deserialize, Serialize};

use super::{Formatter, render_screen};
use crate::screen::{LayoutProperties, Screen, ScreenWidgets};
use crate::template::AdlTemplate;
use crate::widget::{Field, GroupBinding, GroupType, Sizing, WidgetBinding, with_title};
use crate::{Bounds, FormatError};

const ADL_TEMPLATE: &str = include_str!("../../templates/aps.adl");

/// Formatter for `.adl` screens in the APS style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApsFormatter {
    pub layout: LayoutProperties,
}

impl Default for ApsFormatter {
    fn default() -> Self {
        Self {
            layout: LayoutProperties {
                spacing: 5,
                title_height: 25,
                max_height: 900,
                group_label_height: 25,
                label_width: 205,
                widget_width: 100,
                widget_height: 20,
                group_widget_indent: 0,
                group_width_offset: 0,
            },
        }
    }
}

impl Formatter for ApsFormatter {
    fn render(
        &self,
        device: &Device,
        prefix: &str,
        extension: &str,
    ) -> Result<String, FormatError> {
        if extension != "adl" {
            return Err(FormatError::UnsupportedOutput(format!(
                "{:?}, can only write .adl",
                extension
            )));
        }
        self.format_adl(device, prefix)
    }
}

impl ApsFormatter {
    /// MEDM screen text for `device`.
    pub fn format_adl(&self, device: &Device, prefix: &str) -> Result<String, FormatError> {
        let template = Arc::new(AdlTemplate::new(ADL_TEMPLATE)?);
        let layout = self.layout.clone();

        let pv_widget = |search: &str, sizing: Sizing| -> Result<_, FormatError> {
            Ok(WidgetBinding::from_template(&template, search)?
                .sized(sizing)
                .attr("chan", Field::Pv)
                .build())
        };
        let widgets = ScreenWidgets {
            label: WidgetBinding::from_template(&template, "\"Label\"")?
                .attr("textix", Field::Text)
                .build(),
            led: pv_widget("\"LED\"", Sizing::Square)?,
            text_read: pv_widget("\"TextRead\"", Sizing::Copy)?,
            check_box: pv_widget("\"CheckBox\"", Sizing::Copy)?,
            combo_box: pv_widget("\"ComboBox\"", Sizing::Copy)?,
            text_write: pv_widget("\"TextWrite\"", Sizing::Copy)?,
            action_button: WidgetBinding::from_template(&template, "\"SignalX\"")?
                .attr("label", Field::Label)
                .attr("chan", Field::Pv)
                .attr("press_msg", Field::Value)
                .build(),
        };

        let label_background = WidgetBinding::from_template(&template, "fill=\"solid\"")?.build();
        let screen_title = WidgetBinding::from_template(&template, "\"Title\"")?
            .attr("textix", Field::Text)
            .build();
        let group_title = WidgetBinding::from_template(&template, "\"Group\"")?
            .attr("textix", Field::Text)
            .build();
        let group_box = WidgetBinding::from_template(&template, "fill=\"outline\"")?.build();

        let title_height = layout.title_height;
        let background = Arc::clone(&label_background);
        let screen_binding = GroupBinding::new(&template, GroupType::Screen)
            .sized(with_title(layout.spacing, layout.title_height))
            .make_widgets(move |bounds, title| {
                let title_bounds = Bounds::sized(bounds.w, title_height);
                vec![
                    background.shape(title_bounds),
                    screen_title.label(title_bounds, title),
                ]
            })
            .build();

        let (spacing, group_label_height) = (layout.spacing, layout.group_label_height);
        let group_binding = GroupBinding::new(&template, GroupType::Group)
            .sized(with_title(layout.spacing, layout.group_label_height))
            .make_widgets(move |b, title| {
                let title_bounds = Bounds::new(
                    b.x + spacing,
                    b.y + spacing,
                    b.w - 2 * spacing,
                    group_label_height - spacing,
                );
                vec![
                    group_box.shape(b),
                    label_background.shape(title_bounds),
                    group_title.label(title_bounds, title),
                ]
            })
            .build();

        let screen = Screen::new(screen_binding, group_binding, widgets, layout, prefix);
        render_screen(template.as_ref(), screen, device, prefix)
    }
}
