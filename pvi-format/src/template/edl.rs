//! EDM `.edl` templates.

use regex::NoExpand;

use super::{
    Properties, PropertyValue, WidgetTemplate, insert_bounds, property_pattern, search_text,
    split_with_sep,
};
use crate::{Bounds, FormatError};

const SCREEN_END: &str = "\nendScreenProperties\n";
const OBJECT_END: &str = "\nendObjectProperties\n";

/// Catalog of EDM objects.
///
/// The screen is everything up to `endScreenProperties`; each widget is one
/// object block ending in `endObjectProperties`.
#[derive(Debug, Clone)]
pub struct EdlTemplate {
    screen: String,
    widgets: Vec<String>,
}

impl EdlTemplate {
    pub fn new(text: &str) -> Result<Self, FormatError> {
        if text.contains("endGroup") {
            return Err(FormatError::GroupedTemplate("edl"));
        }
        let (screen, rest) = text
            .split_once(SCREEN_END)
            .ok_or_else(|| FormatError::Template("edl template has no screen properties".into()))?;
        let widgets = split_with_sep(rest, OBJECT_END);
        tracing::debug!("parsed edl template with {} objects", widgets.len());
        Ok(Self {
            screen: format!("{}{}", screen, SCREEN_END),
            widgets,
        })
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.widgets.len()
    }
}

impl WidgetTemplate for EdlTemplate {
    type Fragment = String;

    fn screen(&self) -> &String {
        &self.screen
    }

    fn search(&self, search: &str) -> Result<String, FormatError> {
        search_text(&self.widgets, search)
    }

    fn set(
        &self,
        fragment: &String,
        bounds: Option<Bounds>,
        mut properties: Properties,
    ) -> Result<String, FormatError> {
        if let Some(bounds) = bounds {
            insert_bounds(&mut properties, bounds, ["x", "y", "w", "h"]);
        }

        let mut text = fragment.clone();
        for (item, value) in &properties {
            let name = regex::escape(item);
            let multiline = property_pattern(&format!(r"(?m)^{} \{{[^}}]*\}}$", name))?;
            let (pattern, replacement) = if multiline.is_match(&text) {
                let mut lines = vec![format!("{} {{", item)];
                lines.extend(value.to_string().lines().map(|l| format!("  \"{}\"", l)));
                lines.push("}".to_string());
                (multiline, lines.join("\n"))
            } else {
                let single = property_pattern(&format!(r"(?m)^{} .*$", name))?;
                let rendered = match value {
                    PropertyValue::Str(s) => format!("\"{}\"", s),
                    PropertyValue::Int(n) => n.to_string(),
                };
                (single, format!("{} {}", item, rendered))
            };

            let count = pattern.find_iter(&text).count();
            if count != 1 {
                return Err(FormatError::Substitution {
                    property: item.clone(),
                    count,
                });
            }
            text = pattern.replace(&text, NoExpand(&replacement)).into_owned();
        }
        Ok(text)
    }

    fn render(&self, fragments: Vec<String>) -> Result<String, FormatError> {
        Ok(fragments.concat())
    }
}
