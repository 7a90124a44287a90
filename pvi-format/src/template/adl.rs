//! MEDM `.adl` templates.

use regex::Captures;

use super::{
    Properties, PropertyValue, WidgetTemplate, insert_bounds, property_pattern, search_text,
    split_with_sep,
};
use crate::{Bounds, FormatError};

const BLOCK_END: &str = "\n}\n";

/// Number of leading blocks (`file`, `display`, `"color map"`) forming the screen.
const SCREEN_BLOCKS: usize = 3;

/// Catalog of MEDM widget blocks.
#[derive(Debug, Clone)]
pub struct AdlTemplate {
    screen: String,
    widgets: Vec<String>,
}

impl AdlTemplate {
    pub fn new(text: &str) -> Result<Self, FormatError> {
        if text.contains("children {") {
            return Err(FormatError::GroupedTemplate("adl"));
        }
        let mut blocks = split_with_sep(text, BLOCK_END);
        if blocks.len() < SCREEN_BLOCKS {
            return Err(FormatError::Template(format!(
                "adl template has {} blocks, expected at least {}",
                blocks.len(),
                SCREEN_BLOCKS
            )));
        }
        let widgets = blocks.split_off(SCREEN_BLOCKS);
        tracing::debug!("parsed adl template with {} widgets", widgets.len());
        Ok(Self {
            screen: blocks.concat(),
            widgets,
        })
    }
}

impl WidgetTemplate for AdlTemplate {
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
            insert_bounds(&mut properties, bounds, ["x", "y", "width", "height"]);
        }

        let mut text = fragment.clone();
        for (item, value) in &properties {
            let pattern = property_pattern(&format!(r"(?m)^(\s*{})=.*$", regex::escape(item)))?;
            let rendered = match value {
                PropertyValue::Str(s) => format!("\"{}\"", s),
                PropertyValue::Int(n) => n.to_string(),
            };

            let count = pattern.find_iter(&text).count();
            if count != 1 {
                return Err(FormatError::Substitution {
                    property: item.clone(),
                    count,
                });
            }
            text = pattern
                .replace(&text, |caps: &Captures<'_>| format!("{}={}", &caps[1], rendered))
                .into_owned();
        }
        Ok(text)
    }

    fn render(&self, fragments: Vec<String>) -> Result<String, FormatError> {
        Ok(fragments.concat())
    }
}
