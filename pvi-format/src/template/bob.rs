//! Phoebus display builder `.bob` templates.

use super::{Element, Properties, WidgetTemplate, insert_bounds};
use crate::{Bounds, FormatError};

/// Catalog of `.bob` widgets, identified by the text of their `<name>` child.
#[derive(Debug, Clone)]
pub struct BobTemplate {
    tree: Element,
    screen: Element,
}

impl BobTemplate {
    pub fn new(text: &str) -> Result<Self, FormatError> {
        let tree = Element::parse(text)?;
        let screen = find_named(&tree, "Display")?;
        Ok(Self { tree, screen })
    }
}

/// Copy the single element whose `<name>` is `search`.
///
/// Containers lose their widgets: a `<display>` match becomes an empty
/// screen and a group widget an empty group.
fn find_named(tree: &Element, search: &str) -> Result<Element, FormatError> {
    let matches: Vec<&Element> = tree
        .descendants()
        .into_iter()
        .filter(|e| e.child_text("name") == Some(search))
        .collect();

    let [found] = matches.as_slice() else {
        return Err(FormatError::TemplateMatch {
            search: search.to_string(),
            count: matches.len(),
        });
    };

    let mut found = (*found).clone();
    let container = found.tag == "display"
        || found
            .attributes
            .iter()
            .any(|(key, value)| key == "type" && value == "group");
    if container {
        found.children.retain(|c| c.tag != "widget");
    }
    Ok(found)
}

impl WidgetTemplate for BobTemplate {
    type Fragment = Element;

    fn screen(&self) -> &Element {
        &self.screen
    }

    fn search(&self, search: &str) -> Result<Element, FormatError> {
        find_named(&self.tree, search)
    }

    fn set(
        &self,
        fragment: &Element,
        bounds: Option<Bounds>,
        mut properties: Properties,
    ) -> Result<Element, FormatError> {
        if let Some(bounds) = bounds {
            insert_bounds(&mut properties, bounds, ["x", "y", "width", "height"]);
        }

        let mut copy = fragment.clone();
        for (item, value) in &properties {
            let Some(child) = copy.child_mut(item) else {
                let fragment = fragment
                    .child_text("name")
                    .unwrap_or(fragment.tag.as_str())
                    .to_string();
                return Err(FormatError::MissingProperty {
                    fragment,
                    property: item.clone(),
                });
            };
            child.text = Some(value.to_string());
        }
        Ok(copy)
    }

    fn nests_children(&self) -> bool {
        true
    }

    fn create_group(
        &self,
        mut group_object: Vec<Element>,
        children: Vec<Element>,
    ) -> Result<Vec<Element>, FormatError> {
        match group_object.first_mut() {
            Some(group) => group.children.extend(children),
            None => group_object.extend(children),
        }
        Ok(group_object)
    }

    fn render(&self, fragments: Vec<Element>) -> Result<String, FormatError> {
        let mut fragments = fragments.into_iter();
        let mut display = fragments
            .next()
            .ok_or_else(|| FormatError::Template("no display element to render".into()))?;

        let start = display
            .position("height")
            .map(|i| i + 1)
            .unwrap_or(display.children.len());
        display.children.splice(start..start, fragments);
        display.to_document()
    }
}
