//! Render element builder API.
//!
//! Blocks return structured render elements (never raw HTML).
//! The kernel escapes and renders these, optionally through theme templates.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A render element in the render tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderElement {
    #[serde(rename = "#type")]
    pub element_type: String,
    #[serde(rename = "#weight", skip_serializing_if = "Option::is_none")]
    pub weight: Option<i32>,
    #[serde(rename = "#tag", skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(rename = "#value", skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(rename = "#attributes", skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Value>,
    #[serde(flatten)]
    pub children: BTreeMap<String, RenderElement>,
}

impl RenderElement {
    /// Children sorted by weight (ties broken by key).
    pub fn ordered_children(&self) -> Vec<&RenderElement> {
        let mut children: Vec<_> = self.children.iter().collect();
        children.sort_by_key(|(key, child)| (child.weight.unwrap_or(0), key.as_str()));
        children.into_iter().map(|(_, child)| child).collect()
    }

    /// CSS classes attached to the element, in insertion order.
    pub fn classes(&self) -> Vec<&str> {
        self.attributes
            .as_ref()
            .and_then(|a| a.get("class"))
            .and_then(|c| c.as_array())
            .map(|arr| arr.iter().filter_map(|v| v.as_str()).collect())
            .unwrap_or_default()
    }
}

/// Builder for constructing render elements.
pub struct ElementBuilder {
    element_type: String,
    weight: Option<i32>,
    tag: Option<String>,
    value: Option<String>,
    classes: Vec<String>,
    attrs: serde_json::Map<String, Value>,
    children: BTreeMap<String, RenderElement>,
}

impl ElementBuilder {
    fn new(element_type: &str) -> Self {
        Self {
            element_type: element_type.into(),
            weight: None,
            tag: None,
            value: None,
            classes: Vec::new(),
            attrs: serde_json::Map::new(),
            children: BTreeMap::new(),
        }
    }

    pub fn weight(mut self, w: i32) -> Self {
        self.weight = Some(w);
        self
    }

    pub fn class(mut self, class: &str) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn attr(mut self, key: &str, value: &str) -> Self {
        self.attrs.insert(key.into(), Value::String(value.into()));
        self
    }

    pub fn child(mut self, key: &str, element: RenderElement) -> Self {
        self.children.insert(key.into(), element);
        self
    }

    pub fn build(self) -> RenderElement {
        let attributes = if self.classes.is_empty() && self.attrs.is_empty() {
            None
        } else {
            let mut map = self.attrs;
            if !self.classes.is_empty() {
                map.insert(
                    "class".into(),
                    Value::Array(self.classes.into_iter().map(Value::String).collect()),
                );
            }
            Some(Value::Object(map))
        };

        RenderElement {
            element_type: self.element_type,
            weight: self.weight,
            tag: self.tag,
            value: self.value,
            attributes,
            children: self.children,
        }
    }
}

/// Create a container element (groups children in a `<div>`).
pub fn container() -> ElementBuilder {
    ElementBuilder::new("container")
}

/// Create a markup element with an HTML tag and plain-text value.
pub fn markup(tag: &str, value: &str) -> ElementBuilder {
    let mut b = ElementBuilder::new("markup");
    b.tag = Some(tag.into());
    b.value = Some(value.into());
    b
}

/// Create an unordered list whose entries keep the given order.
pub fn item_list<I, S>(items: I) -> ElementBuilder
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut b = ElementBuilder::new("item_list");
    b.tag = Some("ul".into());
    for (i, item) in items.into_iter().enumerate() {
        let weight = i32::try_from(i).unwrap_or(i32::MAX);
        b.children.insert(
            format!("item_{i:04}"),
            markup("li", item.as_ref()).weight(weight).build(),
        );
    }
    b
}
