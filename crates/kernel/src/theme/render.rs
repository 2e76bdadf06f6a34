//! Render tree consumer - converts RenderElement trees to HTML.
//!
//! An element renders through `elements/{type}.html` when the theme has that
//! template, otherwise inline. Every text value and attribute is escaped.

use std::fmt::Write;

use anyhow::{Context, Result};
use serde_json::Value;
use tera::{Context as TeraContext, Tera};

use site_counts_sdk::render::RenderElement;

/// Elements that never take a closing tag.
const VOID_ELEMENTS: [&str; 6] = ["br", "hr", "img", "input", "meta", "link"];

/// Escape text for HTML element content and quoted attribute values.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Consumer that converts RenderElement trees to HTML.
#[derive(Debug, Default)]
pub struct RenderTreeConsumer {
    _private: (),
}

impl RenderTreeConsumer {
    /// Create a new render tree consumer.
    pub fn new() -> Self {
        Self { _private: () }
    }

    /// Render a RenderElement tree to HTML.
    pub fn render(&self, tera: &Tera, element: &RenderElement) -> Result<String> {
        self.render_element(tera, element)
    }

    /// Render a single element and its children.
    fn render_element(&self, tera: &Tera, element: &RenderElement) -> Result<String> {
        let children_html = self.render_children(tera, element)?;

        let template_name = format!("elements/{}.html", element.element_type);
        if tera.get_template(&template_name).is_err() {
            return Ok(self.render_inline(element, &children_html));
        }

        let mut context = TeraContext::new();
        context.insert("element", element);
        context.insert("children", &children_html);
        context.insert("value", element.value.as_deref().unwrap_or_default());
        context.insert("tag", element.tag.as_deref().unwrap_or_default());
        context.insert("class", &element.classes().join(" "));

        tera.render(&template_name, &context)
            .with_context(|| format!("failed to render element type: {}", element.element_type))
    }

    /// Render element children, sorted by weight.
    fn render_children(&self, tera: &Tera, element: &RenderElement) -> Result<String> {
        let mut html = String::new();
        for child in element.ordered_children() {
            html.push_str(&self.render_element(tera, child)?);
        }
        Ok(html)
    }

    /// Render an element inline when no template is available.
    fn render_inline(&self, element: &RenderElement, children: &str) -> String {
        let attrs = self.attribute_string(element);

        match element.element_type.as_str() {
            "container" => format!("<div{attrs}>{children}</div>"),
            "markup" => {
                let tag = safe_tag(element.tag.as_deref(), "span");
                if VOID_ELEMENTS.contains(&tag) {
                    return format!("<{tag}{attrs} />");
                }
                let value = element.value.as_deref().map(html_escape).unwrap_or_default();
                format!("<{tag}{attrs}>{value}{children}</{tag}>")
            }
            "item_list" => {
                let tag = safe_tag(element.tag.as_deref(), "ul");
                format!("<{tag}{attrs}>{children}</{tag}>")
            }
            other => format!(
                "<div class=\"element element--{}\">{children}</div>",
                html_escape(other)
            ),
        }
    }

    /// Build ` class="..." key="..."` from the element's attributes.
    fn attribute_string(&self, element: &RenderElement) -> String {
        let mut out = String::new();

        let classes = element.classes();
        if !classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", html_escape(&classes.join(" ")));
        }

        let Some(Value::Object(map)) = &element.attributes else {
            return out;
        };
        for (key, value) in map {
            if key == "class" || !is_safe_attr_name(key) {
                continue;
            }
            if let Some(v) = value.as_str() {
                let _ = write!(out, " {key}=\"{}\"", html_escape(v));
            }
        }
        out
    }
}

/// Tag name if it is plain ASCII alphanumeric, otherwise `fallback`.
fn safe_tag<'a>(tag: Option<&'a str>, fallback: &'a str) -> &'a str {
    match tag {
        Some(t) if !t.is_empty() && t.chars().all(|c| c.is_ascii_alphanumeric()) => t,
        _ => fallback,
    }
}

fn is_safe_attr_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
