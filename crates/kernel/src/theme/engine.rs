//! Theme engine with Tera templates and suggestion resolution.

use std::path::Path;

use anyhow::{Context, Result};
use tera::{Context as TeraContext, Tera};
use tracing::debug;

use super::render::RenderTreeConsumer;
use site_counts_sdk::render::RenderElement;

/// Theme engine for rendering block output.
pub struct ThemeEngine {
    /// Tera template engine instance.
    tera: Tera,
    /// Render tree consumer for RenderElement → HTML.
    render_consumer: RenderTreeConsumer,
}

impl ThemeEngine {
    /// Create a theme engine loading templates from the given directory.
    pub fn new(template_dir: &Path) -> Result<Self> {
        let pattern = template_dir.join("**/*.html");
        let pattern_str = pattern
            .to_str()
            .context("invalid template directory path")?;

        let tera = Tera::new(pattern_str).context("failed to initialize Tera templates")?;

        let template_names: Vec<_> = tera.get_template_names().collect();
        debug!(count = template_names.len(), "loaded templates");

        Ok(Self {
            tera,
            render_consumer: RenderTreeConsumer::new(),
        })
    }

    /// Create a theme engine with no templates; everything renders inline.
    pub fn empty() -> Self {
        Self {
            tera: Tera::default(),
            render_consumer: RenderTreeConsumer::new(),
        }
    }

    /// Add a template from source (used by tests and embedded themes).
    pub fn add_template(&mut self, name: &str, source: &str) -> Result<()> {
        self.tera
            .add_raw_template(name, source)
            .with_context(|| format!("failed to parse template {name}"))
    }

    /// Resolve the best template from a list of suggestions.
    ///
    /// Templates are tried in order; the first one that exists is returned.
    pub fn resolve_template(&self, suggestions: &[String]) -> Option<String> {
        suggestions
            .iter()
            .map(|s| format!("{s}.html"))
            .find(|name| self.tera.get_template(name).is_ok())
    }

    /// Template suggestions for a block, most specific first.
    ///
    /// `site-counts/site-counts` → `["block--site-counts--site-counts", "block"]`
    pub fn block_suggestions(block_name: &str) -> Vec<String> {
        let specific = format!("block--{}", block_name.replace('/', "--"));
        vec![specific, "block".to_string()]
    }

    /// Render a bare render tree to HTML.
    pub fn render(&self, element: &RenderElement) -> Result<String> {
        self.render_consumer.render(&self.tera, element)
    }

    /// Render a block's tree, wrapped in the theme's block template if any.
    pub fn render_block(&self, block_name: &str, element: &RenderElement) -> Result<String> {
        let content = self.render(element)?;

        let Some(template) = self.resolve_template(&Self::block_suggestions(block_name)) else {
            return Ok(content);
        };

        let mut context = TeraContext::new();
        context.insert("block_name", block_name);
        context.insert("content", &content);
        self.tera
            .render(&template, &context)
            .with_context(|| format!("failed to render block template {template}"))
    }
}
