//! Block registry - maps block names to their renderers.
//!
//! The registry is filled once at startup by [`default_registry`] and is
//! read-only afterwards, so it is shared across requests without locking.

use std::collections::HashMap;
use std::sync::Arc;

use site_counts::{FilteredListSettings, SiteCountsBlock};
use site_counts_sdk::block::{Block, BlockDefinition, RenderServices};
use site_counts_sdk::types::RenderContext;
use thiserror::Error;
use tracing::debug;

use crate::theme::ThemeEngine;

/// Block registry and rendering errors.
#[derive(Debug, Error)]
pub enum BlockError {
    #[error("unknown block: {0}")]
    NotFound(String),

    #[error("block already registered: {0}")]
    Duplicate(String),

    #[error("failed to render block: {0}")]
    Render(String),
}

/// Registry of server-rendered blocks, keyed by namespaced name.
#[derive(Default)]
pub struct BlockRegistry {
    blocks: HashMap<String, Arc<dyn Block>>,
}

impl BlockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a block under the name its definition declares.
    pub fn register(&mut self, block: Arc<dyn Block>) -> Result<(), BlockError> {
        let name = block.definition().name;
        if self.blocks.contains_key(&name) {
            return Err(BlockError::Duplicate(name));
        }
        debug!(block = %name, "registered block");
        self.blocks.insert(name, block);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Block>> {
        self.blocks.get(name).cloned()
    }

    /// Definitions of every registered block, sorted by name.
    pub fn definitions(&self) -> Vec<BlockDefinition> {
        let mut defs: Vec<_> = self.blocks.values().map(|b| b.definition()).collect();
        defs.sort_by(|a, b| a.name.cmp(&b.name));
        defs
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Render the named block to an HTML fragment.
    pub async fn render(
        &self,
        name: &str,
        services: &RenderServices<'_>,
        ctx: &RenderContext,
        theme: &ThemeEngine,
    ) -> Result<String, BlockError> {
        let block = self
            .blocks
            .get(name)
            .ok_or_else(|| BlockError::NotFound(name.to_string()))?;

        let tree = block.render(services, ctx).await;
        theme
            .render_block(name, &tree)
            .map_err(|e| BlockError::Render(format!("{e:#}")))
    }
}

/// Build the registry with every block this kernel ships.
pub fn default_registry(list: FilteredListSettings) -> Result<BlockRegistry, BlockError> {
    let mut registry = BlockRegistry::new();
    registry.register(Arc::new(SiteCountsBlock::new().with_list_settings(list)))?;
    Ok(registry)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use site_counts::BLOCK_NAME;
    use site_counts_sdk::i18n::SourceStrings;
    use site_counts_test_utils::{StubHost, numbered_items, post_type};

    #[test]
    fn default_registry_holds_site_counts() {
        let registry = default_registry(FilteredListSettings::default()).unwrap();
        assert_eq!(registry.len(), 1);
        assert!(registry.get(BLOCK_NAME).is_some());
        assert_eq!(registry.definitions()[0].name, BLOCK_NAME);
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut registry = BlockRegistry::new();
        registry.register(Arc::new(SiteCountsBlock::new())).unwrap();
        let err = registry
            .register(Arc::new(SiteCountsBlock::new()))
            .unwrap_err();
        assert!(matches!(err, BlockError::Duplicate(name) if name == BLOCK_NAME));
    }

    #[tokio::test]
    async fn unknown_block_is_not_found() {
        let registry = BlockRegistry::new();
        let host = StubHost::new();
        let services = RenderServices {
            host: &host,
            translator: &SourceStrings,
        };
        let err = registry
            .render("nope/nope", &services, &RenderContext::new(), &ThemeEngine::empty())
            .await
            .unwrap_err();
        assert!(matches!(err, BlockError::NotFound(_)));
    }

    #[tokio::test]
    async fn renders_configured_block_to_html() {
        let registry = default_registry(FilteredListSettings::default()).unwrap();
        let host = StubHost::new()
            .with_type(post_type(), 6)
            .with_results(numbered_items(1, 6));
        let services = RenderServices {
            host: &host,
            translator: &SourceStrings,
        };
        let ctx = RenderContext::new().with_current_item(1u64);

        let html = registry
            .render(BLOCK_NAME, &services, &ctx, &ThemeEngine::empty())
            .await
            .unwrap();
        assert!(html.starts_with("<div class=\"site-counts\">"));
        assert!(html.contains("<li>There are 6 Posts.</li>"));
        assert!(html.contains(
            "<ul><li>title2</li><li>title3</li><li>title4</li><li>title5</li><li>title6</li></ul>"
        ));
    }
}
