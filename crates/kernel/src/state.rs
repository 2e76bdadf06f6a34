//! Application state shared across all handlers.

use std::sync::Arc;

use anyhow::{Context, Result};
use site_counts::TEXT_DOMAIN;
use site_counts_sdk::block::RenderServices;
use site_counts_sdk::types::RenderContext;
use tracing::info;

use crate::block::{BlockError, BlockRegistry, default_registry};
use crate::config::Config;
use crate::host::{self, HostBackend};
use crate::locale::Catalog;
use crate::theme::ThemeEngine;

/// Shared application state.
///
/// Wrapped in Arc internally so Clone is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Content source for every block.
    host: Arc<dyn HostBackend>,

    /// Registered blocks, immutable after startup.
    registry: BlockRegistry,

    theme: ThemeEngine,

    catalog: Catalog,

    /// Language used when a request names none.
    default_language: String,
}

impl AppState {
    /// Create application state from configuration.
    pub async fn new(config: &Config) -> Result<Self> {
        let host = host::connect(config).await?;

        let registry =
            default_registry(config.list.clone()).context("failed to register blocks")?;
        info!(blocks = registry.len(), "block registry ready");

        let theme = match &config.theme_dir {
            Some(dir) => ThemeEngine::new(dir)?,
            None => ThemeEngine::empty(),
        };

        let catalog = Catalog::load_dir(TEXT_DOMAIN, &config.locale_dir)?;

        Ok(Self::from_parts(
            host,
            registry,
            theme,
            catalog,
            config.default_language.clone(),
        ))
    }

    /// Assemble state from already-built parts.
    pub fn from_parts(
        host: Arc<dyn HostBackend>,
        registry: BlockRegistry,
        theme: ThemeEngine,
        catalog: Catalog,
        default_language: String,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                host,
                registry,
                theme,
                catalog,
                default_language,
            }),
        }
    }

    pub fn host(&self) -> &Arc<dyn HostBackend> {
        &self.inner.host
    }

    pub fn registry(&self) -> &BlockRegistry {
        &self.inner.registry
    }

    pub fn theme(&self) -> &ThemeEngine {
        &self.inner.theme
    }

    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    pub fn default_language(&self) -> &str {
        &self.inner.default_language
    }

    /// Render a block to HTML, filling in the default language.
    pub async fn render_block(
        &self,
        name: &str,
        mut ctx: RenderContext,
    ) -> Result<String, BlockError> {
        if ctx.language.is_none() {
            ctx.language = Some(self.inner.default_language.clone());
        }

        let services = RenderServices {
            host: self.inner.host.as_host(),
            translator: &self.inner.catalog,
        };
        self.inner
            .registry
            .render(name, &services, &ctx, &self.inner.theme)
            .await
    }
}
