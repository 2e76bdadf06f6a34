//! Host backends.
//!
//! A backend answers the block's host traits and reports its own health.
//! PostgreSQL is used when a database URL is configured, otherwise the
//! YAML fixture.

mod memory;
mod pg;
pub mod query_builder;

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use site_counts_sdk::host::Host;
use tracing::info;

pub use memory::{Fixture, FixtureItem, MemoryHost};
pub use pg::PgHost;

use crate::config::Config;

/// A host the kernel can serve blocks from.
#[async_trait]
pub trait HostBackend: Host {
    /// Short backend name for logs and the health endpoint.
    fn name(&self) -> &'static str;

    /// Whether the backend can currently answer queries.
    async fn healthy(&self) -> bool;

    /// View as the block-facing host.
    fn as_host(&self) -> &dyn Host;
}

/// Build the backend selected by the configuration.
pub async fn connect(config: &Config) -> Result<Arc<dyn HostBackend>> {
    let backend: Arc<dyn HostBackend> = match &config.database_url {
        Some(url) => Arc::new(PgHost::connect(url, config.database_max_connections).await?),
        None => Arc::new(MemoryHost::load(&config.content_fixture)?),
    };
    info!(backend = backend.name(), "host backend ready");
    Ok(backend)
}
