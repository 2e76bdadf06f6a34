//! Host service traits.
//!
//! A block reads everything it renders through these traits. The kernel
//! provides implementations backed by a YAML fixture or PostgreSQL; tests
//! use the stub host from `site-counts-test-utils`.

use async_trait::async_trait;

use crate::host_errors::HostResult;
use crate::types::{ContentType, QueryCriteria, QueryResults};

/// Read-only registry of content types.
#[async_trait]
pub trait ContentTypeRegistry: Send + Sync {
    /// All content types flagged public, in registry order.
    async fn list_public_content_types(&self) -> HostResult<Vec<ContentType>>;
}

/// Per-type aggregate of published items.
#[async_trait]
pub trait PublishedCounts: Send + Sync {
    /// Number of published items of `type_name`. Unknown types count zero.
    async fn count_published(&self, type_name: &str) -> HostResult<u64>;
}

/// Executor for bounded, filtered item queries.
#[async_trait]
pub trait ItemQuery: Send + Sync {
    /// Run one query and hand back its results.
    ///
    /// At most `criteria.page_size` items are returned, in the executor's
    /// own order.
    async fn query(&self, criteria: &QueryCriteria) -> HostResult<QueryResults>;
}

/// Everything a block can ask of the host.
pub trait Host: ContentTypeRegistry + PublishedCounts + ItemQuery {}

impl<T> Host for T where T: ContentTypeRegistry + PublishedCounts + ItemQuery {}
