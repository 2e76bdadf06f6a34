//! In-memory host backed by a YAML fixture.
//!
//! ```yaml
//! content_types:
//!   - name: post
//!     singular_label: Post
//!     plural_label: Posts
//! items:
//!   - id: 1
//!     item_type: post
//!     title: Hello
//!     tags: [foo]
//!     categories: [baz]
//!     created: 1700000000
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Timelike};
use serde::{Deserialize, Deserializer};
use tracing::info;

use site_counts_sdk::host::{ContentTypeRegistry, Host, ItemQuery, PublishedCounts};
use site_counts_sdk::host_errors::HostResult;
use site_counts_sdk::types::{
    ContentItem, ContentType, ItemId, ItemStatus, QueryCriteria, QueryResults,
};

use super::HostBackend;

/// Fixture document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Fixture {
    #[serde(default)]
    pub content_types: Vec<ContentType>,
    #[serde(default)]
    pub items: Vec<FixtureItem>,
}

/// One item in the fixture.
#[derive(Debug, Clone, Deserialize)]
pub struct FixtureItem {
    #[serde(deserialize_with = "item_id")]
    pub id: ItemId,
    pub item_type: String,
    pub title: String,
    #[serde(default)]
    pub status: ItemStatus,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    /// Creation time, unix seconds.
    pub created: i64,
}

/// Accept ids written as YAML integers or strings.
fn item_id<'de, D>(deserializer: D) -> Result<ItemId, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Int(i64),
        Text(String),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Int(id) => ItemId::from(id),
        RawId::Text(id) => ItemId::from(id),
    })
}

impl FixtureItem {
    /// Hour of day (UTC) the item was created.
    fn created_hour(&self) -> Option<u32> {
        DateTime::from_timestamp(self.created, 0).map(|dt| dt.hour())
    }

    fn matches(&self, criteria: &QueryCriteria) -> bool {
        self.item_type == criteria.item_type
            && self.status == criteria.status
            && self.tags.iter().any(|t| *t == criteria.tag)
            && self.categories.iter().any(|c| *c == criteria.category)
            && self
                .created_hour()
                .is_some_and(|hour| criteria.hours.contains(hour))
    }
}

/// Host serving a fixed set of content types and items.
#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    fixture: Fixture,
}

impl MemoryHost {
    pub fn new(fixture: Fixture) -> Self {
        Self { fixture }
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let fixture: Fixture = serde_yml::from_str(yaml).context("invalid content fixture")?;
        Ok(Self::new(fixture))
    }

    /// Load a fixture file.
    pub fn load(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read content fixture {}", path.display()))?;
        let host = Self::from_yaml_str(&yaml)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        info!(
            path = %path.display(),
            content_types = host.fixture.content_types.len(),
            items = host.fixture.items.len(),
            "loaded content fixture"
        );
        Ok(host)
    }
}

#[async_trait]
impl ContentTypeRegistry for MemoryHost {
    async fn list_public_content_types(&self) -> HostResult<Vec<ContentType>> {
        Ok(self
            .fixture
            .content_types
            .iter()
            .filter(|ct| ct.public)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl PublishedCounts for MemoryHost {
    async fn count_published(&self, type_name: &str) -> HostResult<u64> {
        let count = self
            .fixture
            .items
            .iter()
            .filter(|item| item.item_type == type_name && item.status == ItemStatus::Published)
            .count();
        Ok(count as u64)
    }
}

#[async_trait]
impl ItemQuery for MemoryHost {
    async fn query(&self, criteria: &QueryCriteria) -> HostResult<QueryResults> {
        let mut matched: Vec<&FixtureItem> = self
            .fixture
            .items
            .iter()
            .filter(|item| item.matches(criteria))
            .collect();

        // Newest first, ties broken by id descending
        matched.sort_by(|a, b| b.created.cmp(&a.created).then_with(|| b.id.cmp(&a.id)));

        let total = matched.len() as u64;
        let items = matched
            .into_iter()
            .take(criteria.page_size)
            .map(|item| ContentItem::new(item.id.clone(), item.title.clone()))
            .collect();

        let results = QueryResults::new(items);
        Ok(if criteria.hints.count_total {
            results.with_total(total)
        } else {
            results
        })
    }
}

#[async_trait]
impl HostBackend for MemoryHost {
    fn name(&self) -> &'static str {
        "fixture"
    }

    async fn healthy(&self) -> bool {
        true
    }

    fn as_host(&self) -> &dyn Host {
        self
    }
}
