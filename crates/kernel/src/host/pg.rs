//! PostgreSQL-backed host.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::debug;
use uuid::Uuid;

use site_counts_sdk::host::{ContentTypeRegistry, Host, ItemQuery, PublishedCounts};
use site_counts_sdk::host_errors::{HostError, HostResult};
use site_counts_sdk::types::{ContentItem, ContentType, QueryCriteria, QueryResults};

use super::HostBackend;
use super::query_builder::{FilteredItemsQuery, build_content_types, build_published_count};

/// Content type row from `item_type`.
#[derive(Debug, sqlx::FromRow)]
struct ItemTypeRow {
    type_name: String,
    label: String,
    settings: Value,
}

impl ItemTypeRow {
    /// `settings.plural_label` falls back to the label; `settings.public`
    /// defaults to true.
    fn into_content_type(self) -> ContentType {
        let plural = self
            .settings
            .get("plural_label")
            .and_then(Value::as_str)
            .unwrap_or(&self.label)
            .to_string();
        let public = self
            .settings
            .get("public")
            .and_then(Value::as_bool)
            .unwrap_or(true);

        let content_type = ContentType::new(self.type_name, self.label, plural);
        if public {
            content_type
        } else {
            content_type.private()
        }
    }
}

/// Host reading content from the CMS database.
#[derive(Clone)]
pub struct PgHost {
    pool: PgPool,
}

impl PgHost {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a connection pool and wrap it.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .context("failed to connect to PostgreSQL")?;
        Ok(Self::new(pool))
    }
}

impl std::fmt::Debug for PgHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgHost").finish()
    }
}

#[async_trait]
impl ContentTypeRegistry for PgHost {
    async fn list_public_content_types(&self) -> HostResult<Vec<ContentType>> {
        let rows: Vec<ItemTypeRow> = sqlx::query_as(&build_content_types())
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        Ok(rows
            .into_iter()
            .map(ItemTypeRow::into_content_type)
            .filter(|ct| ct.public)
            .collect())
    }
}

#[async_trait]
impl PublishedCounts for PgHost {
    async fn count_published(&self, type_name: &str) -> HostResult<u64> {
        let count: i64 = sqlx::query_scalar(&build_published_count(type_name))
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;

        u64::try_from(count).map_err(|_| HostError::Decode(format!("negative count {count}")))
    }
}

#[async_trait]
impl ItemQuery for PgHost {
    async fn query(&self, criteria: &QueryCriteria) -> HostResult<QueryResults> {
        let builder = FilteredItemsQuery::new(criteria);
        let sql = builder.build();
        debug!(sql = %sql, "filtered item query");

        let rows: Vec<(Uuid, String)> = sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;
        let items = rows
            .into_iter()
            .map(|(id, title)| ContentItem::new(id, title))
            .collect();

        if !criteria.hints.count_total {
            return Ok(QueryResults::new(items));
        }

        let total: i64 = sqlx::query_scalar(&builder.build_count())
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok(QueryResults::new(items).with_total(u64::try_from(total).unwrap_or_default()))
    }
}

#[async_trait]
impl HostBackend for PgHost {
    fn name(&self) -> &'static str {
        "postgres"
    }

    async fn healthy(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }

    fn as_host(&self) -> &dyn Host {
        self
    }
}

/// Map sqlx errors onto host errors.
fn map_sqlx(e: sqlx::Error) -> HostError {
    match e {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            HostError::Unavailable(e.to_string())
        }
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) | sqlx::Error::ColumnNotFound(_) => {
            HostError::Decode(e.to_string())
        }
        other => HostError::Query(other.to_string()),
    }
}
