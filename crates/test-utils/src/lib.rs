//! Site Counts test utilities.
//!
//! A scriptable in-process host plus fixture helpers for block and
//! kernel tests.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use site_counts_sdk::host::{ContentTypeRegistry, ItemQuery, PublishedCounts};
use site_counts_sdk::host_errors::{HostError, HostResult};
use site_counts_sdk::types::{ContentItem, ContentType, QueryCriteria, QueryResults};

/// The "post" type with its usual labels.
pub fn post_type() -> ContentType {
    ContentType::new("post", "Post", "Posts")
}

/// The "page" type with its usual labels.
pub fn page_type() -> ContentType {
    ContentType::new("page", "Page", "Pages")
}

/// Items with ids `first..=last`, titled `title{id}`.
pub fn numbered_items(first: u64, last: u64) -> Vec<ContentItem> {
    (first..=last)
        .map(|id| ContentItem::new(id, format!("title{id}")))
        .collect()
}

/// A host whose every answer is scripted up front.
///
/// Query results are returned verbatim (truncated to the page size) so tests
/// control the executor's order exactly. Every issued query is recorded.
#[derive(Debug, Default)]
pub struct StubHost {
    content_types: Vec<ContentType>,
    counts: HashMap<String, u64>,
    results: Vec<ContentItem>,
    fail_types: bool,
    fail_query: bool,
    failing_counts: HashSet<String>,
    issued: Mutex<Vec<QueryCriteria>>,
}

impl StubHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a content type with its published count.
    pub fn with_type(mut self, content_type: ContentType, published: u64) -> Self {
        self.counts.insert(content_type.name.clone(), published);
        self.content_types.push(content_type);
        self
    }

    /// Set the rows the query executor hands back.
    pub fn with_results(mut self, items: Vec<ContentItem>) -> Self {
        self.results = items;
        self
    }

    /// Make the content-type registry fail.
    pub fn failing_types(mut self) -> Self {
        self.fail_types = true;
        self
    }

    /// Make the query executor fail.
    pub fn failing_query(mut self) -> Self {
        self.fail_query = true;
        self
    }

    /// Make the count lookup for one type fail.
    pub fn failing_count(mut self, type_name: &str) -> Self {
        self.failing_counts.insert(type_name.to_string());
        self
    }

    /// Criteria of every query issued so far.
    pub fn issued_queries(&self) -> Vec<QueryCriteria> {
        self.issued
            .lock()
            .map(|issued| issued.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ContentTypeRegistry for StubHost {
    async fn list_public_content_types(&self) -> HostResult<Vec<ContentType>> {
        if self.fail_types {
            return Err(HostError::Unavailable("stub registry offline".into()));
        }
        Ok(self
            .content_types
            .iter()
            .filter(|t| t.public)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl PublishedCounts for StubHost {
    async fn count_published(&self, type_name: &str) -> HostResult<u64> {
        if self.failing_counts.contains(type_name) {
            return Err(HostError::Query(format!("stub count for {type_name}")));
        }
        Ok(self.counts.get(type_name).copied().unwrap_or(0))
    }
}

#[async_trait]
impl ItemQuery for StubHost {
    async fn query(&self, criteria: &QueryCriteria) -> HostResult<QueryResults> {
        if let Ok(mut issued) = self.issued.lock() {
            issued.push(criteria.clone());
        }
        if self.fail_query {
            return Err(HostError::Unavailable("stub executor offline".into()));
        }
        Ok(QueryResults::new(
            self.results
                .iter()
                .take(criteria.page_size)
                .cloned()
                .collect(),
        ))
    }
}
