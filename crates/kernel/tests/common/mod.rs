#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Common test utilities for integration tests.
//!
//! [`TestApp`] drives the real router and state over the demo fixture and
//! the French catalog shipped at the repository root.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use site_counts::{FilteredListSettings, TEXT_DOMAIN};
use site_counts_kernel::block::default_registry;
use site_counts_kernel::host::{HostBackend, MemoryHost};
use site_counts_kernel::locale::Catalog;
use site_counts_kernel::routes;
use site_counts_kernel::state::AppState;
use site_counts_kernel::theme::ThemeEngine;
use site_counts_sdk::host::{ContentTypeRegistry, Host, ItemQuery, PublishedCounts};
use site_counts_sdk::host_errors::{HostError, HostResult};
use site_counts_sdk::types::{ContentType, QueryCriteria, QueryResults};

pub const FIXTURE: &str = include_str!("../../../../fixtures/content.yaml");
pub const FRENCH: &str = include_str!("../../../../languages/site-counts-fr.po");

/// Test application wrapper using the real kernel routes and state.
pub struct TestApp {
    router: Router,
    pub state: AppState,
}

impl TestApp {
    /// App over the demo fixture.
    pub fn new() -> Self {
        Self::with_host(Arc::new(MemoryHost::from_yaml_str(FIXTURE).unwrap()))
    }

    /// App over an arbitrary backend.
    pub fn with_host(host: Arc<dyn HostBackend>) -> Self {
        Self::with_host_and_theme(host, ThemeEngine::empty())
    }

    pub fn with_host_and_theme(host: Arc<dyn HostBackend>, theme: ThemeEngine) -> Self {
        let registry = default_registry(FilteredListSettings::default()).unwrap();
        let mut catalog = Catalog::new(TEXT_DOMAIN);
        catalog.add_po("fr", FRENCH);

        let state = AppState::from_parts(host, registry, theme, catalog, "en".to_string());
        Self {
            router: routes::app(state.clone()),
            state,
        }
    }

    /// Send a request through the router.
    pub async fn request(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request")
    }

    pub async fn get(&self, uri: &str) -> Response {
        self.request(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> Response {
        self.request(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }
}

pub async fn response_text(response: Response) -> String {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8_lossy(&body).to_string()
}

pub async fn response_json(response: Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap_or_else(|_| {
        let text = String::from_utf8_lossy(&body);
        panic!("Failed to parse JSON: {text}");
    })
}

/// Backend whose every call fails, as when the database is down.
pub struct DownHost;

#[async_trait]
impl ContentTypeRegistry for DownHost {
    async fn list_public_content_types(&self) -> HostResult<Vec<ContentType>> {
        Err(HostError::Unavailable("connection refused".into()))
    }
}

#[async_trait]
impl PublishedCounts for DownHost {
    async fn count_published(&self, _type_name: &str) -> HostResult<u64> {
        Err(HostError::Unavailable("connection refused".into()))
    }
}

#[async_trait]
impl ItemQuery for DownHost {
    async fn query(&self, _criteria: &QueryCriteria) -> HostResult<QueryResults> {
        Err(HostError::Unavailable("connection refused".into()))
    }
}

#[async_trait]
impl HostBackend for DownHost {
    fn name(&self) -> &'static str {
        "down"
    }

    async fn healthy(&self) -> bool {
        false
    }

    fn as_host(&self) -> &dyn Host {
        self
    }
}
