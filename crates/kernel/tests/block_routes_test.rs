//! HTTP tests for block listing and rendering.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::json;

use common::{DownHost, TestApp, response_json, response_text};
use site_counts_kernel::host::MemoryHost;
use site_counts_kernel::theme::ThemeEngine;

const RENDER: &str = "/blocks/site-counts/site-counts/render";

#[tokio::test]
async fn renders_all_three_sections() {
    let app = TestApp::new();
    let response = app.get(RENDER).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("text/html"))
    );

    let html = response_text(response).await;
    assert_eq!(
        html,
        concat!(
            "<div class=\"site-counts\">",
            "<h2>Post Counts</h2>",
            "<ul><li>There are 8 Posts.</li><li>There is 1 Page.</li><li>There are no Media.</li></ul>",
            "<p>The current post ID is </p>",
            "<h2>Any 5 posts with the tag of foo and the category of baz</h2>",
            "<ul><li>Roadmap</li><li>Conference recap</li><li>Office hours</li>",
            "<li>Weekly digest</li><li>Release notes</li></ul>",
            "</div>"
        )
    );
}

#[tokio::test]
async fn current_item_is_labelled_and_excluded() {
    let app = TestApp::new();
    let html = response_text(app.get(&format!("{RENDER}?current=4")).await).await;

    assert!(html.contains("<p>The current post ID is 4</p>"));
    assert!(!html.contains("Office hours"));
    assert!(html.contains(
        "<ul><li>Roadmap</li><li>Conference recap</li><li>Weekly digest</li><li>Release notes</li><li>Hello world</li></ul>"
    ));
    assert!(html.contains("<h2>Any 5 posts"));
}

#[tokio::test]
async fn class_name_is_escaped_into_wrapper() {
    let app = TestApp::new();
    let html = response_text(
        app.get(&format!("{RENDER}?className=is-wide%22%3E%3Cscript%3E"))
            .await,
    )
    .await;
    assert!(html.starts_with("<div class=\"site-counts is-wide&quot;&gt;&lt;script&gt;\">"));
    assert!(!html.contains("<script>"));
}

#[tokio::test]
async fn french_translation_is_applied() {
    let app = TestApp::new();
    let html = response_text(app.get(&format!("{RENDER}?lang=fr&current=2")).await).await;

    assert!(html.contains("<h2>Nombre de publications</h2>"));
    assert!(html.contains("<li>Il y a 8 éléments de type Posts.</li>"));
    assert!(html.contains("<li>Il y a 1 Page.</li>"));
    assert!(html.contains("<li>Il n&#x27;y a aucun élément de type Media.</li>"));
    assert!(html.contains("L&#x27;identifiant de la publication courante est 2"));
    assert!(html.contains("5 publications avec l&#x27;étiquette foo et la catégorie baz"));
}

#[tokio::test]
async fn unknown_language_falls_back_to_source() {
    let app = TestApp::new();
    let html = response_text(app.get(&format!("{RENDER}?lang=de")).await).await;
    assert!(html.contains("<h2>Post Counts</h2>"));
}

#[tokio::test]
async fn unknown_block_is_404() {
    let app = TestApp::new();
    let response = app.get("/blocks/site-counts/nope/render").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn editor_preview_returns_rendered_json() {
    let app = TestApp::new();
    let response = app
        .post_json(
            RENDER,
            json!({"attributes": {"className": "preview"}, "current_item": 6}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    let rendered = body["rendered"].as_str().unwrap();
    assert!(rendered.starts_with("<div class=\"site-counts preview\">"));
    assert!(rendered.contains("The current post ID is 6"));
    assert!(!rendered.contains("Roadmap"));
    assert!(rendered.contains("<li>Hello world</li>"));
}

#[tokio::test]
async fn editor_preview_rejects_object_item_id() {
    let app = TestApp::new();
    let response = app
        .post_json(RENDER, json!({"current_item": {"id": 1}}))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn editor_preview_rejects_fractional_item_id() {
    let app = TestApp::new();
    let response = app.post_json(RENDER, json!({"current_item": 6.0})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.post_json(RENDER, json!({"current_item": 6.5})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn editor_preview_accepts_string_item_id() {
    let app = TestApp::new();
    let body = response_json(app.post_json(RENDER, json!({"current_item": "6"})).await).await;
    let rendered = body["rendered"].as_str().unwrap();
    assert!(rendered.contains("The current post ID is 6<"));
    assert!(!rendered.contains("Roadmap"));
}

#[tokio::test]
async fn lists_registered_blocks() {
    let app = TestApp::new();
    let response = app.get("/blocks").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    let blocks = body.as_array().unwrap();
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0]["name"], "site-counts/site-counts");
    assert_eq!(blocks[0]["attributes"][0]["name"], "className");
    assert_eq!(blocks[0]["attributes"][0]["type"], "string");
}

#[tokio::test]
async fn empty_fixture_omits_the_list() {
    let host = MemoryHost::from_yaml_str(
        "content_types:\n  - { name: post, singular_label: Post, plural_label: Posts }\n",
    )
    .unwrap();
    let app = TestApp::with_host(Arc::new(host));
    let html = response_text(app.get(RENDER).await).await;

    assert!(html.contains("<li>There are no Posts.</li>"));
    assert!(!html.contains("Any "));
    assert!(html.ends_with("<p>The current post ID is </p></div>"));
}

#[tokio::test]
async fn unavailable_host_degrades_to_empty_sections() {
    let app = TestApp::with_host(Arc::new(DownHost));
    let response = app.get(&format!("{RENDER}?current=1")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = response_text(response).await;
    assert_eq!(
        html,
        "<div class=\"site-counts\"><h2>Post Counts</h2><ul></ul><p>The current post ID is 1</p></div>"
    );
}

#[tokio::test]
async fn theme_block_template_wraps_output() {
    let mut theme = ThemeEngine::empty();
    theme
        .add_template(
            "block--site-counts--site-counts.html",
            "<section class=\"widget\">{{ content | safe }}</section>",
        )
        .unwrap();
    let host = MemoryHost::from_yaml_str(common::FIXTURE).unwrap();
    let app = TestApp::with_host_and_theme(Arc::new(host), theme);

    let html = response_text(app.get(RENDER).await).await;
    assert!(html.starts_with("<section class=\"widget\"><div class=\"site-counts\">"));
    assert!(html.ends_with("</div></section>"));
}

#[tokio::test]
async fn repeated_renders_are_identical() {
    let app = TestApp::new();
    let first = response_text(app.get(&format!("{RENDER}?current=3")).await).await;
    let second = response_text(app.get(&format!("{RENDER}?current=3")).await).await;
    assert_eq!(first, second);
}
