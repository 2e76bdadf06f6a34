//! Block listing and rendering endpoints.

use axum::extract::{Path, Query, State};
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use site_counts_sdk::block::BlockDefinition;
use site_counts_sdk::types::{BlockAttributes, ItemId, RenderContext};
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Query parameters for a front-end render.
#[derive(Debug, Default, Deserialize)]
pub struct RenderParams {
    /// Id of the item being viewed.
    pub current: Option<String>,
    #[serde(rename = "className")]
    pub class_name: Option<String>,
    pub lang: Option<String>,
}

/// Editor preview request.
#[derive(Debug, Default, Deserialize)]
pub struct RenderRequest {
    #[serde(default)]
    pub attributes: BlockAttributes,
    /// Current item id, as a JSON string or number.
    pub current_item: Option<Value>,
    pub lang: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RenderResponse {
    pub rendered: String,
}

/// List registered blocks.
async fn list_blocks(State(state): State<AppState>) -> Json<Vec<BlockDefinition>> {
    Json(state.registry().definitions())
}

/// Render a block as an HTML fragment.
async fn render_get(
    State(state): State<AppState>,
    Path((namespace, block)): Path<(String, String)>,
    Query(params): Query<RenderParams>,
) -> AppResult<Html<String>> {
    let name = format!("{namespace}/{block}");
    debug!(block = %name, current = ?params.current, "render block");

    let ctx = RenderContext {
        current_item: non_empty(params.current).map(ItemId::from),
        attributes: BlockAttributes {
            class_name: params.class_name,
        },
        language: non_empty(params.lang),
    };

    let html = state.render_block(&name, ctx).await?;
    Ok(Html(html))
}

/// Render a block for the editor preview.
async fn render_post(
    State(state): State<AppState>,
    Path((namespace, block)): Path<(String, String)>,
    Json(request): Json<RenderRequest>,
) -> AppResult<Json<RenderResponse>> {
    let name = format!("{namespace}/{block}");

    let current_item = match request.current_item {
        None | Some(Value::Null) => None,
        Some(Value::String(id)) => non_empty(Some(id)).map(ItemId::from),
        Some(Value::Number(n)) => match (n.as_u64(), n.as_i64()) {
            (Some(id), _) => Some(ItemId::from(id)),
            (None, Some(id)) => Some(ItemId::from(id)),
            (None, None) => {
                return Err(AppError::BadRequest(format!(
                    "current_item must be an integer, got {n}"
                )));
            }
        },
        Some(other) => {
            return Err(AppError::BadRequest(format!(
                "current_item must be a string or number, got {other}"
            )));
        }
    };

    let ctx = RenderContext {
        current_item,
        attributes: request.attributes,
        language: non_empty(request.lang),
    };

    let rendered = state.render_block(&name, ctx).await?;
    Ok(Json(RenderResponse { rendered }))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Create the block router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/blocks", get(list_blocks))
        .route(
            "/blocks/{namespace}/{block}/render",
            get(render_get).post(render_post),
        )
}
