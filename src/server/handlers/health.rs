use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::state::AppState;

pub async fn health(State(_state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

pub async fn get_status(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let indexed_causes = state.store.count().await.unwrap_or(0);
    Json(json!({
        "indexed_causes": indexed_causes,
        "catalog_source": state.catalog_name,
        "retrieval_top_n": state.config.retrieval_top_n,
    }))
}
