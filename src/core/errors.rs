use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;

/// Failures inside the RAG pipeline.
///
/// Every variant is recoverable: the orchestrator converts them into a
/// user-facing canned message, and the indexer aborts the attempt while
/// leaving the previous index state intact.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("knowledge base is empty")]
    IndexEmpty,
    #[error("embedding provider error: {0}")]
    Embedding(String),
    #[error("generation provider error: {0}")]
    Generation(String),
    #[error("catalog fetch error: {0}")]
    CatalogFetch(String),
    #[error("vector store error: {0}")]
    Store(String),
}

impl PipelineError {
    pub fn embedding<E: std::fmt::Display>(err: E) -> Self {
        PipelineError::Embedding(err.to_string())
    }

    pub fn generation<E: std::fmt::Display>(err: E) -> Self {
        PipelineError::Generation(err.to_string())
    }

    pub fn catalog<E: std::fmt::Display>(err: E) -> Self {
        PipelineError::CatalogFetch(err.to_string())
    }

    pub fn store<E: std::fmt::Display>(err: E) -> Self {
        PipelineError::Store(err.to_string())
    }
}

/// Errors surfaced by the HTTP layer.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    #[allow(dead_code)]
    pub fn internal<E: std::fmt::Display>(err: E) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            // The chat API reports client errors in the same "respuesta"
            // field the front end already renders.
            ApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "respuesta": msg }))).into_response()
            }
            ApiError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": msg })),
            )
                .into_response(),
        }
    }
}
