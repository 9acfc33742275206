//! VectorStore trait — abstract interface for the persistent cause index.
//!
//! The primary implementation is `SqliteVectorStore` in the `sqlite` module.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::errors::PipelineError;

/// One indexed cause as stored alongside its embedding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexedCause {
    /// Unique, stable cause identifier.
    pub cause_id: String,
    /// Full document text — what was embedded and what the generative model
    /// sees as context. Contains the id literally.
    pub document: String,
    /// Cause title, returned with search hits for display.
    pub title: String,
    /// Optional keyword string.
    pub tags: Option<String>,
}

/// Result of a similarity search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub cause: IndexedCause,
    /// Cosine similarity (higher = better).
    pub score: f32,
}

/// Abstract interface for the vector index.
///
/// Implementations must tolerate concurrent `search`/`count` calls from
/// multiple in-flight requests, and must make `replace_all` atomic so a
/// reader never observes a partially-built index.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Replace the whole index with `entries` in one atomic step.
    async fn replace_all(
        &self,
        entries: Vec<(IndexedCause, Vec<f32>)>,
    ) -> Result<(), PipelineError>;

    /// Nearest-neighbor search over stored embeddings, best first.
    /// Returns fewer than `limit` hits if the index holds fewer entries.
    async fn search(
        &self,
        query_embedding: &[f32],
        limit: usize,
    ) -> Result<Vec<SearchHit>, PipelineError>;

    /// Number of indexed causes.
    async fn count(&self) -> Result<usize, PipelineError>;

    /// All indexed cause ids, in insertion order.
    async fn ids(&self) -> Result<Vec<String>, PipelineError>;
}
