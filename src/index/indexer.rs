//! Builds or refreshes the vector index from a catalog source.

use std::sync::Arc;

use crate::catalog::{CatalogSource, Cause};
use crate::core::errors::PipelineError;
use crate::providers::EmbeddingProvider;

use super::store::{IndexedCause, VectorStore};

/// What to do when the index already holds data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReindexPolicy {
    /// Leave a populated index untouched (idempotent bootstrap; stale data
    /// tolerated). Used with the fixed catalog.
    SkipIfPopulated,
    /// Rebuild from a fresh catalog snapshot. Fail-closed: the previous
    /// index survives any fetch or embedding failure, and the swap itself is
    /// one atomic transaction. Used with the remote catalog.
    Rebuild,
}

/// Deterministic document text for one cause.
///
/// This string is both what gets embedded and what the generative model sees
/// as context. The id appears literally so the model can quote it back
/// inside a `[URL:/iniciativa/{id}]` token.
pub fn document_text(cause: &Cause) -> String {
    let mut text = format!(
        "ID de la Causa: {}. Título: {}. Descripción: {}. ",
        cause.id, cause.title, cause.description
    );

    if let (Some(goal), Some(currency)) = (cause.goal, cause.currency.as_deref()) {
        text.push_str(&format!("Meta de recaudación: {} {}. ", goal, currency));
    }
    if let Some(creator) = cause.creator.as_deref() {
        text.push_str(&format!("Creador: {}. ", creator));
    }
    if !cause.tags.is_empty() {
        text.push_str(&format!("Preferencias/Etiquetas clave: {}", cause.tags));
    }

    text.trim_end().to_string()
}

/// Turns a catalog snapshot into index entries, one embedding call per cause.
pub struct Indexer {
    embeddings: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorStore>,
}

impl Indexer {
    pub fn new(embeddings: Arc<dyn EmbeddingProvider>, store: Arc<dyn VectorStore>) -> Self {
        Indexer { embeddings, store }
    }

    /// Build or refresh the index. Returns the number of indexed causes.
    ///
    /// The catalog is fetched and every document embedded BEFORE the store
    /// is touched; any failure aborts the attempt as a whole with the
    /// previous index intact.
    pub async fn reindex(
        &self,
        catalog: &dyn CatalogSource,
        policy: ReindexPolicy,
    ) -> Result<usize, PipelineError> {
        if policy == ReindexPolicy::SkipIfPopulated {
            let existing = self.store.count().await?;
            if existing > 0 {
                tracing::info!(
                    "Index already holds {} causes; skipping reindex",
                    existing
                );
                return Ok(existing);
            }
        }

        let causes = catalog.fetch().await?;
        tracing::info!(
            "Indexing {} causes from catalog '{}'",
            causes.len(),
            catalog.name()
        );

        let mut entries = Vec::with_capacity(causes.len());
        for cause in &causes {
            let document = document_text(cause);
            let embedding = self.embeddings.embed(&document).await?;

            entries.push((
                IndexedCause {
                    cause_id: cause.id.clone(),
                    document,
                    title: cause.title.clone(),
                    tags: if cause.tags.is_empty() {
                        None
                    } else {
                        Some(cause.tags.clone())
                    },
                },
                embedding,
            ));
        }

        let count = entries.len();
        self.store.replace_all(entries).await?;
        tracing::info!("Indexed {} causes", count);
        Ok(count)
    }
}
