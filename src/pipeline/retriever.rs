//! Similarity retrieval over the cause index.

use std::sync::Arc;

use crate::core::errors::PipelineError;
use crate::index::{SearchHit, VectorStore};
use crate::providers::EmbeddingProvider;

/// Embeds a query and runs nearest-neighbor search against the index.
pub struct Retriever {
    embeddings: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorStore>,
}

impl Retriever {
    pub fn new(embeddings: Arc<dyn EmbeddingProvider>, store: Arc<dyn VectorStore>) -> Self {
        Retriever { embeddings, store }
    }

    /// Top `top_n` causes for `query`, best first.
    ///
    /// An empty index yields an empty result, not an error, and
    /// short-circuits before any embedding call.
    pub async fn search(
        &self,
        query: &str,
        top_n: usize,
    ) -> Result<Vec<SearchHit>, PipelineError> {
        if self.store.count().await? == 0 {
            return Ok(Vec::new());
        }

        let query_embedding = self.embeddings.embed(query).await?;
        self.store.search(&query_embedding, top_n).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::index::{IndexedCause, SqliteVectorStore};

    struct CountingEmbeddings {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl EmbeddingProvider for CountingEmbeddings {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>, PipelineError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![1.0, 0.0])
        }
    }

    async fn test_store() -> Arc<SqliteVectorStore> {
        let tmp = std::env::temp_dir().join(format!(
            "midonacion-retriever-test-{}.db",
            uuid::Uuid::new_v4()
        ));
        Arc::new(SqliteVectorStore::with_path(tmp).await.unwrap())
    }

    fn entry(id: &str, embedding: Vec<f32>) -> (IndexedCause, Vec<f32>) {
        (
            IndexedCause {
                cause_id: id.to_string(),
                document: format!("doc {}", id),
                title: id.to_string(),
                tags: None,
            },
            embedding,
        )
    }

    #[tokio::test]
    async fn empty_index_skips_the_embedding_call() {
        let store = test_store().await;
        let embeddings = Arc::new(CountingEmbeddings {
            calls: AtomicUsize::new(0),
        });
        let retriever = Retriever::new(embeddings.clone(), store);

        let hits = retriever.search("cualquier cosa", 2).await.unwrap();
        assert!(hits.is_empty());
        assert_eq!(embeddings.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn results_ordered_by_similarity() {
        let store = test_store().await;
        store
            .replace_all(vec![
                entry("far", vec![0.0, 1.0]),
                entry("near", vec![1.0, 0.0]),
            ])
            .await
            .unwrap();

        let retriever = Retriever::new(
            Arc::new(CountingEmbeddings {
                calls: AtomicUsize::new(0),
            }),
            store,
        );

        let hits = retriever.search("consulta", 2).await.unwrap();
        assert_eq!(hits[0].cause.cause_id, "near");
        assert_eq!(hits[1].cause.cause_id, "far");
    }
}
