//! SQLite-backed vector index.
//!
//! Stores cause text + metadata in SQLite, with serialized embeddings for
//! brute-force cosine similarity search. The catalog is small (tens of
//! causes), so a linear scan per query is adequate and keeps the store free
//! of external services.

use std::path::PathBuf;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{Row, SqlitePool};

use super::store::{IndexedCause, SearchHit, VectorStore};
use crate::core::config::AppPaths;
use crate::core::errors::PipelineError;

/// SQLite-backed vector index, durable across restarts.
pub struct SqliteVectorStore {
    pool: SqlitePool,
    #[allow(dead_code)]
    db_path: PathBuf,
}

impl SqliteVectorStore {
    /// Create a new store at the default location.
    pub async fn new(paths: &AppPaths) -> Result<Self, PipelineError> {
        Self::with_path(paths.index_db_path.clone()).await
    }

    /// Create with a custom path (for testing).
    pub async fn with_path(db_path: PathBuf) -> Result<Self, PipelineError> {
        let options = SqliteConnectOptions::new()
            .filename(&db_path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(4)
            .connect_with(options)
            .await
            .map_err(PipelineError::store)?;

        let store = Self { pool, db_path };
        store.init_schema().await?;
        Ok(store)
    }

    async fn init_schema(&self) -> Result<(), PipelineError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS causes (
                cause_id TEXT PRIMARY KEY,
                document TEXT NOT NULL,
                title TEXT NOT NULL,
                tags TEXT,
                embedding BLOB NOT NULL
            )",
        )
        .execute(&self.pool)
        .await
        .map_err(PipelineError::store)?;

        Ok(())
    }

    /// Serialize embedding to bytes (little-endian f32).
    fn serialize_embedding(embedding: &[f32]) -> Vec<u8> {
        embedding.iter().flat_map(|f| f.to_le_bytes()).collect()
    }

    /// Deserialize embedding from bytes.
    fn deserialize_embedding(bytes: &[u8]) -> Vec<f32> {
        bytes
            .chunks_exact(4)
            .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect()
    }

    /// Compute cosine similarity between two vectors.
    fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
        if a.len() != b.len() || a.is_empty() {
            return 0.0;
        }

        let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
        let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
        let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
        let denom = norm_a * norm_b;

        if denom <= f32::EPSILON {
            0.0
        } else {
            dot / denom
        }
    }
}

#[async_trait]
impl VectorStore for SqliteVectorStore {
    async fn replace_all(
        &self,
        entries: Vec<(IndexedCause, Vec<f32>)>,
    ) -> Result<(), PipelineError> {
        let mut tx = self.pool.begin().await.map_err(PipelineError::store)?;

        sqlx::query("DELETE FROM causes")
            .execute(&mut *tx)
            .await
            .map_err(PipelineError::store)?;

        for (cause, embedding) in &entries {
            let blob = Self::serialize_embedding(embedding);

            sqlx::query(
                "INSERT INTO causes (cause_id, document, title, tags, embedding)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )
            .bind(&cause.cause_id)
            .bind(&cause.document)
            .bind(&cause.title)
            .bind(&cause.tags)
            .bind(&blob)
            .execute(&mut *tx)
            .await
            .map_err(PipelineError::store)?;
        }

        tx.commit().await.map_err(PipelineError::store)?;
        tracing::debug!("Replaced index contents with {} causes", entries.len());
        Ok(())
    }

    async fn search(
        &self,
        query_embedding: &[f32],
        limit: usize,
    ) -> Result<Vec<SearchHit>, PipelineError> {
        // Fetch in rowid order so the stable sort below breaks score ties by
        // insertion order.
        let rows = sqlx::query(
            "SELECT cause_id, document, title, tags, embedding
             FROM causes ORDER BY rowid",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(PipelineError::store)?;

        let mut scored: Vec<SearchHit> = rows
            .iter()
            .filter_map(|row| {
                let embedding_bytes: Vec<u8> = row.get("embedding");
                if embedding_bytes.is_empty() {
                    return None;
                }
                let stored_emb = Self::deserialize_embedding(&embedding_bytes);
                let score = Self::cosine_similarity(query_embedding, &stored_emb);

                Some(SearchHit {
                    cause: IndexedCause {
                        cause_id: row.get("cause_id"),
                        document: row.get("document"),
                        title: row.get("title"),
                        tags: row.get("tags"),
                    },
                    score,
                })
            })
            .collect();

        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(limit);

        Ok(scored)
    }

    async fn count(&self) -> Result<usize, PipelineError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM causes")
            .fetch_one(&self.pool)
            .await
            .map_err(PipelineError::store)?;

        Ok(count as usize)
    }

    async fn ids(&self) -> Result<Vec<String>, PipelineError> {
        let rows = sqlx::query("SELECT cause_id FROM causes ORDER BY rowid")
            .fetch_all(&self.pool)
            .await
            .map_err(PipelineError::store)?;

        Ok(rows.iter().map(|row| row.get("cause_id")).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, document: &str, embedding: Vec<f32>) -> (IndexedCause, Vec<f32>) {
        (
            IndexedCause {
                cause_id: id.to_string(),
                document: document.to_string(),
                title: format!("Causa {}", id),
                tags: None,
            },
            embedding,
        )
    }

    async fn test_store() -> SqliteVectorStore {
        let tmp = std::env::temp_dir().join(format!(
            "midonacion-index-test-{}.db",
            uuid::Uuid::new_v4()
        ));
        SqliteVectorStore::with_path(tmp).await.unwrap()
    }

    #[tokio::test]
    async fn search_ranks_closer_vector_first() {
        let store = test_store().await;

        store
            .replace_all(vec![
                entry("a", "doc a", vec![1.0, 0.0, 0.0]),
                entry("b", "doc b", vec![0.0, 1.0, 0.0]),
            ])
            .await
            .unwrap();

        let hits = store.search(&[0.9, 0.1, 0.0], 2).await.unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].cause.cause_id, "a");
        assert_eq!(hits[1].cause.cause_id, "b");
        assert!(hits[0].score > hits[1].score);
    }

    #[tokio::test]
    async fn ties_break_by_insertion_order() {
        let store = test_store().await;

        // Identical vectors: identical scores for any query.
        store
            .replace_all(vec![
                entry("first", "doc", vec![1.0, 0.0]),
                entry("second", "doc", vec![1.0, 0.0]),
            ])
            .await
            .unwrap();

        let hits = store.search(&[1.0, 0.0], 2).await.unwrap();
        assert_eq!(hits[0].cause.cause_id, "first");
        assert_eq!(hits[1].cause.cause_id, "second");
    }

    #[tokio::test]
    async fn limit_bounds_result_length() {
        let store = test_store().await;

        store
            .replace_all(vec![
                entry("a", "doc a", vec![1.0, 0.0]),
                entry("b", "doc b", vec![0.0, 1.0]),
            ])
            .await
            .unwrap();

        assert_eq!(store.search(&[1.0, 0.0], 1).await.unwrap().len(), 1);
        // Fewer entries than the limit: all of them come back.
        assert_eq!(store.search(&[1.0, 0.0], 10).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn empty_store_returns_no_hits() {
        let store = test_store().await;
        assert_eq!(store.count().await.unwrap(), 0);
        assert!(store.search(&[1.0, 0.0], 2).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn replace_all_swaps_contents_atomically() {
        let store = test_store().await;

        store
            .replace_all(vec![entry("old", "doc", vec![1.0])])
            .await
            .unwrap();
        store
            .replace_all(vec![
                entry("new1", "doc", vec![1.0]),
                entry("new2", "doc", vec![0.5]),
            ])
            .await
            .unwrap();

        assert_eq!(store.ids().await.unwrap(), vec!["new1", "new2"]);
        assert_eq!(store.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn index_survives_reopen() {
        let tmp = std::env::temp_dir().join(format!(
            "midonacion-index-reopen-{}.db",
            uuid::Uuid::new_v4()
        ));

        {
            let store = SqliteVectorStore::with_path(tmp.clone()).await.unwrap();
            store
                .replace_all(vec![entry("101", "doc 101", vec![0.3, 0.7])])
                .await
                .unwrap();
        }

        let reopened = SqliteVectorStore::with_path(tmp).await.unwrap();
        assert_eq!(reopened.count().await.unwrap(), 1);
        let hits = reopened.search(&[0.3, 0.7], 1).await.unwrap();
        assert_eq!(hits[0].cause.cause_id, "101");
        assert_eq!(hits[0].cause.document, "doc 101");
    }
}
