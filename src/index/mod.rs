//! Vector index over the cause catalog.
//!
//! This module provides:
//! - `VectorStore`: abstract interface for the persistent index
//! - `SqliteVectorStore`: the production implementation on sqlx/SQLite
//! - `Indexer`: builds or refreshes the index from a catalog source

mod indexer;
mod sqlite;
mod store;

pub use indexer::{document_text, Indexer, ReindexPolicy};
pub use sqlite::SqliteVectorStore;
pub use store::{IndexedCause, SearchHit, VectorStore};
