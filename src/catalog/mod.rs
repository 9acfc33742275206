//! Catalog sources — where the causes to index come from.
//!
//! Two implementations exist behind the `CatalogSource` trait:
//! - `FixedCatalog`: compiled-in demo dataset
//! - `RemoteCatalog`: campaigns fetched from the platform backend

mod fixed;
mod remote;

use async_trait::async_trait;

use crate::core::errors::PipelineError;

pub use fixed::FixedCatalog;
pub use remote::RemoteCatalog;

/// A charitable cause to index. Immutable once indexed; a reindex recreates
/// the whole set from a fresh catalog snapshot.
#[derive(Debug, Clone)]
pub struct Cause {
    /// Stable unique key, quoted literally inside the indexed text.
    pub id: String,
    pub title: String,
    pub description: String,
    /// Free-text keyword string ("Animales, Mascotas, ...").
    pub tags: String,
    pub goal: Option<f64>,
    pub currency: Option<String>,
    pub creator: Option<String>,
}

/// Supplier of the cause set to index.
///
/// A fetch failure is an error, distinguishable from a catalog that
/// currently holds zero causes.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Short name for logs and the status endpoint.
    fn name(&self) -> &str;

    /// Return the current catalog snapshot.
    async fn fetch(&self) -> Result<Vec<Cause>, PipelineError>;
}
