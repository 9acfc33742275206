use std::sync::Arc;

use crate::catalog::{CatalogSource, FixedCatalog, RemoteCatalog};
use crate::core::config::{AppConfig, AppPaths, CatalogKind};
use crate::index::{Indexer, ReindexPolicy, SqliteVectorStore, VectorStore};
use crate::pipeline::Chatbot;
use crate::providers::{EmbeddingProvider, GeminiClient, TextGenerator};

pub mod error;

use error::InitializationError;

/// Global application state shared across all routes.
///
/// All service handles are explicitly constructed here and passed down;
/// nothing is process-global.
pub struct AppState {
    pub paths: Arc<AppPaths>,
    pub config: AppConfig,
    pub catalog_name: String,
    pub store: Arc<dyn VectorStore>,
    pub chatbot: Chatbot,
}

impl AppState {
    /// Initializes the application state.
    ///
    /// Opens the persistent vector index, builds the provider client and
    /// the configured catalog source, and runs the boot-time reindex BEFORE
    /// the caller binds the listener — no request can observe the index
    /// mid-build. A failed reindex is recoverable: the service starts with
    /// whatever index state persisted from earlier runs.
    pub async fn initialize(paths: Arc<AppPaths>) -> Result<Arc<Self>, InitializationError> {
        let config = AppConfig::from_env();

        if config.gemini_api_key.is_empty() {
            tracing::warn!("GEMINI_API_KEY is not set; provider calls will fail");
        }

        let store: Arc<dyn VectorStore> = Arc::new(
            SqliteVectorStore::new(&paths)
                .await
                .map_err(|e| InitializationError::Store(e.into()))?,
        );

        let gemini = Arc::new(
            GeminiClient::new(
                config.gemini_base_url.clone(),
                config.gemini_api_key.clone(),
                config.embedding_model.clone(),
                config.chat_model.clone(),
                config.request_timeout,
            )
            .map_err(|e| InitializationError::Provider(e.into()))?,
        );
        let embeddings: Arc<dyn EmbeddingProvider> = gemini.clone();
        let generator: Arc<dyn TextGenerator> = gemini;

        let (catalog, policy): (Box<dyn CatalogSource>, ReindexPolicy) = match config.catalog {
            CatalogKind::Fixed => (Box::new(FixedCatalog::new()), ReindexPolicy::SkipIfPopulated),
            CatalogKind::Remote => (
                Box::new(
                    RemoteCatalog::new(config.campaigns_url.clone(), config.request_timeout)
                        .map_err(|e| InitializationError::Catalog(e.into()))?,
                ),
                ReindexPolicy::Rebuild,
            ),
        };

        let indexer = Indexer::new(embeddings.clone(), store.clone());
        match indexer.reindex(catalog.as_ref(), policy).await {
            Ok(count) => tracing::info!("Index ready with {} causes", count),
            Err(err) => {
                tracing::warn!("Reindex failed, serving previous index state: {}", err);
            }
        }

        let chatbot = Chatbot::new(
            embeddings,
            generator,
            store.clone(),
            config.retrieval_top_n,
        );

        Ok(Arc::new(AppState {
            paths,
            catalog_name: catalog.name().to_string(),
            config,
            store,
            chatbot,
        }))
    }
}
