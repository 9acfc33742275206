use thiserror::Error;

#[derive(Debug, Error)]
pub enum InitializationError {
    #[error("Failed to initialize vector store: {0}")]
    Store(#[source] anyhow::Error),

    #[error("Failed to initialize model provider: {0}")]
    Provider(#[source] anyhow::Error),

    #[error("Failed to initialize catalog source: {0}")]
    Catalog(#[source] anyhow::Error),
}
