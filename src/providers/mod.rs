//! External model providers.
//!
//! Both the embedding model and the generative model are opaque HTTP
//! services; the traits here are the only seams the pipeline knows about.

mod gemini;

use async_trait::async_trait;

use crate::core::errors::PipelineError;

pub use gemini::GeminiClient;

/// Converts text to a fixed-length vector. Dimensionality is fixed per
/// deployment by the configured embedding model.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, PipelineError>;
}

/// Produces free text from a composed prompt.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, PipelineError>;
}
