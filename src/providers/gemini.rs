use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use super::{EmbeddingProvider, TextGenerator};
use crate::core::errors::PipelineError;

/// Client for the Gemini REST API (`generativelanguage.googleapis.com`).
///
/// One client serves both roles: `embedContent` for the Embedding Adapter
/// and `generateContent` for the Generation Adapter. Each call is
/// single-shot with a bounded timeout; retry policy, if any, belongs to the
/// caller's orchestration layer.
#[derive(Clone)]
pub struct GeminiClient {
    base_url: String,
    api_key: String,
    embedding_model: String,
    chat_model: String,
    client: Client,
}

impl GeminiClient {
    pub fn new(
        base_url: String,
        api_key: String,
        embedding_model: String,
        chat_model: String,
        timeout: Duration,
    ) -> Result<Self, PipelineError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(PipelineError::embedding)?;

        Ok(GeminiClient {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            embedding_model,
            chat_model,
            client,
        })
    }
}

#[async_trait]
impl EmbeddingProvider for GeminiClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, PipelineError> {
        let url = format!(
            "{}/v1beta/models/{}:embedContent",
            self.base_url, self.embedding_model
        );

        let body = json!({
            "content": { "parts": [{ "text": text }] },
        });

        let res = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(PipelineError::embedding)?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(PipelineError::Embedding(format!(
                "embedContent returned {}: {}",
                status, text
            )));
        }

        let payload: Value = res.json().await.map_err(PipelineError::embedding)?;

        let values = payload["embedding"]["values"]
            .as_array()
            .ok_or_else(|| {
                PipelineError::Embedding("embedContent response missing embedding.values".to_string())
            })?
            .iter()
            .filter_map(|v| v.as_f64().map(|f| f as f32))
            .collect::<Vec<f32>>();

        if values.is_empty() {
            return Err(PipelineError::Embedding(
                "embedContent returned an empty vector".to_string(),
            ));
        }

        Ok(values)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, PipelineError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.chat_model
        );

        let body = json!({
            "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
        });

        let res = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(PipelineError::generation)?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(PipelineError::Generation(format!(
                "generateContent returned {}: {}",
                status, text
            )));
        }

        let payload: Value = res.json().await.map_err(PipelineError::generation)?;

        let content = payload["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or_else(|| {
                PipelineError::Generation(
                    "generateContent response missing candidate text".to_string(),
                )
            })?
            .to_string();

        Ok(content)
    }
}
