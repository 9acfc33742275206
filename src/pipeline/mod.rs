//! RAG pipeline: retrieve → compose → generate → parse intent.
//!
//! `Chatbot` is the single entry point the transport layer calls. Its
//! output is always a well-formed `ChatAnswer`; provider failures become a
//! user-facing apology, never a transport error.

pub mod intent;
pub mod prompt;
mod retriever;

use std::sync::Arc;

use serde::Serialize;

use crate::core::errors::PipelineError;
use crate::index::VectorStore;
use crate::providers::{EmbeddingProvider, TextGenerator};

use intent::IntentSignal;
pub use retriever::Retriever;

/// Canned reply when the index holds no causes.
pub const EMPTY_INDEX_MESSAGE: &str = "Lo siento, la base de conocimiento está vacía. \
     Debes indexar los datos primero (revisa la cuota de la API).";

/// Generic donation page the front end routes to on a confirmed intent.
const DONATIONS_URL: &str = "/donaciones";
const DETAILS_BUTTON_TEXT: &str = "Ver más detalles";

/// Action hint for the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatAction {
    None,
    OfferDonation,
    OfferDetails,
}

/// The sole output crossing the pipeline boundary.
#[derive(Debug, Clone, Serialize)]
pub struct ChatAnswer {
    pub text: String,
    pub action: ChatAction,
    pub url: String,
    pub button_text: String,
}

impl ChatAnswer {
    fn plain(text: String) -> Self {
        ChatAnswer {
            text,
            action: ChatAction::None,
            url: String::new(),
            button_text: String::new(),
        }
    }
}

/// Orchestrates one query through the full pipeline.
pub struct Chatbot {
    retriever: Retriever,
    generator: Arc<dyn TextGenerator>,
    top_n: usize,
}

impl Chatbot {
    pub fn new(
        embeddings: Arc<dyn EmbeddingProvider>,
        generator: Arc<dyn TextGenerator>,
        store: Arc<dyn VectorStore>,
        top_n: usize,
    ) -> Self {
        Chatbot {
            retriever: Retriever::new(embeddings, store),
            generator,
            top_n,
        }
    }

    /// Answer one user query. Total: every failure path resolves to a valid
    /// `ChatAnswer` with `action = none`.
    pub async fn answer(&self, query: &str) -> ChatAnswer {
        match self.run(query).await {
            Ok(answer) => answer,
            Err(PipelineError::IndexEmpty) => ChatAnswer::plain(EMPTY_INDEX_MESSAGE.to_string()),
            Err(err) => {
                tracing::warn!("Pipeline error for query: {}", err);
                ChatAnswer::plain(format!(
                    "Lo siento, hubo un error al procesar tu solicitud: {}. \
                     Podría ser un límite de cuota o un error de conexión.",
                    err
                ))
            }
        }
    }

    async fn run(&self, query: &str) -> Result<ChatAnswer, PipelineError> {
        let hits = self.retriever.search(query, self.top_n).await?;
        if hits.is_empty() {
            return Err(PipelineError::IndexEmpty);
        }

        let prompt = prompt::compose(query, &hits);
        let raw = self.generator.generate(&prompt).await?;
        let (text, signal) = intent::parse(&raw);

        Ok(match signal {
            IntentSignal::None => ChatAnswer::plain(text),
            IntentSignal::ConfirmDonate => ChatAnswer {
                text,
                action: ChatAction::OfferDonation,
                url: DONATIONS_URL.to_string(),
                button_text: String::new(),
            },
            IntentSignal::ShowDetails { url } => ChatAnswer {
                text,
                action: ChatAction::OfferDetails,
                url,
                button_text: DETAILS_BUTTON_TEXT.to_string(),
            },
        })
    }
}
