use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::core::errors::ApiError;
use crate::pipeline::ChatAction;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub prompt: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub respuesta: String,
    pub action: ChatAction,
    pub url: String,
    pub button_text: String,
}

/// `POST /api/chat` — run one query through the RAG pipeline.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let prompt = req.prompt.trim();
    if prompt.is_empty() {
        return Err(ApiError::BadRequest(
            "Error: Se requiere el campo 'prompt'.".to_string(),
        ));
    }

    let answer = state.chatbot.answer(prompt).await;

    Ok(Json(ChatResponse {
        respuesta: answer.text,
        action: answer.action,
        url: answer.url,
        button_text: answer.button_text,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_serializes_with_wire_field_names() {
        let response = ChatResponse {
            respuesta: "Hola".to_string(),
            action: ChatAction::OfferDetails,
            url: "/iniciativa/103".to_string(),
            button_text: "Ver más detalles".to_string(),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["respuesta"], "Hola");
        assert_eq!(json["action"], "offer_details");
        assert_eq!(json["url"], "/iniciativa/103");
        assert_eq!(json["button_text"], "Ver más detalles");
    }

    #[test]
    fn action_variants_serialize_snake_case() {
        assert_eq!(
            serde_json::to_value(ChatAction::None).unwrap(),
            serde_json::json!("none")
        );
        assert_eq!(
            serde_json::to_value(ChatAction::OfferDonation).unwrap(),
            serde_json::json!("offer_donation")
        );
    }

    #[test]
    fn missing_prompt_field_defaults_to_empty() {
        let req: ChatRequest = serde_json::from_str("{}").unwrap();
        assert!(req.prompt.is_empty());
    }
}
