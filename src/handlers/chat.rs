use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};

use crate::auth::middleware::AuthUser;
use crate::error::{AppError, AppResult};
use crate::services::chat::{self, ChatMessage};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
    pub source: String, // "claude" or "fallback"
}

/// Pass-through to the hosted chat model. The fixed safety preamble is
/// applied server-side; a failed call degrades to the canned
/// support-resources reply rather than an error.
pub async fn send_chat(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<ChatRequest>,
) -> AppResult<Json<ChatResponse>> {
    if body.messages.is_empty() {
        return Err(AppError::Validation("At least one message is required".into()));
    }
    if body
        .messages
        .iter()
        .any(|m| m.role != "user" && m.role != "assistant")
    {
        return Err(AppError::Validation(
            "Message roles must be 'user' or 'assistant'".into(),
        ));
    }

    match chat::complete(&state.config, &body.messages).await {
        Ok(reply) => Ok(Json(ChatResponse {
            reply,
            source: "claude".into(),
        })),
        Err(e) => {
            tracing::warn!(user_id = %auth_user.id, error = %e, "chat completion failed, sending fallback");
            Ok(Json(ChatResponse {
                reply: chat::FALLBACK_MESSAGE.into(),
                source: "fallback".into(),
            }))
        }
    }
}
