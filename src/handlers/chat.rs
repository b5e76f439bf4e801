use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::chat::ChatMessage;
use crate::domain::errors::DomainError;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct HistoryEntry {
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default)]
    pub content: String,
}

fn default_role() -> String {
    "user".to_string()
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    /// Prior turns, oldest first; only the last 10 are forwarded
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ChatResponse {
    pub response: String,
    pub success: bool,
}

/// POST /chat
///
/// Forwards the message and recent history to the text-generation service
/// with a system prompt describing the current catalog. Upstream failures are
/// returned as a 500 with a generic apology and the detail in `error`.
#[utoipa::path(
    post,
    path = "/chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Generated reply", body = ChatResponse),
        (status = 400, description = "Empty message"),
        (status = 500, description = "Text-generation service failed"),
    ),
    tag = "chat"
)]
pub async fn chat(
    state: web::Data<AppState>,
    body: web::Json<ChatRequest>,
) -> Result<HttpResponse, AppError> {
    let ChatRequest { message, history } = body.into_inner();
    let history: Vec<ChatMessage> = history
        .into_iter()
        .map(|h| ChatMessage {
            role: h.role,
            content: h.content,
        })
        .collect();

    let chat = state.chat.clone();
    let messages = web::block(move || chat.compose(&message, history))
        .await
        .map_err(|e| AppError::chat(DomainError::Internal(e.to_string())))?
        .map_err(AppError::chat)?;

    let reply = state.chat.reply(messages).await.map_err(AppError::chat)?;

    Ok(HttpResponse::Ok().json(ChatResponse {
        response: reply,
        success: true,
    }))
}
