use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde_json::json;
use thiserror::Error;

use crate::domain::errors::DomainError;

pub const CHAT_APOLOGY: &str =
    "Sorry, I encountered an error connecting to the AI service. Please try again.";
pub const CHAT_GENERIC_APOLOGY: &str = "Sorry, something went wrong. Please try again.";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),

    /// Failure on the chat endpoint, which answers in its own envelope.
    #[error("{reply}")]
    Chat {
        status: StatusCode,
        reply: String,
        detail: Option<String>,
    },
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation(msg) => AppError::BadRequest(msg),
            shortfall @ DomainError::InsufficientStock { .. } => {
                AppError::BadRequest(shortfall.to_string())
            }
            DomainError::NotFound(msg) => AppError::NotFound(msg),
            DomainError::Upstream(msg) | DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl AppError {
    /// Unparseable chat request body, answered in the chat envelope.
    pub fn chat_body(detail: String) -> Self {
        AppError::Chat {
            status: StatusCode::BAD_REQUEST,
            reply: CHAT_GENERIC_APOLOGY.to_string(),
            detail: Some(detail),
        }
    }

    /// Map a chat failure to the `{response, success, error}` envelope.
    pub fn chat(e: DomainError) -> Self {
        match e {
            DomainError::Validation(msg) => AppError::Chat {
                status: StatusCode::BAD_REQUEST,
                reply: msg,
                detail: None,
            },
            DomainError::Upstream(detail) => AppError::Chat {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                reply: CHAT_APOLOGY.to_string(),
                detail: Some(detail),
            },
            other => AppError::Chat {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                reply: CHAT_GENERIC_APOLOGY.to_string(),
                detail: Some(other.to_string()),
            },
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Chat { status, .. } => *status,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        match self {
            AppError::BadRequest(msg) | AppError::NotFound(msg) => builder.json(json!({
                "success": false,
                "message": msg
            })),
            AppError::Internal(detail) => {
                log::error!("Request failed: {}", detail);
                builder.json(json!({
                    "success": false,
                    "message": "Internal server error"
                }))
            }
            AppError::Chat { reply, detail, .. } => match detail {
                Some(detail) => builder.json(json!({
                    "response": reply,
                    "success": false,
                    "error": detail
                })),
                None => builder.json(json!({
                    "response": reply,
                    "success": false
                })),
            },
        }
    }
}
