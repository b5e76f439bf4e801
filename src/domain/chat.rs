use serde::{Deserialize, Serialize};

/// Number of prior turns forwarded to the text-generation service.
pub const HISTORY_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Keep only the most recent `HISTORY_LIMIT` entries, oldest first.
pub fn trim_history(history: Vec<ChatMessage>) -> Vec<ChatMessage> {
    let skip = history.len().saturating_sub(HISTORY_LIMIT);
    history.into_iter().skip(skip).collect()
}
