use crate::domain::chat::{trim_history, ChatMessage};
use crate::domain::errors::DomainError;
use crate::domain::phone::Phone;
use crate::domain::ports::{ChatGateway, PhoneRepository};

use super::prompt::{catalog_context, system_prompt};

#[derive(Clone)]
pub struct ChatService<P, G> {
    catalog: P,
    gateway: G,
}

impl<P: PhoneRepository, G: ChatGateway> ChatService<P, G> {
    pub fn new(catalog: P, gateway: G) -> Self {
        Self { catalog, gateway }
    }

    /// Build the message list sent upstream: system prompt, the last turns
    /// of `history`, then the new user message.
    ///
    /// Reads the catalog, so callers on an async executor should run this on
    /// a blocking thread. A catalog failure degrades the prompt rather than
    /// failing the chat.
    pub fn compose(
        &self,
        message: &str,
        history: Vec<ChatMessage>,
    ) -> Result<Vec<ChatMessage>, DomainError> {
        if message.trim().is_empty() {
            return Err(DomainError::Validation(
                "Please provide a message.".to_string(),
            ));
        }

        let phones: Result<Vec<Phone>, DomainError> = self
            .catalog
            .list_available()
            .map(|phones| phones.into_iter().filter(Phone::is_listed).collect());
        if let Err(e) = &phones {
            log::error!("Could not load catalog for chat prompt: {}", e);
        }
        let context = catalog_context(phones.as_deref());

        let history = trim_history(history);
        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(ChatMessage::system(system_prompt(&context)));
        messages.extend(history);
        messages.push(ChatMessage::user(message));
        Ok(messages)
    }

    pub async fn reply(&self, messages: Vec<ChatMessage>) -> Result<String, DomainError> {
        self.gateway.complete(messages).await.inspect_err(|e| {
            log::error!("Text generation failed: {}", e);
        })
    }
}
