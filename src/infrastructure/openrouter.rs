use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::ChatSettings;
use crate::domain::chat::ChatMessage;
use crate::domain::errors::DomainError;
use crate::domain::ports::ChatGateway;

const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 500;

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// Chat-completions client for OpenRouter (or any OpenAI-compatible endpoint).
///
/// Every call is bounded by the configured timeout and is never retried.
pub struct OpenRouterClient {
    client: Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl OpenRouterClient {
    pub fn new(settings: &ChatSettings) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| DomainError::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_url: settings.api_url.clone(),
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
        })
    }
}

#[async_trait]
impl ChatGateway for OpenRouterClient {
    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String, DomainError> {
        let body = CompletionRequest {
            model: &self.model,
            messages: &messages,
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let resp = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| DomainError::Upstream(format!("request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let detail = resp.text().await.unwrap_or_default();
            return Err(DomainError::Upstream(format!(
                "service returned {status}: {detail}"
            )));
        }

        let parsed: CompletionResponse = resp
            .json()
            .await
            .map_err(|e| DomainError::Upstream(format!("malformed response: {e}")))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| DomainError::Upstream("invalid response: no choices".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;

    fn client_for(server: &MockServer, timeout: Duration) -> OpenRouterClient {
        OpenRouterClient::new(&ChatSettings {
            api_url: server.url("/api/v1/chat/completions"),
            api_key: "test-key".to_string(),
            model: "openai/gpt-3.5-turbo".to_string(),
            timeout,
        })
        .expect("client should build")
    }

    fn messages() -> Vec<ChatMessage> {
        vec![
            ChatMessage::system("You sell phones."),
            ChatMessage::user("Any phone under 10k?"),
        ]
    }

    #[tokio::test]
    async fn returns_first_choice_content() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/v1/chat/completions")
                    .header("authorization", "Bearer test-key")
                    .json_body_partial(
                        json!({
                            "model": "openai/gpt-3.5-turbo",
                            "messages": [
                                {"role": "system", "content": "You sell phones."},
                                {"role": "user", "content": "Any phone under 10k?"}
                            ],
                            "max_tokens": 500
                        })
                        .to_string(),
                    );
                then.status(200).json_body(json!({
                    "choices": [
                        {"message": {"role": "assistant", "content": "Try the Redmi 13."}}
                    ]
                }));
            })
            .await;

        let reply = client_for(&server, Duration::from_secs(5))
            .complete(messages())
            .await
            .expect("completion should succeed");

        mock.assert_async().await;
        assert_eq!(reply, "Try the Redmi 13.");
    }

    #[tokio::test]
    async fn empty_choices_is_upstream_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(200).json_body(json!({ "choices": [] }));
            })
            .await;

        let err = client_for(&server, Duration::from_secs(5))
            .complete(messages())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Upstream(msg) if msg.contains("no choices")));
    }

    #[tokio::test]
    async fn error_status_is_upstream_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(401).body("invalid api key");
            })
            .await;

        let err = client_for(&server, Duration::from_secs(5))
            .complete(messages())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Upstream(msg) if msg.contains("401")));
    }

    #[tokio::test]
    async fn non_json_body_is_upstream_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(200).body("<html>gateway</html>");
            })
            .await;

        let err = client_for(&server, Duration::from_secs(5))
            .complete(messages())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Upstream(msg) if msg.contains("malformed")));
    }

    #[tokio::test]
    async fn slow_upstream_times_out() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(200)
                    .delay(Duration::from_millis(500))
                    .json_body(json!({ "choices": [] }));
            })
            .await;

        let err = client_for(&server, Duration::from_millis(100))
            .complete(messages())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Upstream(msg) if msg.contains("request failed")));
    }
}
