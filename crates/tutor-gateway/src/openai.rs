//! OpenAI-Compatible Gateway
//!
//! Implementation of `ChatGateway` against a hosted chat-completions API.
//! One POST per call; the streaming variant hands back the raw response
//! body so the server can relay it without buffering.

use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use tutor_core::{
    error::{Result, TutorError},
    gateway::{ChatGateway, EventStream},
    message::Message,
};

/// Gateway configuration
#[derive(Clone, Debug)]
pub struct GatewayConfig {
    /// API base URL (".../v1")
    pub base_url: String,

    /// Bearer credential. Absence is not a startup error; requests fail
    /// individually with a logged 500.
    pub api_key: Option<String>,

    /// Model identifier sent with every request
    pub model: String,

    /// Timeout for buffered completions, in seconds. Streaming calls only
    /// get the connect timeout so long relays are not cut off.
    pub timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".into(),
            api_key: None,
            model: "gpt-4o-mini".into(),
            timeout_secs: 60,
        }
    }
}

impl GatewayConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var("AI_GATEWAY_URL").unwrap_or(defaults.base_url),
            api_key: std::env::var("AI_GATEWAY_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            model: std::env::var("AI_GATEWAY_MODEL").unwrap_or(defaults.model),
            timeout_secs: std::env::var("AI_GATEWAY_TIMEOUT_SECS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(defaults.timeout_secs),
        }
    }
}

/// Chat-completion request wire format
#[derive(Serialize)]
struct WireRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage>,
    stream: bool,
}

#[derive(Serialize)]
struct WireMessage {
    role: String,
    content: String,
}

/// Buffered chat-completion response wire format
#[derive(Deserialize)]
struct WireResponse {
    #[serde(default)]
    choices: Vec<WireChoice>,
}

#[derive(Deserialize)]
struct WireChoice {
    message: WireChoiceMessage,
}

#[derive(Deserialize)]
struct WireChoiceMessage {
    content: Option<String>,
}

/// OpenAI-compatible gateway client
pub struct OpenAiGateway {
    client: reqwest::Client,
    config: GatewayConfig,
}

impl OpenAiGateway {
    /// Create from configuration
    pub fn from_config(config: GatewayConfig) -> Self {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();

        Self { client, config }
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_config(GatewayConfig::from_env())
    }

    /// Whether a credential is configured
    pub fn has_credential(&self) -> bool {
        self.config.api_key.is_some()
    }

    fn to_wire(messages: &[Message]) -> Vec<WireMessage> {
        messages
            .iter()
            .map(|m| WireMessage {
                role: m.role.to_string(),
                content: m.content.clone(),
            })
            .collect()
    }

    /// POST to the chat-completions endpoint and map upstream statuses.
    ///
    /// 429 and 402 keep their meaning for the caller; every other
    /// non-success status collapses to `GatewayUnavailable`.
    async fn send(&self, messages: &[Message], stream: bool) -> Result<reqwest::Response> {
        let api_key = self.config.api_key.as_deref().ok_or_else(|| {
            TutorError::MissingCredential("AI_GATEWAY_API_KEY is not set".into())
        })?;

        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );
        let body = WireRequest {
            model: &self.config.model,
            messages: Self::to_wire(messages),
            stream,
        };

        let mut request = self.client.post(&url).bearer_auth(api_key).json(&body);
        if !stream {
            request = request.timeout(Duration::from_secs(self.config.timeout_secs));
        }

        let response = request
            .send()
            .await
            .map_err(|e| TutorError::Gateway(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else if status == StatusCode::TOO_MANY_REQUESTS {
            Err(TutorError::RateLimited(format!("upstream rate limit ({url})")))
        } else if status == StatusCode::PAYMENT_REQUIRED {
            Err(TutorError::QuotaExhausted(format!(
                "upstream quota exhausted ({url})"
            )))
        } else {
            Err(TutorError::GatewayUnavailable(format!(
                "upstream status {status}"
            )))
        }
    }
}

#[async_trait]
impl ChatGateway for OpenAiGateway {
    async fn health_check(&self) -> Result<bool> {
        let Some(api_key) = self.config.api_key.as_deref() else {
            return Ok(false);
        };

        let url = format!("{}/models", self.config.base_url.trim_end_matches('/'));
        match self.client.get(&url).bearer_auth(api_key).send().await {
            Ok(response) => Ok(response.status().is_success()),
            Err(e) => {
                tracing::warn!("Gateway health check failed: {}", e);
                Ok(false)
            }
        }
    }

    async fn complete(&self, messages: &[Message]) -> Result<String> {
        let response = self.send(messages, false).await?;
        let body: WireResponse = response
            .json()
            .await
            .map_err(|e| TutorError::Gateway(e.to_string()))?;

        body.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|content| !content.is_empty())
            .ok_or(TutorError::EmptyCompletion)
    }

    async fn complete_stream(&self, messages: &[Message]) -> Result<EventStream> {
        let response = self.send(messages, true).await?;

        let relayed = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(|e| TutorError::Gateway(e.to_string())));

        Ok(Box::pin(relayed))
    }

    fn name(&self) -> &str {
        "openai-compatible"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = GatewayConfig::default();
        assert_eq!(config.base_url, "https://api.openai.com/v1");
        assert!(config.api_key.is_none());
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn test_message_conversion() {
        let messages = vec![Message::system("You are helpful."), Message::user("Hello")];
        let wire = OpenAiGateway::to_wire(&messages);

        assert_eq!(wire.len(), 2);
        assert_eq!(wire[0].role, "system");
        assert_eq!(wire[1].role, "user");
    }

    #[test]
    fn test_response_content_extraction() {
        let raw = r#"{"choices":[{"message":{"role":"assistant","content":"Fractions are parts of a whole."}}]}"#;
        let body: WireResponse = serde_json::from_str(raw).unwrap();
        let content = body.choices.into_iter().next().and_then(|c| c.message.content);
        assert_eq!(content.as_deref(), Some("Fractions are parts of a whole."));
    }

    #[test]
    fn test_response_without_choices() {
        let body: WireResponse = serde_json::from_str("{}").unwrap();
        assert!(body.choices.is_empty());
    }

    #[tokio::test]
    async fn test_missing_credential_fails_per_request() {
        let gateway = OpenAiGateway::from_config(GatewayConfig::default());
        let err = gateway.complete(&[Message::user("hi")]).await.unwrap_err();
        assert!(matches!(err, TutorError::MissingCredential(_)));
    }
}
