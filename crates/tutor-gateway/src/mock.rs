//! Mock Gateway
//!
//! For handler tests and demos. Returns a scripted reply or a scripted
//! failure without touching the network.

use async_trait::async_trait;
use bytes::Bytes;

use tutor_core::{
    error::{Result, TutorError},
    gateway::{ChatGateway, EventStream},
    message::Message,
};

/// Which upstream failure the mock should simulate
#[derive(Clone, Copy, Debug)]
pub enum MockFailure {
    /// Upstream 429
    RateLimited,
    /// Upstream 402
    QuotaExhausted,
    /// Any other upstream failure
    Unavailable,
    /// No API key configured
    MissingCredential,
    /// 200 with no completion content
    EmptyCompletion,
}

/// Scripted gateway for tests
pub struct MockGateway {
    reply: String,
    failure: Option<MockFailure>,
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::replying("mock reply")
    }
}

impl MockGateway {
    /// A gateway that answers every completion with `reply`
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            failure: None,
        }
    }

    /// A gateway that fails every completion with `failure`
    pub fn failing(failure: MockFailure) -> Self {
        Self {
            reply: String::new(),
            failure: Some(failure),
        }
    }

    fn check(&self) -> Result<()> {
        match self.failure {
            None => Ok(()),
            Some(MockFailure::RateLimited) => {
                Err(TutorError::RateLimited("mock rate limit".into()))
            }
            Some(MockFailure::QuotaExhausted) => {
                Err(TutorError::QuotaExhausted("mock quota exhausted".into()))
            }
            Some(MockFailure::Unavailable) => {
                Err(TutorError::GatewayUnavailable("mock upstream 500".into()))
            }
            Some(MockFailure::MissingCredential) => {
                Err(TutorError::MissingCredential("mock missing key".into()))
            }
            Some(MockFailure::EmptyCompletion) => Err(TutorError::EmptyCompletion),
        }
    }
}

#[async_trait]
impl ChatGateway for MockGateway {
    async fn health_check(&self) -> Result<bool> {
        Ok(self.failure.is_none())
    }

    async fn complete(&self, _messages: &[Message]) -> Result<String> {
        self.check()?;
        Ok(self.reply.clone())
    }

    async fn complete_stream(&self, _messages: &[Message]) -> Result<EventStream> {
        self.check()?;

        // Shaped like the upstream event stream: data frames, then [DONE].
        let frame = serde_json::json!({
            "choices": [{ "delta": { "content": self.reply } }]
        });
        let body = format!("data: {frame}\n\ndata: [DONE]\n\n");
        let frames: Vec<Result<Bytes>> = vec![Ok(Bytes::from(body))];

        Ok(Box::pin(futures::stream::iter(frames)))
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    #[tokio::test]
    async fn test_mock_replies() {
        let gateway = MockGateway::replying("Photosynthesis is how plants eat sunlight.");
        let reply = gateway.complete(&[Message::user("explain")]).await.unwrap();
        assert!(reply.contains("sunlight"));
    }

    #[tokio::test]
    async fn test_mock_failures() {
        let gateway = MockGateway::failing(MockFailure::RateLimited);
        let err = gateway.complete(&[Message::user("hi")]).await.unwrap_err();
        assert!(matches!(err, TutorError::RateLimited(_)));
        assert!(!gateway.health_check().await.unwrap());
    }

    #[tokio::test]
    async fn test_mock_stream_carries_reply() {
        let gateway = MockGateway::replying("hello");
        let mut stream = gateway.complete_stream(&[Message::user("hi")]).await.unwrap();

        let mut collected = Vec::new();
        while let Some(chunk) = stream.next().await {
            collected.extend_from_slice(&chunk.unwrap());
        }
        let text = String::from_utf8(collected).unwrap();
        assert!(text.contains("hello"));
        assert!(text.ends_with("data: [DONE]\n\n"));
    }
}
