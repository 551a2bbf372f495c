//! Chat Gateway Abstraction
//!
//! Defines a common interface over hosted chat-completion gateways so the
//! server can proxy requests without knowing which backend is configured.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tutor_core::gateway::ChatGateway;
//!
//! let reply = gateway.complete(&messages).await?;
//! let stream = gateway.complete_stream(&messages).await?;
//! ```

use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;

use crate::error::Result;
use crate::message::Message;

/// Raw relayed bytes from a streaming completion.
///
/// The proxy forwards the downstream event-stream body unmodified, so the
/// stream item is a byte chunk rather than a parsed delta.
pub type EventStream = Pin<Box<dyn Stream<Item = Result<Bytes>> + Send>>;

/// Strategy trait for chat-completion gateways
///
/// Implement this trait to add support for a new hosted backend.
/// The server works exclusively through this interface.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    /// Check if the gateway is reachable and configured correctly
    async fn health_check(&self) -> Result<bool>;

    /// Buffered completion: returns the first choice's message content
    async fn complete(&self, messages: &[Message]) -> Result<String>;

    /// Streaming completion: returns the downstream body as raw chunks
    async fn complete_stream(&self, messages: &[Message]) -> Result<EventStream>;

    /// Gateway name (for logging and health reporting)
    fn name(&self) -> &str;
}
