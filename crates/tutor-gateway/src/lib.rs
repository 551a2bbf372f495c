//! # tutor-gateway
//!
//! Concrete `ChatGateway` implementations for the tutoring backend.
//!
//! ## Gateways
//!
//! - **OpenAI-compatible** (default): any hosted chat-completions API
//!   that speaks the `/chat/completions` wire format
//! - **Mock**: scripted replies and failures for tests
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tutor_gateway::OpenAiGateway;
//!
//! let gateway = OpenAiGateway::from_env();
//! let reply = gateway.complete(&messages).await?;
//! ```

pub mod mock;
pub mod openai;

pub use mock::{MockFailure, MockGateway};
pub use openai::{GatewayConfig, OpenAiGateway};

// Re-export core types for convenience
pub use tutor_core::{ChatGateway, EventStream, Message, Result, Role, TutorError};
