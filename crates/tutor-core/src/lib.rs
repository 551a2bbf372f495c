//! # tutor-core
//!
//! Shared vocabulary for the tutoring-site backend: chat messages, the
//! mode-to-prompt template mapping, and the gateway abstraction.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     tutor-server                             │
//! │  ┌─────────────┐  ┌──────────────┐  ┌─────────────────────┐ │
//! │  │   Prompt    │  │   Messages   │  │   ChatGateway       │ │
//! │  │  Templates  │──│ (sys + user) │──│   (Strategy)        │ │
//! │  └─────────────┘  └──────────────┘  └─────────────────────┘ │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The `ChatGateway` trait enables swapping between hosted gateways (or a
//! mock in tests) without changing server logic.

pub mod error;
pub mod gateway;
pub mod message;
pub mod prompt;

pub use error::{Result, TutorError};
pub use gateway::{ChatGateway, EventStream};
pub use message::{Message, Role};
pub use prompt::{DEFAULT_GRADE_BAND, PromptPair, TutorMode, build_prompt};
