//! Prompt Templates
//!
//! Pure mapping from a tutoring mode to the system/user prompt pair sent
//! downstream. Each mode fixes persona, tone, and output shape; the topic
//! and grade band are interpolated into the templates.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TutorError;
use crate::message::Message;

/// Grade band used when a request does not specify one
pub const DEFAULT_GRADE_BAND: &str = "elementary and middle school students";

/// What kind of help the AI study helper should produce
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TutorMode {
    /// Explain a concept in plain language
    Explain,
    /// Generate practice problems with an answer key
    Practice,
    /// Generate a short multiple-choice quiz
    Quiz,
}

impl TutorMode {
    /// All accepted mode names, in the order error messages list them
    pub const ALL: [&'static str; 3] = ["explain", "practice", "quiz"];
}

impl FromStr for TutorMode {
    type Err = TutorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "explain" => Ok(TutorMode::Explain),
            "practice" => Ok(TutorMode::Practice),
            "quiz" => Ok(TutorMode::Quiz),
            other => Err(TutorError::InvalidMode(other.to_string())),
        }
    }
}

impl std::fmt::Display for TutorMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TutorMode::Explain => write!(f, "explain"),
            TutorMode::Practice => write!(f, "practice"),
            TutorMode::Quiz => write!(f, "quiz"),
        }
    }
}

/// System and user prompt pair for one gateway call
#[derive(Clone, Debug)]
pub struct PromptPair {
    /// Persona and output-shape instructions
    pub system: String,

    /// The templated user request
    pub user: String,
}

impl PromptPair {
    /// Build the two-message array the gateway expects
    pub fn to_messages(&self) -> Vec<Message> {
        vec![
            Message::system(self.system.clone()),
            Message::user(self.user.clone()),
        ]
    }
}

/// Build the prompt pair for a mode, topic, and grade band
pub fn build_prompt(mode: TutorMode, topic: &str, grade_band: &str) -> PromptPair {
    match mode {
        TutorMode::Explain => PromptPair {
            system: format!(
                "You are Sparky, a friendly and patient tutor for {grade_band}. \
                 Explain concepts in simple, encouraging language with one concrete \
                 everyday example. Keep the explanation under 150 words and end with \
                 a short question that checks understanding."
            ),
            user: format!("Explain {topic} in a way that's easy to understand."),
        },
        TutorMode::Practice => PromptPair {
            system: format!(
                "You are Sparky, a friendly and patient tutor for {grade_band}. \
                 Create exactly 3 practice problems on the requested topic, ordered \
                 from easiest to hardest. After the problems, include an answer key \
                 with a one-sentence explanation for each answer."
            ),
            user: format!("Create practice problems about {topic}."),
        },
        TutorMode::Quiz => PromptPair {
            system: format!(
                "You are Sparky, a friendly and patient tutor for {grade_band}. \
                 Write a 5-question multiple-choice quiz on the requested topic. \
                 Each question has options A through D with exactly one correct \
                 answer. Put the full answer key at the end."
            ),
            user: format!("Make a quiz about {topic}."),
        },
    }
}
