//! Domain Models
//!
//! Core data types for the question-of-the-day feature. Wire-facing types
//! serialize camelCase to match the single-page app that consumes them.

use serde::{Deserialize, Serialize};

/// Subject a question belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subject {
    Math,
    Science,
    English,
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Subject::Math => write!(f, "math"),
            Subject::Science => write!(f, "science"),
            Subject::English => write!(f, "english"),
        }
    }
}

/// A multiple-choice question
///
/// Immutable once constructed. `correct_index` always indexes `options`,
/// and generators guarantee the four option values are pairwise distinct.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Stable identifier ("math-arith-812", "sci-photosynthesis", ...)
    pub id: String,

    /// The question text shown to the student
    pub text: String,

    /// Exactly four answer options, display order
    pub options: [String; 4],

    /// Index of the correct option, in [0, 3]
    pub correct_index: usize,

    /// Nudge shown on request before answering
    pub hint: String,

    /// Shown after answering
    pub fun_fact: String,

    /// Subject bucket
    pub subject: Subject,
}

impl Question {
    /// The correct option's display value
    pub fn correct_option(&self) -> &str {
        &self.options[self.correct_index]
    }

    /// Grade an answer by option index
    pub fn is_correct(&self, answered_index: usize) -> bool {
        answered_index == self.correct_index
    }
}

/// The persisted record of today's answer
///
/// Singleton: exactly one record exists at a time, overwritten wholesale on
/// each answer. The stored date's equality with "today" is the sole
/// validity gate; no record survives a day boundary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
    /// Calendar day the answer was given, ISO "YYYY-MM-DD"
    pub date: String,

    /// Id of the question that was answered
    pub question_id: String,

    /// Option index the student picked
    pub answered_index: usize,

    /// Whether the pick matched `correct_index`
    pub is_correct: bool,
}

impl AnswerRecord {
    /// Build a record by grading `answered_index` against `question`
    pub fn new(date: impl Into<String>, question: &Question, answered_index: usize) -> Self {
        Self {
            date: date.into(),
            question_id: question.id.clone(),
            answered_index,
            is_correct: question.is_correct(answered_index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_question() -> Question {
        Question {
            id: "sci-test".into(),
            text: "Which gas do plants absorb?".into(),
            options: [
                "Oxygen".into(),
                "Carbon dioxide".into(),
                "Nitrogen".into(),
                "Helium".into(),
            ],
            correct_index: 1,
            hint: "You breathe it out.".into(),
            fun_fact: "Plants turn it into sugar.".into(),
            subject: Subject::Science,
        }
    }

    #[test]
    fn test_grading() {
        let q = sample_question();
        assert!(q.is_correct(1));
        assert!(!q.is_correct(0));
        assert_eq!(q.correct_option(), "Carbon dioxide");
    }

    #[test]
    fn test_record_from_answer() {
        let q = sample_question();
        let record = AnswerRecord::new("2026-08-06", &q, 3);
        assert_eq!(record.question_id, "sci-test");
        assert!(!record.is_correct);
    }

    #[test]
    fn test_wire_casing() {
        let q = sample_question();
        let json = serde_json::to_string(&q).unwrap();
        assert!(json.contains("correctIndex"));
        assert!(json.contains("funFact"));
    }
}
