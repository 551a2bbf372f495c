//! # tutor-quiz
//!
//! Question-of-the-day selection and answer tracking for the tutoring site.
//!
//! One question per calendar day, reproducible across page loads and across
//! visitors with no server-side coordination:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  "Thursday August 6 2026"  ──hash──▶  2146793618             │
//! │                                                              │
//! │  even hash ──▶ mathgen::generate(hash)   (procedural)        │
//! │  odd hash  ──▶ catalog[hash % size]      (fixed sci/eng)     │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The answer record is a singleton gated on the stored date matching
//! today; day rollover or a question-id mismatch discards it. Practice
//! mode draws a fresh random question and never persists anything.

pub mod catalog;
pub mod daily;
pub mod error;
pub mod mathgen;
pub mod model;
pub mod progress;

pub use daily::{practice_question, question_for_date, todays_question};
pub use error::{QuizError, Result};
pub use model::{AnswerRecord, Question, Subject};
pub use progress::{AnswerStore, DailyProgress, FileStore, MemoryStore};
