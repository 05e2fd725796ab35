//! Quiz definitions and the static answer-to-tag lookup tables.
//!
//! Only the blue (persona) and green (tech affinity) quizzes resolve answers
//! through lookup tables. The red screen collects free-form and enum fields and
//! is written directly by the service, so it never appears as a `QuizId`.

pub(crate) mod tables;

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of questions in each tagged quiz.
pub const QUESTIONS_PER_QUIZ: u8 = 3;

/// Identifies one of the two tagged quiz sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizId {
    /// Persona quiz: one shared label table across its three questions.
    Blue,
    /// Tech-affinity quiz: a distinct label table per question.
    Green,
}

impl QuizId {
    pub const fn label(self) -> &'static str {
        match self {
            QuizId::Blue => "blue",
            QuizId::Green => "green",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "blue" => Some(QuizId::Blue),
            "green" => Some(QuizId::Green),
            _ => None,
        }
    }
}

impl fmt::Display for QuizId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Resolve a selected option label to its categorical tag.
///
/// Tables are keyed by `(quiz, question, label)` so the green quiz can keep a
/// different meaning for the same letter across its questions. Returns `None`
/// for unknown questions or labels; callers skip those answers.
pub fn tag_for(quiz: QuizId, question: u8, label: &str) -> Option<&'static str> {
    tables::lookup(quiz, question, label.trim())
}

/// Reverse-map a persona tag to its underlying answer label.
pub(crate) fn persona_label(tag: &str) -> Option<char> {
    tables::persona_label_for(tag.trim())
}

/// Reverse-map a question-1 tech-affinity tag to its underlying answer label.
pub(crate) fn tech_primary_label(tag: &str) -> Option<char> {
    tables::tech_q1_label_for(tag.trim())
}
