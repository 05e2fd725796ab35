//! The quiz funnel: question lookup tables plus the candidate pipeline built
//! on top of them.

pub mod candidates;
pub mod quizzes;
