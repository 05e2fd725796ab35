//! Candidate pipeline: answer aggregation, compatibility scoring, and mentor
//! matching over a storage-backed candidate record.

pub(crate) mod aggregation;
pub mod domain;
pub(crate) mod matching;
pub mod repository;
pub mod roster;
pub mod router;
pub(crate) mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use aggregation::{aggregate, dominant_tag, AggregationError};
pub use domain::{
    BackgroundForm, CandidateRecord, CandidateView, Email, EnglishLevel, InterestSector, Mentor,
    MentorId, RecommendedSchool, RegistrationForm, MAX_TAGS,
};
pub use matching::{match_mentor, MatchStrategy};
pub use repository::{CandidateRepository, CandidateUpdate, MentorDirectory, RepositoryError};
pub use roster::{unknown_tags, MentorRosterCsv, RosterImportError};
pub use router::funnel_router;
pub use scoring::{ScoreCard, ScoreComponent, ScoreFactor, ScoringEngine, ScoringWeights};
pub use service::{FunnelService, FunnelServiceError, RematchSummary, ResultsSnapshot};
