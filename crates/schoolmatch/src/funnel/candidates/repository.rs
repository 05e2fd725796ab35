use serde::{Deserialize, Serialize};

use super::domain::{CandidateRecord, Email, Mentor};

/// Identity fields merged into a candidate row on upsert. `None` leaves the
/// stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub class: Option<String>,
}

/// Storage abstraction over the hosted candidate table.
///
/// Tag fields are read, rewritten wholesale, and stored back, so `store` is a
/// compare-and-swap: implementations must reject a record whose `version` no
/// longer matches the stored row and bump the version on success. The core
/// never retries on failure; that belongs to the collaborator wrapper.
pub trait CandidateRepository: Send + Sync {
    fn fetch(&self, email: &Email) -> Result<Option<CandidateRecord>, RepositoryError>;
    /// Create the row if absent, else merge the provided fields. `created_at`
    /// of an existing row is preserved.
    fn upsert(&self, email: &Email, update: CandidateUpdate)
        -> Result<CandidateRecord, RepositoryError>;
    /// Replace the stored row if `record.version` still matches; returns the
    /// stored copy with the bumped version.
    fn store(&self, record: CandidateRecord) -> Result<CandidateRecord, RepositoryError>;
    fn all(&self) -> Result<Vec<CandidateRecord>, RepositoryError>;
}

/// Read-side contract for the mentor roster. Order is whatever the roster
/// source defines; no sorting is imposed here.
pub trait MentorDirectory: Send + Sync {
    fn list(&self) -> Result<Vec<Mentor>, RepositoryError>;
}

/// Error enumeration for storage failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("candidate not found")]
    NotFound,
    #[error("stale candidate version (expected {expected}, found {found})")]
    VersionConflict { expected: u64, found: u64 },
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}
