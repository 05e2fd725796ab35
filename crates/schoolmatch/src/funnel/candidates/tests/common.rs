use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::Utc;
use serde_json::Value;

use crate::funnel::candidates::domain::{CandidateRecord, Email, Mentor, MentorId};
use crate::funnel::candidates::matching::MatchStrategy;
use crate::funnel::candidates::repository::{
    CandidateRepository, CandidateUpdate, MentorDirectory, RepositoryError,
};
use crate::funnel::candidates::router::funnel_router;
use crate::funnel::candidates::scoring::ScoringWeights;
use crate::funnel::candidates::service::FunnelService;

pub(super) fn email() -> Email {
    Email::new("ada@example.com")
}

pub(super) fn answers(pairs: &[(u8, &str)]) -> BTreeMap<u8, String> {
    pairs
        .iter()
        .map(|(question, label)| (*question, label.to_string()))
        .collect()
}

pub(super) fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

pub(super) fn roster() -> Vec<Mentor> {
    vec![
        Mentor {
            id: MentorId(1),
            name: "Nadia".to_string(),
            tags: tags(&["Finance shark"]),
        },
        Mentor {
            id: MentorId(2),
            name: "Karim".to_string(),
            tags: tags(&["Tech builder", "Growth Hacker"]),
        },
        Mentor {
            id: MentorId(3),
            name: "Lucie".to_string(),
            tags: tags(&["Growth Hacker", "Data Detective", "Creative Alchemist"]),
        },
    ]
}

pub(super) fn build_service() -> (
    FunnelService<MemoryRepository, MemoryDirectory>,
    Arc<MemoryRepository>,
    Arc<MemoryDirectory>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let directory = Arc::new(MemoryDirectory::with_mentors(roster()));
    let service = FunnelService::new(
        repository.clone(),
        directory.clone(),
        ScoringWeights::default(),
        MatchStrategy::FirstOverlap,
    );
    (service, repository, directory)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<Email, CandidateRecord>>>,
}

impl MemoryRepository {
    pub(super) fn len(&self) -> usize {
        self.records.lock().expect("repository mutex poisoned").len()
    }
}

impl CandidateRepository for MemoryRepository {
    fn fetch(&self, email: &Email) -> Result<Option<CandidateRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(email).cloned())
    }

    fn upsert(
        &self,
        email: &Email,
        update: CandidateUpdate,
    ) -> Result<CandidateRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let entry = guard
            .entry(email.clone())
            .or_insert_with(|| CandidateRecord::new(email.clone(), Utc::now()));

        let mut changed = false;
        if let Some(first_name) = update.first_name {
            entry.first_name = Some(first_name);
            changed = true;
        }
        if let Some(last_name) = update.last_name {
            entry.last_name = Some(last_name);
            changed = true;
        }
        if let Some(class) = update.class {
            entry.class = Some(class);
            changed = true;
        }
        if changed {
            entry.version += 1;
        }

        Ok(entry.clone())
    }

    fn store(&self, record: CandidateRecord) -> Result<CandidateRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let Some(stored) = guard.get_mut(&record.email) else {
            return Err(RepositoryError::NotFound);
        };
        if stored.version != record.version {
            return Err(RepositoryError::VersionConflict {
                expected: record.version,
                found: stored.version,
            });
        }

        let mut record = record;
        record.version += 1;
        *stored = record.clone();
        Ok(record)
    }

    fn all(&self) -> Result<Vec<CandidateRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        let mut records: Vec<CandidateRecord> = guard.values().cloned().collect();
        records.sort_by(|a, b| a.email.0.cmp(&b.email.0));
        Ok(records)
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryDirectory {
    mentors: Arc<Mutex<Vec<Mentor>>>,
}

impl MemoryDirectory {
    pub(super) fn with_mentors(mentors: Vec<Mentor>) -> Self {
        Self {
            mentors: Arc::new(Mutex::new(mentors)),
        }
    }

    pub(super) fn replace(&self, mentors: Vec<Mentor>) {
        *self.mentors.lock().expect("directory mutex poisoned") = mentors;
    }
}

impl MentorDirectory for MemoryDirectory {
    fn list(&self) -> Result<Vec<Mentor>, RepositoryError> {
        Ok(self.mentors.lock().expect("directory mutex poisoned").clone())
    }
}

pub(super) struct UnavailableRepository;

impl CandidateRepository for UnavailableRepository {
    fn fetch(&self, _email: &Email) -> Result<Option<CandidateRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn upsert(
        &self,
        _email: &Email,
        _update: CandidateUpdate,
    ) -> Result<CandidateRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn store(&self, _record: CandidateRecord) -> Result<CandidateRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn all(&self) -> Result<Vec<CandidateRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) struct UnavailableDirectory;

impl MentorDirectory for UnavailableDirectory {
    fn list(&self) -> Result<Vec<Mentor>, RepositoryError> {
        Err(RepositoryError::Unavailable("roster offline".to_string()))
    }
}

/// Upserts succeed but every store collides, as if another writer always got
/// there first.
pub(super) struct StaleRepository;

impl CandidateRepository for StaleRepository {
    fn fetch(&self, email: &Email) -> Result<Option<CandidateRecord>, RepositoryError> {
        Ok(Some(CandidateRecord::new(email.clone(), Utc::now())))
    }

    fn upsert(
        &self,
        email: &Email,
        _update: CandidateUpdate,
    ) -> Result<CandidateRecord, RepositoryError> {
        Ok(CandidateRecord::new(email.clone(), Utc::now()))
    }

    fn store(&self, record: CandidateRecord) -> Result<CandidateRecord, RepositoryError> {
        Err(RepositoryError::VersionConflict {
            expected: record.version,
            found: record.version + 1,
        })
    }

    fn all(&self) -> Result<Vec<CandidateRecord>, RepositoryError> {
        Ok(Vec::new())
    }
}

pub(super) fn funnel_router_with_service(
    service: FunnelService<MemoryRepository, MemoryDirectory>,
) -> axum::Router {
    funnel_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
