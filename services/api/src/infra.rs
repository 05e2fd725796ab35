use chrono::Utc;
use metrics_exporter_prometheus::PrometheusHandle;
use schoolmatch::funnel::candidates::{
    CandidateRecord, CandidateRepository, CandidateUpdate, Email, Mentor, MentorDirectory,
    MentorId, RepositoryError,
};
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Candidate table held in process memory. `store` enforces the version
/// compare-and-swap the service relies on for its read-modify-write cycles.
#[derive(Default, Clone)]
pub(crate) struct InMemoryCandidateRepository {
    records: Arc<Mutex<HashMap<Email, CandidateRecord>>>,
}

impl CandidateRepository for InMemoryCandidateRepository {
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
pub(crate) struct InMemoryMentorDirectory {
    mentors: Arc<Mutex<Vec<Mentor>>>,
}

impl InMemoryMentorDirectory {
    pub(crate) fn with_mentors(mentors: Vec<Mentor>) -> Self {
        Self {
            mentors: Arc::new(Mutex::new(mentors)),
        }
    }
}

impl MentorDirectory for InMemoryMentorDirectory {
    fn list(&self) -> Result<Vec<Mentor>, RepositoryError> {
        Ok(self.mentors.lock().expect("directory mutex poisoned").clone())
    }
}

/// Starter roster used when no CSV export is configured.
pub(crate) fn seed_roster() -> Vec<Mentor> {
    vec![
        Mentor {
            id: MentorId(1),
            name: "Nora Benali".to_string(),
            tags: vec!["Finance shark".to_string(), "Data Detective".to_string()],
        },
        Mentor {
            id: MentorId(2),
            name: "Sacha Lindqvist".to_string(),
            tags: vec!["Growth Hacker".to_string()],
        },
        Mentor {
            id: MentorId(3),
            name: "Mina Okafor".to_string(),
            tags: vec!["Tech builder".to_string(), "Visionnary Founder".to_string()],
        },
        Mentor {
            id: MentorId(4),
            name: "Jules Marchand".to_string(),
            tags: vec!["Creative Alchemist".to_string()],
        },
    ]
}
