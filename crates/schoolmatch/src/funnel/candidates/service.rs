use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::aggregation::{self, AggregationError};
use super::domain::{
    BackgroundForm, CandidateRecord, Email, MentorId, RegistrationForm, MAX_TAGS,
};
use super::matching::{match_mentor, MatchStrategy};
use super::repository::{CandidateRepository, CandidateUpdate, MentorDirectory, RepositoryError};
use super::scoring::{ScoreCard, ScoringEngine, ScoringWeights};
use crate::funnel::quizzes::QuizId;

/// Service composing the aggregator, scorer, and matcher over the storage
/// collaborators. All pipeline writes go through here so the read-modify-write
/// of tag fields stays behind the repository's compare-and-swap.
pub struct FunnelService<R, M> {
    repository: Arc<R>,
    directory: Arc<M>,
    engine: ScoringEngine,
    strategy: MatchStrategy,
}

impl<R, M> FunnelService<R, M>
where
    R: CandidateRepository + 'static,
    M: MentorDirectory + 'static,
{
    pub fn new(
        repository: Arc<R>,
        directory: Arc<M>,
        weights: ScoringWeights,
        strategy: MatchStrategy,
    ) -> Self {
        Self {
            repository,
            directory,
            engine: ScoringEngine::new(weights),
            strategy,
        }
    }

    /// Login upsert: create the candidate row or refresh its identity fields.
    pub fn register(&self, form: RegistrationForm) -> Result<CandidateRecord, FunnelServiceError> {
        let RegistrationForm {
            email,
            first_name,
            last_name,
            class,
        } = form;

        let record = self.repository.upsert(
            &email,
            CandidateUpdate {
                first_name,
                last_name,
                class,
            },
        )?;
        Ok(record)
    }

    /// Persist a blue-quiz answer sheet: aggregate tags, recompute the
    /// dominant tag, and re-run mentor matching.
    ///
    /// With `replace` unset, new tags are appended to the existing ones and
    /// the combined list capped at three. An unreachable roster downgrades to
    /// "no match" without failing the tag write.
    pub fn record_persona_round(
        &self,
        email: &Email,
        answers: &BTreeMap<u8, String>,
        replace: bool,
    ) -> Result<CandidateRecord, FunnelServiceError> {
        let tags = aggregation::aggregate(QuizId::Blue, answers)?;

        let mut record = self.repository.upsert(email, CandidateUpdate::default())?;

        let mut merged = if replace {
            Vec::new()
        } else {
            record.persona_tags.clone()
        };
        merged.extend(tags);
        merged.truncate(MAX_TAGS);

        record.dominant_persona_tag = aggregation::dominant_tag(&merged);
        record.matched_mentor_id = self.rematch(&merged);
        record.persona_tags = merged;

        let stored = self.repository.store(record)?;
        Ok(stored)
    }

    /// Persist a green-quiz answer sheet. Tech tags are always rewritten
    /// wholesale and never trigger a mentor rematch.
    pub fn record_tech_round(
        &self,
        email: &Email,
        answers: &BTreeMap<u8, String>,
    ) -> Result<CandidateRecord, FunnelServiceError> {
        let tags = aggregation::aggregate(QuizId::Green, answers)?;

        let mut record = self.repository.upsert(email, CandidateUpdate::default())?;
        record.tech_affinity_tags = tags;
        record.tech_affinity_tags.truncate(MAX_TAGS);

        let stored = self.repository.store(record)?;
        Ok(stored)
    }

    /// Direct writes from the red screen; absent fields stay untouched.
    pub fn record_background(
        &self,
        email: &Email,
        form: BackgroundForm,
    ) -> Result<CandidateRecord, FunnelServiceError> {
        let mut record = self.repository.upsert(email, CandidateUpdate::default())?;

        if let Some(sector) = form.interest_sector {
            record.interest_sector = Some(sector);
        }
        if let Some(project) = form.proud_project {
            record.proud_project = Some(project);
        }
        if let Some(hobbies) = form.hobbies {
            record.hobbies = Some(hobbies);
        }
        if let Some(level) = form.english_level {
            record.english_level = Some(level);
        }

        let stored = self.repository.store(record)?;
        Ok(stored)
    }

    /// Compute the score card for the results view and persist the
    /// recommendation back onto the row.
    pub fn results(&self, email: &Email) -> Result<ResultsSnapshot, FunnelServiceError> {
        let mut record = self
            .repository
            .fetch(email)?
            .ok_or(RepositoryError::NotFound)?;

        let card = self.engine.score(&record);

        if record.recommended_school != Some(card.recommended) {
            record.recommended_school = Some(card.recommended);
            record = self.repository.store(record)?;
        }

        Ok(ResultsSnapshot {
            matched_mentor_id: record.matched_mentor_id,
            card,
        })
    }

    /// Re-associate every candidate with a mentor, e.g. after a roster edit.
    pub fn rematch_all(&self) -> Result<RematchSummary, FunnelServiceError> {
        let candidates = self.repository.all()?;
        let mentors = self.directory.list()?;

        let mut summary = RematchSummary {
            total: candidates.len(),
            ..RematchSummary::default()
        };

        for mut record in candidates {
            let matched = match_mentor(&record.persona_tags, &mentors, self.strategy);
            match matched {
                Some(_) => summary.matched += 1,
                None => summary.unmatched += 1,
            }

            if record.matched_mentor_id == matched {
                continue;
            }
            record.matched_mentor_id = matched;
            match self.repository.store(record) {
                Ok(_) => summary.updated += 1,
                Err(err) => {
                    // A concurrent quiz write wins; the next rematch catches up.
                    warn!(error = %err, "skipping candidate during batch rematch");
                }
            }
        }

        Ok(summary)
    }

    fn rematch(&self, persona_tags: &[String]) -> Option<MentorId> {
        match self.directory.list() {
            Ok(mentors) => match_mentor(persona_tags, &mentors, self.strategy),
            Err(err) => {
                warn!(error = %err, "mentor roster unavailable, leaving candidate unmatched");
                None
            }
        }
    }
}

/// Score card plus the mentor association current at results time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultsSnapshot {
    pub card: ScoreCard,
    pub matched_mentor_id: Option<MentorId>,
}

/// Outcome counters for a batch rematch run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RematchSummary {
    pub total: usize,
    pub matched: usize,
    pub unmatched: usize,
    pub updated: usize,
}

/// Error raised by the funnel service.
#[derive(Debug, thiserror::Error)]
pub enum FunnelServiceError {
    #[error(transparent)]
    NothingToSave(#[from] AggregationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
