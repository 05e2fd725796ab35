mod rules;
mod weights;

pub use weights::ScoringWeights;

use serde::{Deserialize, Serialize};

use super::domain::{CandidateRecord, Email, RecommendedSchool};

/// Stateless scorer applying the configured weights to a candidate record.
///
/// Scoring is pure: the same record always produces the same percentages, and
/// nothing here touches storage.
pub struct ScoringEngine {
    weights: ScoringWeights,
}

impl ScoringEngine {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn score(&self, record: &CandidateRecord) -> ScoreCard {
        let (components, albert, eugenia) = rules::score_candidate(record, &self.weights);

        let albert_percent = round2(albert);
        let eugenia_percent = round2(eugenia);

        let recommended = if albert_percent > eugenia_percent {
            RecommendedSchool::Albert
        } else if eugenia_percent > albert_percent {
            RecommendedSchool::Eugenia
        } else {
            RecommendedSchool::Tie
        };

        ScoreCard {
            email: record.email.clone(),
            albert_percent,
            eugenia_percent,
            recommended,
            components,
        }
    }
}

// Totals are compared after rounding so display and recommendation agree.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Which answered field produced a contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreFactor {
    PersonaSlot(u8),
    TechAffinity,
    EnglishLevel,
}

/// Discrete contribution to a school total, kept for transparent result pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: ScoreFactor,
    pub albert_points: f64,
    pub eugenia_points: f64,
    pub notes: String,
}

/// Compatibility percentages for both schools. The totals are independent
/// sums; they are not normalized and need not add up to 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreCard {
    pub email: Email,
    pub albert_percent: f64,
    pub eugenia_percent: f64,
    pub recommended: RecommendedSchool,
    pub components: Vec<ScoreComponent>,
}
