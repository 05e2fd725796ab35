use crate::funnel::quizzes;

use super::super::domain::CandidateRecord;
use super::weights::ScoringWeights;
use super::{ScoreComponent, ScoreFactor};

// Answer labels steering persona points towards Albert; the complement steers
// towards Eugenia. Same idea for the first green question.
const PERSONA_ALBERT_LABELS: &[char] = &['A', 'B', 'C'];
const PERSONA_EUGENIA_LABELS: &[char] = &['D', 'E', 'F'];
const TECH_ALBERT_LABELS: &[char] = &['A', 'B'];
const TECH_EUGENIA_LABELS: &[char] = &['C', 'D'];

pub(crate) fn score_candidate(
    record: &CandidateRecord,
    weights: &ScoringWeights,
) -> (Vec<ScoreComponent>, f64, f64) {
    let mut components = Vec::new();
    let mut albert = 0.0;
    let mut eugenia = 0.0;

    for (slot, tag) in record.persona_tags.iter().enumerate() {
        match quizzes::persona_label(tag) {
            Some(label) if PERSONA_ALBERT_LABELS.contains(&label) => {
                albert += weights.persona_slot_points;
                components.push(ScoreComponent {
                    factor: ScoreFactor::PersonaSlot(slot as u8 + 1),
                    albert_points: weights.persona_slot_points,
                    eugenia_points: 0.0,
                    notes: format!("persona '{tag}' resolves to label {label}"),
                });
            }
            Some(label) if PERSONA_EUGENIA_LABELS.contains(&label) => {
                eugenia += weights.persona_slot_points;
                components.push(ScoreComponent {
                    factor: ScoreFactor::PersonaSlot(slot as u8 + 1),
                    albert_points: 0.0,
                    eugenia_points: weights.persona_slot_points,
                    notes: format!("persona '{tag}' resolves to label {label}"),
                });
            }
            _ => {
                components.push(ScoreComponent {
                    factor: ScoreFactor::PersonaSlot(slot as u8 + 1),
                    albert_points: 0.0,
                    eugenia_points: 0.0,
                    notes: format!("persona '{tag}' has no resolvable label"),
                });
            }
        }
    }

    if let Some(tag) = record.tech_affinity_tags.first() {
        match quizzes::tech_primary_label(tag) {
            Some(label) if TECH_ALBERT_LABELS.contains(&label) => {
                albert += weights.tech_primary_points;
                components.push(ScoreComponent {
                    factor: ScoreFactor::TechAffinity,
                    albert_points: weights.tech_primary_points,
                    eugenia_points: 0.0,
                    notes: format!("tech profile '{tag}' resolves to label {label}"),
                });
            }
            Some(label) if TECH_EUGENIA_LABELS.contains(&label) => {
                eugenia += weights.tech_primary_points;
                components.push(ScoreComponent {
                    factor: ScoreFactor::TechAffinity,
                    albert_points: 0.0,
                    eugenia_points: weights.tech_primary_points,
                    notes: format!("tech profile '{tag}' resolves to label {label}"),
                });
            }
            _ => {
                components.push(ScoreComponent {
                    factor: ScoreFactor::TechAffinity,
                    albert_points: 0.0,
                    eugenia_points: 0.0,
                    notes: format!("tech profile '{tag}' has no resolvable label"),
                });
            }
        }
    }

    if let Some(level) = record.english_level {
        if level.is_high_proficiency() {
            let half = weights.english_points / 2.0;
            albert += half;
            eugenia += half;
            components.push(ScoreComponent {
                factor: ScoreFactor::EnglishLevel,
                albert_points: half,
                eugenia_points: half,
                notes: format!("english level '{}' splits the budget", level.label()),
            });
        } else {
            eugenia += weights.english_points;
            components.push(ScoreComponent {
                factor: ScoreFactor::EnglishLevel,
                albert_points: 0.0,
                eugenia_points: weights.english_points,
                notes: format!("english level '{}' awards Eugenia only", level.label()),
            });
        }
    }

    (components, albert, eugenia)
}
