use serde::{Deserialize, Serialize};

/// Fixed point values each answered field contributes to a school total.
///
/// Loaded once at startup and passed explicitly to the engine; nothing reads
/// these from module-level state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// Awarded per persona-tag slot (three slots at most).
    pub persona_slot_points: f64,
    /// Awarded for the first tech-affinity slot; the other two are stored but
    /// never scored.
    pub tech_primary_points: f64,
    /// English budget: split evenly between both schools at high proficiency,
    /// awarded entirely to Eugenia otherwise.
    pub english_points: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            persona_slot_points: 15.0,
            tech_primary_points: 27.5,
            english_points: 27.5,
        }
    }
}
