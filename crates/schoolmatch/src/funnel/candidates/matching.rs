use serde::{Deserialize, Serialize};

use super::domain::{Mentor, MentorId};

/// How a mentor is picked from the roster.
///
/// `FirstOverlap` reproduces the long-standing behavior: a linear scan in
/// roster order returning the first mentor sharing any tag, even when a later
/// mentor shares more. `BestOverlap` is the opt-in alternative; it is never
/// the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    #[default]
    FirstOverlap,
    BestOverlap,
}

impl MatchStrategy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "first" | "first_overlap" => Some(MatchStrategy::FirstOverlap),
            "best" | "best_overlap" => Some(MatchStrategy::BestOverlap),
            _ => None,
        }
    }
}

/// Find a mentor whose tags intersect the candidate's persona tags.
///
/// Tags on both sides are trimmed and blank entries dropped before an exact,
/// case-sensitive comparison. An empty candidate tag set, an empty roster, or
/// no intersection all yield `None`; none of these are errors.
pub fn match_mentor(
    candidate_tags: &[String],
    mentors: &[Mentor],
    strategy: MatchStrategy,
) -> Option<MentorId> {
    let candidate = normalize(candidate_tags);
    if candidate.is_empty() {
        return None;
    }

    match strategy {
        MatchStrategy::FirstOverlap => mentors
            .iter()
            .find(|mentor| overlap_count(&candidate, &mentor.tags) > 0)
            .map(|mentor| mentor.id),
        MatchStrategy::BestOverlap => {
            let mut best: Option<(MentorId, usize)> = None;
            for mentor in mentors {
                let shared = overlap_count(&candidate, &mentor.tags);
                if shared == 0 {
                    continue;
                }
                // Strictly greater keeps the earlier mentor on ties.
                if best.map(|(_, max)| shared > max).unwrap_or(true) {
                    best = Some((mentor.id, shared));
                }
            }
            best.map(|(id, _)| id)
        }
    }
}

fn normalize(tags: &[String]) -> Vec<&str> {
    tags.iter()
        .map(|tag| tag.trim())
        .filter(|tag| !tag.is_empty())
        .collect()
}

fn overlap_count(candidate: &[&str], mentor_tags: &[String]) -> usize {
    let mentor = normalize(mentor_tags);
    let mut shared = 0;
    for (index, tag) in candidate.iter().enumerate() {
        // Count distinct shared tags only once.
        if candidate[..index].contains(tag) {
            continue;
        }
        if mentor.contains(tag) {
            shared += 1;
        }
    }
    shared
}
