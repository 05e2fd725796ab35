use std::collections::BTreeMap;

use crate::funnel::quizzes::{self, QuizId, QUESTIONS_PER_QUIZ};

/// Raised when a submitted answer sheet resolves to nothing persistable.
#[derive(Debug, thiserror::Error)]
pub enum AggregationError {
    #[error("no resolvable answers for quiz {quiz}")]
    NoAnswers { quiz: QuizId },
}

/// Convert raw per-question option labels into categorical tags.
///
/// Questions without a recorded answer, and answers whose label has no entry in
/// the quiz's lookup table, are skipped rather than replaced with a
/// placeholder. The output preserves question order and never contains blank
/// entries. An all-unresolvable sheet is a distinct "nothing to save"
/// condition, not a successful empty aggregation.
pub fn aggregate(
    quiz: QuizId,
    answers: &BTreeMap<u8, String>,
) -> Result<Vec<String>, AggregationError> {
    let mut tags = Vec::new();

    for question in 1..=QUESTIONS_PER_QUIZ {
        let Some(label) = answers.get(&question) else {
            continue;
        };
        if let Some(tag) = quizzes::tag_for(quiz, question, label) {
            tags.push(tag.to_string());
        }
    }

    if tags.is_empty() {
        return Err(AggregationError::NoAnswers { quiz });
    }

    Ok(tags)
}

/// The most frequent tag among a candidate's persona tags.
///
/// Defined only when some tag repeats at least twice; three distinct tags yield
/// no dominant tag. When two tags tie at the maximum the one encountered first
/// wins.
pub fn dominant_tag(tags: &[String]) -> Option<String> {
    let mut counts: Vec<(&str, usize)> = Vec::new();

    for tag in tags {
        let trimmed = tag.trim();
        if trimmed.is_empty() {
            continue;
        }
        match counts.iter_mut().find(|(seen, _)| *seen == trimmed) {
            Some(entry) => entry.1 += 1,
            None => counts.push((trimmed, 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (tag, count) in counts {
        if best.map(|(_, max)| count > max).unwrap_or(true) {
            best = Some((tag, count));
        }
    }

    match best {
        Some((tag, count)) if count >= 2 => Some(tag.to_string()),
        _ => None,
    }
}
