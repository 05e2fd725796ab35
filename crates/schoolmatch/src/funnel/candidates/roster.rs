use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use super::domain::{Mentor, MentorId};
use crate::funnel::quizzes::tables;

/// Errors raised while importing a mentor roster export.
#[derive(Debug, thiserror::Error)]
pub enum RosterImportError {
    #[error("failed to read roster export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid roster CSV data: {0}")]
    Csv(#[from] csv::Error),
}

/// Loads mentors from a `id,name,tags` CSV export, tags separated by `|`.
///
/// Row order is preserved: the matcher's first-overlap policy depends on it.
pub struct MentorRosterCsv;

impl MentorRosterCsv {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Mentor>, RosterImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Mentor>, RosterImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut mentors = Vec::new();

        for record in csv_reader.deserialize::<MentorRow>() {
            let row = record?;
            mentors.push(Mentor {
                id: MentorId(row.id),
                name: row.name,
                tags: split_tags(&row.tags),
            });
        }

        Ok(mentors)
    }
}

#[derive(Debug, Deserialize)]
struct MentorRow {
    id: i64,
    name: String,
    #[serde(default)]
    tags: String,
}

fn split_tags(raw: &str) -> Vec<String> {
    raw.split('|')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Tags on a roster that are outside the persona vocabulary. They can never
/// match a candidate, so imports surface them for operator review.
pub fn unknown_tags(mentors: &[Mentor]) -> Vec<String> {
    let mut unknown = Vec::new();
    for mentor in mentors {
        for tag in &mentor.tags {
            if tables::persona_vocabulary().any(|known| known == tag.as_str()) {
                continue;
            }
            if !unknown.contains(tag) {
                unknown.push(tag.clone());
            }
        }
    }
    unknown
}
