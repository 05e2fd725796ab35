use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique candidate key. Login collects the address; it is trimmed once here
/// and compared exactly afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Email(pub String);

impl Email {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into().trim().to_string())
    }
}

/// Identifier wrapper for roster entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MentorId(pub i64);

/// A roster entry: mentors carry tags in the same vocabulary as persona tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mentor {
    pub id: MentorId,
    pub name: String,
    pub tags: Vec<String>,
}

/// Outcome of the compatibility comparison between the two schools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendedSchool {
    Albert,
    Eugenia,
    Tie,
}

impl RecommendedSchool {
    pub const fn label(self) -> &'static str {
        match self {
            RecommendedSchool::Albert => "albert",
            RecommendedSchool::Eugenia => "eugenia",
            RecommendedSchool::Tie => "tie",
        }
    }
}

/// Self-declared English proficiency, one of four fixed levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnglishLevel {
    Bilingual,
    Fluent,
    Conversational,
    Beginner,
}

impl EnglishLevel {
    /// The two upper levels split the English weight between both schools;
    /// the two lower levels send it entirely to Eugenia.
    pub const fn is_high_proficiency(self) -> bool {
        matches!(self, EnglishLevel::Bilingual | EnglishLevel::Fluent)
    }

    pub const fn label(self) -> &'static str {
        match self {
            EnglishLevel::Bilingual => "bilingual",
            EnglishLevel::Fluent => "fluent",
            EnglishLevel::Conversational => "conversational",
            EnglishLevel::Beginner => "beginner",
        }
    }
}

/// Sector picked on the red screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterestSector {
    Finance,
    Consulting,
    Tech,
    Marketing,
    Entrepreneurship,
    Creative,
}

/// Tag vectors on the candidate record never exceed this length.
pub const MAX_TAGS: usize = 3;

/// One row per respondent, keyed by email.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub email: Email,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub class: Option<String>,
    pub persona_tags: Vec<String>,
    pub dominant_persona_tag: Option<String>,
    pub tech_affinity_tags: Vec<String>,
    pub interest_sector: Option<InterestSector>,
    pub proud_project: Option<String>,
    pub hobbies: Option<String>,
    pub english_level: Option<EnglishLevel>,
    pub recommended_school: Option<RecommendedSchool>,
    pub matched_mentor_id: Option<MentorId>,
    pub created_at: DateTime<Utc>,
    /// Bumped on every successful store; the compare-and-swap token that keeps
    /// concurrent tag rewrites from losing updates.
    pub version: u64,
}

impl CandidateRecord {
    pub fn new(email: Email, created_at: DateTime<Utc>) -> Self {
        Self {
            email,
            first_name: None,
            last_name: None,
            class: None,
            persona_tags: Vec::new(),
            dominant_persona_tag: None,
            tech_affinity_tags: Vec::new(),
            interest_sector: None,
            proud_project: None,
            hobbies: None,
            english_level: None,
            recommended_school: None,
            matched_mentor_id: None,
            created_at,
            version: 0,
        }
    }

    pub fn status_view(&self) -> CandidateView {
        CandidateView {
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            class: self.class.clone(),
            persona_tags: self.persona_tags.clone(),
            dominant_persona_tag: self.dominant_persona_tag.clone(),
            tech_affinity_tags: self.tech_affinity_tags.clone(),
            recommended_school: self.recommended_school.map(RecommendedSchool::label),
            matched_mentor_id: self.matched_mentor_id,
        }
    }
}

/// Identity fields collected by the login modal; merged into an existing row
/// or used to create one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistrationForm {
    pub email: Email,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub class: Option<String>,
}

/// Fields written directly by the red screen. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackgroundForm {
    #[serde(default)]
    pub interest_sector: Option<InterestSector>,
    #[serde(default)]
    pub proud_project: Option<String>,
    #[serde(default)]
    pub hobbies: Option<String>,
    #[serde(default)]
    pub english_level: Option<EnglishLevel>,
}

/// Sanitized representation of a candidate's exposed state.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateView {
    pub email: Email,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    pub persona_tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dominant_persona_tag: Option<String>,
    pub tech_affinity_tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommended_school: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_mentor_id: Option<MentorId>,
}
