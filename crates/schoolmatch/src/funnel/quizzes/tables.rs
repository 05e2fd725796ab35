use super::QuizId;

// The blue quiz shares one table across its three questions; the green quiz
// moved to a per-question table in a later revision, so every lookup here is
// keyed by question number even where the rows repeat.

const BLUE_SHARED: &[(&str, &str)] = &[
    ("A", "Finance shark"),
    ("B", "Growth Hacker"),
    ("C", "Data Detective"),
    ("D", "Tech builder"),
    ("E", "Visionnary Founder"),
    ("F", "Creative Alchemist"),
];

const GREEN_Q1: &[(&str, &str)] = &[
    ("A", "Profil Data/Maths"),
    ("B", "Profil Appliqué/Ingé"),
    ("C", "Profil Littéraire/Créa"),
    ("D", "Profil Smart/Resourceful"),
];

const GREEN_Q2: &[(&str, &str)] = &[
    ("A", "Automation First"),
    ("B", "Hands-on Builder"),
    ("C", "Low-code Explorer"),
    ("D", "Pen & Paper Strategist"),
];

const GREEN_Q3: &[(&str, &str)] = &[
    ("A", "AI Curious"),
    ("B", "Data Tinkerer"),
    ("C", "Product Dreamer"),
    ("D", "Community Animator"),
];

fn table(quiz: QuizId, question: u8) -> Option<&'static [(&'static str, &'static str)]> {
    match (quiz, question) {
        (QuizId::Blue, 1..=3) => Some(BLUE_SHARED),
        (QuizId::Green, 1) => Some(GREEN_Q1),
        (QuizId::Green, 2) => Some(GREEN_Q2),
        (QuizId::Green, 3) => Some(GREEN_Q3),
        _ => None,
    }
}

pub(crate) fn lookup(quiz: QuizId, question: u8, label: &str) -> Option<&'static str> {
    table(quiz, question)?
        .iter()
        .find(|(candidate, _)| *candidate == label)
        .map(|(_, tag)| *tag)
}

pub(crate) fn persona_label_for(tag: &str) -> Option<char> {
    reverse_label(BLUE_SHARED, tag)
}

pub(crate) fn tech_q1_label_for(tag: &str) -> Option<char> {
    reverse_label(GREEN_Q1, tag)
}

fn reverse_label(table: &'static [(&'static str, &'static str)], tag: &str) -> Option<char> {
    table
        .iter()
        .find(|(_, candidate)| *candidate == tag)
        .and_then(|(label, _)| label.chars().next())
}

/// Full persona vocabulary, used to sanity-check mentor rosters.
pub(crate) fn persona_vocabulary() -> impl Iterator<Item = &'static str> {
    BLUE_SHARED.iter().map(|(_, tag)| *tag)
}
