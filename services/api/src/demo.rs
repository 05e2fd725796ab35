use crate::infra::{seed_roster, InMemoryCandidateRepository, InMemoryMentorDirectory};
use clap::Args;
use schoolmatch::error::AppError;
use schoolmatch::funnel::candidates::{
    unknown_tags, BackgroundForm, Email, EnglishLevel, FunnelService, InterestSector,
    MatchStrategy, MentorRosterCsv, RegistrationForm, ScoringWeights,
};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Candidate email used for the demo run
    #[arg(long, default_value = "demo@example.com")]
    pub(crate) email: String,
    /// Mentor matching strategy (first_overlap or best_overlap)
    #[arg(long, value_parser = parse_strategy)]
    pub(crate) strategy: Option<MatchStrategy>,
    /// Optional mentor roster CSV; the built-in roster is used otherwise
    #[arg(long)]
    pub(crate) roster: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct MentorsCheckArgs {
    /// Mentor roster CSV export to validate
    #[arg(long)]
    pub(crate) roster: PathBuf,
}

fn parse_strategy(raw: &str) -> Result<MatchStrategy, String> {
    MatchStrategy::parse(raw)
        .ok_or_else(|| format!("'{raw}' is not 'first_overlap' or 'best_overlap'"))
}

pub(crate) fn run_mentors_check(args: MentorsCheckArgs) -> Result<(), AppError> {
    let mentors = MentorRosterCsv::from_path(&args.roster)?;

    println!("Mentor roster check: {}", args.roster.display());
    println!("- {} mentors loaded", mentors.len());
    for mentor in &mentors {
        println!(
            "  - #{} {} [{}]",
            mentor.id.0,
            mentor.name,
            mentor.tags.join(", ")
        );
    }

    let stray = unknown_tags(&mentors);
    if stray.is_empty() {
        println!("- all tags are inside the persona vocabulary");
    } else {
        println!("- tags outside the persona vocabulary (these never match a candidate):");
        for tag in stray {
            println!("  - {tag}");
        }
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        email,
        strategy,
        roster,
    } = args;

    let mentors = match roster {
        Some(path) => MentorRosterCsv::from_path(path)?,
        None => seed_roster(),
    };
    let strategy = strategy.unwrap_or_default();

    let repository = Arc::new(InMemoryCandidateRepository::default());
    let directory = Arc::new(InMemoryMentorDirectory::with_mentors(mentors));
    let service = FunnelService::new(
        repository,
        directory,
        ScoringWeights::default(),
        strategy,
    );

    let email = Email::new(email);
    println!("Quiz funnel demo for {}", email.0);

    service.register(RegistrationForm {
        email: email.clone(),
        first_name: Some("Demo".to_string()),
        last_name: Some("Candidate".to_string()),
        class: Some("2026".to_string()),
    })?;
    println!("- registered via the login modal");

    let persona_sheet: BTreeMap<u8, String> = [(1u8, "A"), (2, "D"), (3, "A")]
        .into_iter()
        .map(|(question, label)| (question, label.to_string()))
        .collect();
    let record = service.record_persona_round(&email, &persona_sheet, false)?;
    println!("- persona quiz saved: tags {:?}", record.persona_tags);
    if let Some(dominant) = &record.dominant_persona_tag {
        println!("  dominant persona: {dominant}");
    }
    match record.matched_mentor_id {
        Some(mentor) => println!("  matched mentor: #{}", mentor.0),
        None => println!("  matched mentor: none"),
    }

    let tech_sheet: BTreeMap<u8, String> = [(1u8, "B"), (2, "A"), (3, "C")]
        .into_iter()
        .map(|(question, label)| (question, label.to_string()))
        .collect();
    let record = service.record_tech_round(&email, &tech_sheet)?;
    println!("- tech quiz saved: tags {:?}", record.tech_affinity_tags);

    service.record_background(
        &email,
        BackgroundForm {
            interest_sector: Some(InterestSector::Entrepreneurship),
            proud_project: Some("Launched a campus newsletter".to_string()),
            hobbies: Some("Bouldering, chess".to_string()),
            english_level: Some(EnglishLevel::Fluent),
        },
    )?;
    println!("- background screen saved");

    let snapshot = service.results(&email)?;
    println!("\nResults page payload");
    println!(
        "- Albert {:.2}% vs Eugenia {:.2}% -> recommended {}",
        snapshot.card.albert_percent,
        snapshot.card.eugenia_percent,
        snapshot.card.recommended.label()
    );
    println!("- score components:");
    for component in &snapshot.card.components {
        println!(
            "  - {:?}: Albert {:+.2} / Eugenia {:+.2} ({})",
            component.factor, component.albert_points, component.eugenia_points, component.notes
        );
    }
    match snapshot.matched_mentor_id {
        Some(mentor) => println!("- mentor to contact: #{}", mentor.0),
        None => println!("- mentor to contact: none assigned"),
    }

    let summary = service.rematch_all()?;
    println!(
        "\nBatch rematch: {} candidates, {} matched, {} unmatched, {} rows updated",
        summary.total, summary.matched, summary.unmatched, summary.updated
    );

    Ok(())
}
