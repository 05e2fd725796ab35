use crate::cli::ServeArgs;
use crate::infra::{seed_roster, AppState, InMemoryCandidateRepository, InMemoryMentorDirectory};
use crate::routes::with_funnel_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use schoolmatch::config::AppConfig;
use schoolmatch::error::AppError;
use schoolmatch::funnel::candidates::{unknown_tags, FunnelService, MentorRosterCsv, ScoringWeights};
use schoolmatch::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let mentors = match &config.matching.mentor_roster {
        Some(path) => {
            let mentors = MentorRosterCsv::from_path(path)?;
            let stray = unknown_tags(&mentors);
            if !stray.is_empty() {
                warn!(tags = ?stray, "roster carries tags outside the persona vocabulary");
            }
            info!(count = mentors.len(), path = %path.display(), "mentor roster loaded");
            mentors
        }
        None => seed_roster(),
    };

    let repository = Arc::new(InMemoryCandidateRepository::default());
    let directory = Arc::new(InMemoryMentorDirectory::with_mentors(mentors));
    let funnel_service = Arc::new(FunnelService::new(
        repository,
        directory,
        ScoringWeights::default(),
        config.matching.strategy,
    ));

    let app = with_funnel_routes(funnel_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "quiz funnel service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
