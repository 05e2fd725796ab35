use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{BackgroundForm, Email, RegistrationForm};
use super::repository::{CandidateRepository, MentorDirectory, RepositoryError};
use super::service::{FunnelService, FunnelServiceError};
use crate::funnel::quizzes::QuizId;

/// Router builder exposing HTTP endpoints for the funnel pipeline.
pub fn funnel_router<R, M>(service: Arc<FunnelService<R, M>>) -> Router
where
    R: CandidateRepository + 'static,
    M: MentorDirectory + 'static,
{
    Router::new()
        .route("/api/v1/funnel/candidates", post(register_handler::<R, M>))
        .route(
            "/api/v1/funnel/candidates/:email/quiz/:quiz",
            put(quiz_handler::<R, M>),
        )
        .route(
            "/api/v1/funnel/candidates/:email/background",
            put(background_handler::<R, M>),
        )
        .route(
            "/api/v1/funnel/candidates/:email/results",
            get(results_handler::<R, M>),
        )
        .route(
            "/api/v1/funnel/mentors/rematch",
            post(rematch_handler::<R, M>),
        )
        .with_state(service)
}

/// Body for quiz submissions: option labels keyed by question number.
#[derive(Debug, Deserialize)]
pub(crate) struct QuizSubmission {
    answers: BTreeMap<u8, String>,
    #[serde(default)]
    replace: bool,
}

pub(crate) async fn register_handler<R, M>(
    State(service): State<Arc<FunnelService<R, M>>>,
    axum::Json(mut form): axum::Json<RegistrationForm>,
) -> Response
where
    R: CandidateRepository + 'static,
    M: MentorDirectory + 'static,
{
    // Addresses arrive untrimmed from the login modal.
    form.email = Email::new(form.email.0);
    if form.email.0.is_empty() {
        let payload = json!({
            "error": "email must not be blank",
        });
        return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response();
    }

    match service.register(form) {
        Ok(record) => {
            let view = record.status_view();
            (StatusCode::ACCEPTED, axum::Json(view)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn quiz_handler<R, M>(
    State(service): State<Arc<FunnelService<R, M>>>,
    Path((email, quiz)): Path<(String, String)>,
    axum::Json(submission): axum::Json<QuizSubmission>,
) -> Response
where
    R: CandidateRepository + 'static,
    M: MentorDirectory + 'static,
{
    let Some(quiz) = QuizId::parse(&quiz) else {
        let payload = json!({
            "error": format!("unknown quiz '{quiz}'"),
        });
        return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
    };

    let email = Email::new(email);
    let result = match quiz {
        QuizId::Blue => {
            service.record_persona_round(&email, &submission.answers, submission.replace)
        }
        QuizId::Green => service.record_tech_round(&email, &submission.answers),
    };

    match result {
        Ok(record) => {
            let view = record.status_view();
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn background_handler<R, M>(
    State(service): State<Arc<FunnelService<R, M>>>,
    Path(email): Path<String>,
    axum::Json(form): axum::Json<BackgroundForm>,
) -> Response
where
    R: CandidateRepository + 'static,
    M: MentorDirectory + 'static,
{
    let email = Email::new(email);
    match service.record_background(&email, form) {
        Ok(record) => {
            let view = record.status_view();
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn results_handler<R, M>(
    State(service): State<Arc<FunnelService<R, M>>>,
    Path(email): Path<String>,
) -> Response
where
    R: CandidateRepository + 'static,
    M: MentorDirectory + 'static,
{
    let email = Email::new(email);
    match service.results(&email) {
        Ok(snapshot) => (StatusCode::OK, axum::Json(snapshot)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn rematch_handler<R, M>(
    State(service): State<Arc<FunnelService<R, M>>>,
) -> Response
where
    R: CandidateRepository + 'static,
    M: MentorDirectory + 'static,
{
    match service.rematch_all() {
        Ok(summary) => (StatusCode::OK, axum::Json(summary)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: FunnelServiceError) -> Response {
    let status = match &error {
        FunnelServiceError::NothingToSave(_) => StatusCode::UNPROCESSABLE_ENTITY,
        FunnelServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        FunnelServiceError::Repository(RepositoryError::VersionConflict { .. }) => {
            StatusCode::CONFLICT
        }
        FunnelServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
