use std::sync::Arc;

use super::common::*;
use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use crate::funnel::candidates::matching::MatchStrategy;
use crate::funnel::candidates::router::funnel_router;
use crate::funnel::candidates::scoring::ScoringWeights;
use crate::funnel::candidates::service::FunnelService;

fn json_request(
    method: &str,
    uri: &str,
    body: serde_json::Value,
) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::builder()
        .method(method)
        .uri(uri)
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(
            serde_json::to_vec(&body).expect("serializable body"),
        ))
        .expect("request builds")
}

#[tokio::test]
async fn register_route_accepts_new_candidates() {
    let (service, _, _) = build_service();
    let router = funnel_router_with_service(service);

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/funnel/candidates",
            json!({ "email": "ada@example.com", "first_name": "Ada" }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("email"), Some(&json!("ada@example.com")));
    assert_eq!(payload.get("first_name"), Some(&json!("Ada")));
}

#[tokio::test]
async fn register_route_rejects_blank_emails() {
    let (service, _, _) = build_service();
    let router = funnel_router_with_service(service);

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/funnel/candidates",
            json!({ "email": "   " }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn quiz_route_persists_blue_answers() {
    let (service, _, _) = build_service();
    let router = funnel_router_with_service(service);

    let response = router
        .oneshot(json_request(
            "PUT",
            "/api/v1/funnel/candidates/ada@example.com/quiz/blue",
            json!({ "answers": { "1": "D", "2": "B", "3": "D" } }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload.get("persona_tags"),
        Some(&json!(["Tech builder", "Growth Hacker", "Tech builder"]))
    );
    assert_eq!(
        payload.get("dominant_persona_tag"),
        Some(&json!("Tech builder"))
    );
}

#[tokio::test]
async fn quiz_route_rejects_unknown_quiz_ids() {
    let (service, _, _) = build_service();
    let router = funnel_router_with_service(service);

    let response = router
        .oneshot(json_request(
            "PUT",
            "/api/v1/funnel/candidates/ada@example.com/quiz/purple",
            json!({ "answers": { "1": "A" } }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn quiz_route_returns_unprocessable_for_unresolvable_sheets() {
    let (service, _, _) = build_service();
    let router = funnel_router_with_service(service);

    let response = router
        .oneshot(json_request(
            "PUT",
            "/api/v1/funnel/candidates/ada@example.com/quiz/blue",
            json!({ "answers": { "1": "Z" } }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn background_route_updates_the_red_screen_fields() {
    let (service, _, _) = build_service();
    let router = funnel_router_with_service(service);

    let response = router
        .oneshot(json_request(
            "PUT",
            "/api/v1/funnel/candidates/ada@example.com/background",
            json!({ "interest_sector": "tech", "english_level": "fluent" }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn results_route_returns_the_score_card() {
    let (service, _, _) = build_service();
    let router = funnel_router_with_service(service);

    let put = router
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/v1/funnel/candidates/ada@example.com/quiz/blue",
            json!({ "answers": { "1": "A", "2": "B", "3": "C" } }),
        ))
        .await
        .expect("quiz route executes");
    assert_eq!(put.status(), StatusCode::OK);

    let response = router
        .oneshot(
            axum::http::Request::get("/api/v1/funnel/candidates/ada@example.com/results")
                .body(axum::body::Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let card = payload.get("card").expect("card present");
    assert_eq!(card.get("albert_percent"), Some(&json!(45.0)));
    assert_eq!(card.get("eugenia_percent"), Some(&json!(0.0)));
    assert_eq!(card.get("recommended"), Some(&json!("albert")));
}

#[tokio::test]
async fn results_route_returns_not_found_for_unknown_candidates() {
    let (service, _, _) = build_service();
    let router = funnel_router_with_service(service);

    let response = router
        .oneshot(
            axum::http::Request::get("/api/v1/funnel/candidates/ghost@example.com/results")
                .body(axum::body::Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn rematch_route_reports_the_summary() {
    let (service, _, _) = build_service();
    let router = funnel_router_with_service(service);

    let put = router
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/v1/funnel/candidates/ada@example.com/quiz/blue",
            json!({ "answers": { "1": "A" } }),
        ))
        .await
        .expect("quiz route executes");
    assert_eq!(put.status(), StatusCode::OK);

    let response = router
        .oneshot(
            axum::http::Request::post("/api/v1/funnel/mentors/rematch")
                .body(axum::body::Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("total"), Some(&json!(1)));
    assert_eq!(payload.get("matched"), Some(&json!(1)));
    assert_eq!(payload.get("unmatched"), Some(&json!(0)));
}

#[tokio::test]
async fn stale_store_maps_to_conflict() {
    let service = Arc::new(FunnelService::new(
        Arc::new(StaleRepository),
        Arc::new(MemoryDirectory::with_mentors(roster())),
        ScoringWeights::default(),
        MatchStrategy::FirstOverlap,
    ));
    let router = funnel_router(service);

    let response = router
        .oneshot(json_request(
            "PUT",
            "/api/v1/funnel/candidates/ada@example.com/quiz/blue",
            json!({ "answers": { "1": "A" } }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn storage_outage_maps_to_internal_error() {
    let service = Arc::new(FunnelService::new(
        Arc::new(UnavailableRepository),
        Arc::new(MemoryDirectory::with_mentors(roster())),
        ScoringWeights::default(),
        MatchStrategy::FirstOverlap,
    ));
    let router = funnel_router(service);

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/funnel/candidates",
            json!({ "email": "ada@example.com" }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
