//! HTTP surface tests: the router is driven with `oneshot` over in-memory deps.

mod common;

use std::time::Duration;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use common::*;
use prayer_extraction::MockFetcher;
use server_core::domains::prayer_times::PrayerTimeUpsert;
use server_core::kernel::{BaseCatalogStore, TestDependencies};
use server_core::server::build_app;

const TRIGGER: &str = "/functions/scrape-prayer-times";

fn app(deps: &TestDependencies) -> Router {
    build_app(deps.server_deps())
}

async fn send(app: Router, method: Method, uri: &str, body: Body) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(body)
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

#[tokio::test]
async fn post_runs_ingestion_and_returns_report() {
    let deps = TestDependencies::new().with_fetcher(MockFetcher::new().with_page(
        CENTRAL_URL,
        any_day_timetable(["5:41", "12:58", "15:39", "18:19", "19:44"]),
    ));

    let (status, body) = send(app(&deps), Method::POST, TRIGGER, Body::from(r#"{"force":true}"#)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Successfully processed 4 mosques with 0 errors");
    assert_eq!(body["results"].as_array().unwrap().len(), 4);
    assert_eq!(
        body["results"][0],
        serde_json::json!({"mosque": "Manchester Central Mosque", "success": true, "method": "table_row"})
    );
    assert_eq!(body["errors"], serde_json::json!([]));
}

#[tokio::test]
async fn dropped_request_does_not_cancel_the_run() {
    let deps = TestDependencies::new().with_fetcher(
        MockFetcher::new()
            .with_page(CENTRAL_URL, any_day_timetable(["5:41", "12:58", "15:39", "18:19", "19:44"]))
            .with_delay(CENTRAL_URL, Duration::from_millis(200)),
    );

    let request = send(app(&deps), Method::POST, TRIGGER, Body::empty());
    assert!(tokio::time::timeout(Duration::from_millis(20), request)
        .await
        .is_err());

    tokio::time::sleep(Duration::from_millis(500)).await;
    assert_eq!(deps.store.prayer_times().len(), 4);
}

#[tokio::test]
async fn post_accepts_an_empty_body() {
    let deps = TestDependencies::new();

    let (status, body) = send(app(&deps), Method::POST, TRIGGER, Body::empty()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn systemic_failure_is_a_500_with_details() {
    let deps = TestDependencies::new();
    deps.store.fail_listing();

    let (status, body) = send(app(&deps), Method::POST, TRIGGER, Body::empty()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Failed to load mosques");
    assert!(body["details"].as_str().unwrap().contains("connection refused"));
}

#[tokio::test]
async fn non_post_methods_are_rejected() {
    let deps = TestDependencies::new();

    for method in [Method::GET, Method::PUT, Method::DELETE] {
        let (status, body) = send(app(&deps), method, TRIGGER, Body::empty()).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body["error"], "Only POST requests allowed");
    }
    assert!(deps.store.mosques().is_empty());
}

#[tokio::test]
async fn options_answers_preflight() {
    let deps = TestDependencies::new();

    let response = app(&deps)
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri(TRIGGER)
                .header("origin", "https://admin.example.org")
                .header("access-control-request-method", "POST")
                .header("access-control-request-headers", "apikey, content-type")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers["access-control-allow-origin"], "*");
    let allowed = headers["access-control-allow-headers"].to_str().unwrap();
    assert!(allowed.contains("apikey"));
    assert!(allowed.contains("x-client-info"));
    assert!(deps.store.mosques().is_empty());
}

#[tokio::test]
async fn bare_options_is_ok() {
    let deps = TestDependencies::new();

    let (status, _) = send(app(&deps), Method::OPTIONS, TRIGGER, Body::empty()).await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn health_reports_store_and_sources() {
    let deps = TestDependencies::new();

    let (status, body) = send(app(&deps), Method::GET, "/health", Body::empty()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"]["status"], "ok");
    assert_eq!(body["sources"], 4);
    assert!(body.get("connection_pool").is_none());
}

#[tokio::test]
async fn prayer_times_endpoint_serves_stored_day() {
    let deps = TestDependencies::new();
    let mosque_id = deps.store.seed_mosque("Test Mosque", Some("1"));
    deps.store
        .upsert_prayer_times(&PrayerTimeUpsert::new(
            mosque_id,
            today(),
            prayer_extraction::DailyTimes::fixed(["05:00", "13:00", "16:00", "19:00", "21:00"], "13:30"),
        ))
        .await
        .unwrap();

    let uri = format!("/mosques/{}/prayer-times?date=2026-10-17", mosque_id);
    let (status, body) = send(app(&deps), Method::GET, &uri, Body::empty()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["fajr"], "05:00");
    assert_eq!(body["jummah"], "13:30");
    assert_eq!(body["date"], "2026-10-17");

    let uri = format!("/mosques/{}/prayer-times?date=2026-10-18", mosque_id);
    let (status, _) = send(app(&deps), Method::GET, &uri, Body::empty()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn mosques_endpoint_lists_catalog() {
    let deps = TestDependencies::new();
    deps.store.seed_mosque("Didsbury Mosque Manchester", None);

    let (status, body) = send(app(&deps), Method::GET, "/mosques", Body::empty()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["name"], "Didsbury Mosque Manchester");
    assert_eq!(body[0]["type"], "mosque");
    assert_eq!(body[0]["operating_hours"].as_array().unwrap().len(), 7);
}
