//! Integration tests for the triage HTTP endpoints.
//!
//! These tests drive full request/response cycles through the axum router
//! with a mock text generator:
//! 1. Request DTOs deserialize correctly
//! 2. The analysis cycle runs end to end per endpoint
//! 3. Failures surface as structured error responses

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use care_compass::adapters::ai::{MockGenerationError, MockTextGenerator};
use care_compass::adapters::http::{triage_routes, TriageAppState};
use care_compass::application::handlers::AnalyzeSymptomsHandler;

// =============================================================================
// Test Infrastructure
// =============================================================================

/// Builds a router backed by the given mock generator.
fn app(generator: MockTextGenerator) -> axum::Router {
    let handler = AnalyzeSymptomsHandler::new(Arc::new(generator));
    triage_routes(TriageAppState::new(Arc::new(handler)))
}

/// Sends `text` to the given endpoint and returns (status, body).
async fn post_text(app: axum::Router, path: &str, text: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "text": text }).to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap();
    (status, body)
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn health_endpoint_responds() {
    let response = app(MockTextGenerator::new())
        .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn assessment_returns_full_report() {
    let generator = MockTextGenerator::new().with_reply(
        r#"분석 결과는 다음과 같습니다:
{
  "진료과": ["내과", "신경과"],
  "증상": [
    {"이름": "두통", "설명": "머리가 아프고 무거운 느낌이 드는 증상입니다."},
    {"이름": "미식거림", "설명": "속이 울렁거리는 느낌이에요."}
  ],
  "관련 질환": [
    {"이름": "편두통", "설명": "일측성 두통으로 메스꺼움이 함께 나타나요."}
  ],
  "응급도": "중간 - 빠른 진료 권장"
}
빠른 쾌유를 빕니다."#,
    );

    let (status, body) = post_text(
        app(generator),
        "/api/triage/assessment",
        "머리가 아프고 속이 미식거려요",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["kind"], "urgency_assessment");
    assert_eq!(body["departments"], json!(["내과", "신경과"]));
    assert_eq!(body["symptoms"][0]["name"], "두통");
    assert_eq!(body["related_conditions"][0]["name"], "편두통");
    assert_eq!(body["urgency"], "중간 - 빠른 진료 권장");
    assert_eq!(body["model"], "mock-model");
}

#[tokio::test]
async fn departments_endpoint_includes_dictionary_signal() {
    let generator = MockTextGenerator::new().with_reply(r#"{"진료과": ["신경과"]}"#);

    let (status, body) = post_text(
        app(generator),
        "/api/triage/departments",
        "어제부터 두통이 심해요",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["kind"], "department_referral");
    assert_eq!(body["departments"], json!(["신경과"]));
    // The rule-based lookup runs alongside the model call.
    assert_eq!(body["local"]["symptoms"], json!(["두통"]));
    assert_eq!(body["local"]["departments"], json!(["신경과"]));
}

#[tokio::test]
async fn symptoms_endpoint_accepts_fenced_reply() {
    let generator = MockTextGenerator::new().with_reply(
        "```json\n{\"증상\": [{\"이름\": \"기침\", \"설명\": \"목이 간질거리며 기침이 나요.\"}]}\n```",
    );

    let (status, body) = post_text(app(generator), "/api/triage/symptoms", "기침이 나요").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["symptoms"][0]["name"], "기침");
    assert!(body.get("urgency").is_none());
}

#[tokio::test]
async fn conditions_endpoint_returns_related_conditions() {
    let generator = MockTextGenerator::new().with_reply(
        r#"{"관련 질환": [{"이름": "위염", "설명": "위 점막에 염증이 생긴 상태입니다."}]}"#,
    );

    let (status, body) =
        post_text(app(generator), "/api/triage/conditions", "속이 쓰려요").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["related_conditions"][0]["name"], "위염");
}

#[tokio::test]
async fn empty_text_is_bad_request() {
    let (status, body) = post_text(
        app(MockTextGenerator::new()),
        "/api/triage/assessment",
        "   ",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn json_free_reply_surfaces_raw_response() {
    let raw = "죄송하지만 증상을 더 자세히 알려주시겠어요?";
    let generator = MockTextGenerator::new().with_reply(raw);

    let (status, body) = post_text(
        app(generator),
        "/api/triage/assessment",
        "몸이 좀 이상해요",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], "EXTRACTION_FAILED");
    assert_eq!(body["details"]["raw_response"], raw);
}

#[tokio::test]
async fn malformed_json_reply_surfaces_raw_response() {
    let generator = MockTextGenerator::new().with_reply(r#"{"진료과": }"#);

    let (status, body) = post_text(
        app(generator),
        "/api/triage/departments",
        "허리통증이 있어요",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], "EXTRACTION_FAILED");
    assert_eq!(body["details"]["raw_response"], r#"{"진료과": }"#);
}

#[tokio::test]
async fn upstream_failure_is_bad_gateway() {
    let generator = MockTextGenerator::new().with_error(MockGenerationError::Unavailable {
        message: "model is currently loading".to_string(),
    });

    let (status, body) = post_text(
        app(generator),
        "/api/triage/symptoms",
        "열이 나고 기침을 해요",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], "UPSTREAM_UNAVAILABLE");
}
