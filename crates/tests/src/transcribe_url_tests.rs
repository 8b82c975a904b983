use crate::fixtures::fake_backend::{FakeBackend, Observed, Script};
use crate::fixtures::log_capture::LogCapture;
use crate::fixtures::test_app::TestApp;
use serde_json::Value;
use std::sync::Arc;

#[tokio::test]
async fn url_is_passed_to_engine_verbatim() {
    let backend = Arc::new(FakeBackend::dialogue());
    let app = TestApp::spawn_with_backend(backend.clone()).await;

    let resp = app
        .transcribe_url(serde_json::json!({ "url": "https://cdn.test/rec/42.m4a?token=abc" }))
        .await;

    assert_eq!(resp.status().as_u16(), 200);
    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["speakers_detected"], 2);
    assert_eq!(json["duration"], 4.0);

    match backend.observed().as_slice() {
        [Observed::Remote(url)] => assert_eq!(url, "https://cdn.test/rec/42.m4a?token=abc"),
        other => panic!("unexpected observations {:?}", other),
    }
    assert_eq!(app.staged_files(), 0);
}

#[tokio::test]
async fn missing_url_is_bad_request() {
    let backend = Arc::new(FakeBackend::dialogue());
    let app = TestApp::spawn_with_backend(backend.clone()).await;

    for body in [serde_json::json!({}), serde_json::json!({ "url": "" }), serde_json::json!({ "url": null })] {
        let resp = app.transcribe_url(body).await;
        assert_eq!(resp.status().as_u16(), 400);
        let json: Value = resp.json().await.unwrap();
        assert_eq!(json["detail"], "URL is required");
    }
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn malformed_body_is_bad_request() {
    let backend = Arc::new(FakeBackend::dialogue());
    let app = TestApp::spawn_with_backend(backend.clone()).await;

    let resp = app
        .client
        .post(app.url("/transcribe-url"))
        .header("Content-Type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 400);

    let resp = app.transcribe_url(serde_json::json!({ "url": 42 })).await;
    assert_eq!(resp.status().as_u16(), 400);
    assert_eq!(backend.calls(), 0);
}

#[tokio::test(flavor = "current_thread")]
async fn malformed_body_reason_is_logged() {
    let (logs, _guard) = LogCapture::install();
    let backend = Arc::new(FakeBackend::dialogue());
    let app = TestApp::spawn_with_backend(backend).await;

    let resp = app.transcribe_url(serde_json::json!({ "url": 42 })).await;
    assert_eq!(resp.status().as_u16(), 400);
    let json: Value = resp.json().await.unwrap();
    let detail = json["detail"].as_str().unwrap().to_string();
    assert!(!detail.is_empty());
    assert_eq!(logs.lines_with("WARN", "status=400").len(), 1, "{}", logs.contents());
    assert!(logs.contents().contains("invalid type"), "{}", logs.contents());
}

#[tokio::test]
async fn engine_failure_is_500() {
    let backend = Arc::new(FakeBackend::new(Script::Fail("404 Not Found".to_string())));
    let app = TestApp::spawn_with_backend(backend).await;

    let resp = app
        .transcribe_url(serde_json::json!({ "url": "https://cdn.test/gone.wav" }))
        .await;
    assert_eq!(resp.status().as_u16(), 500);
    let json: Value = resp.json().await.unwrap();
    assert!(json["detail"].as_str().unwrap().starts_with("Transcription failed:"));
    assert!(json["detail"].as_str().unwrap().contains("404 Not Found"));
}

#[tokio::test]
async fn not_ready_is_503() {
    let app = TestApp::spawn_loading().await;

    let resp = app
        .transcribe_url(serde_json::json!({ "url": "https://cdn.test/a.wav" }))
        .await;
    assert_eq!(resp.status().as_u16(), 503);
    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["detail"], "Model not loaded");

    // Readiness is checked before the body
    let resp = app.transcribe_url(serde_json::json!({})).await;
    assert_eq!(resp.status().as_u16(), 503);
}
