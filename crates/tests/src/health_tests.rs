use crate::fixtures::fake_backend::FakeBackend;
use crate::fixtures::test_app::TestApp;
use serde_json::Value;
use std::sync::Arc;

#[tokio::test]
async fn root_is_static_descriptor() {
    let app = TestApp::spawn_loading().await;

    let resp = app.client.get(app.url("/")).send().await.unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["message"], "Whisper Transcription Service");
    assert_eq!(json["status"], "running");
}

#[tokio::test]
async fn health_reports_model_not_loaded_while_loading() {
    let app = TestApp::spawn_loading().await;

    let resp = app.client.get(app.url("/health")).send().await.unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["model_loaded"], false);
}

#[tokio::test]
async fn health_follows_gate_transition() {
    let app = TestApp::spawn_loading().await;
    assert!(app.gate.mark_ready(Arc::new(FakeBackend::dialogue())));

    let json: Value = app
        .client
        .get(app.url("/health"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(json["model_loaded"], true);
}

#[tokio::test]
async fn cors_allows_any_origin_by_default() {
    let app = TestApp::spawn_loading().await;

    let resp = app
        .client
        .get(app.url("/health"))
        .header("Origin", "http://localhost:3000")
        .send()
        .await
        .unwrap();
    assert_eq!(
        resp.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}
