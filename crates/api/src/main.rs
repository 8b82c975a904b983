use std::sync::Arc;

use audioscribe_api::{build_router, engine, state::AppState};
use audioscribe_config::Settings;
use audioscribe_transcription::EngineGate;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file (silently ignore if missing)
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "audioscribe_api=debug,audioscribe_transcription=debug,tower_http=debug".into()
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load config
    let settings = Settings::load()?;
    info!("Starting audioscribe on {}:{}", settings.app.host, settings.app.port);
    info!(
        backend = %settings.transcription.backend,
        language = ?settings.transcription.language,
        upload_dir = ?settings.transcription.upload_dir,
        max_upload_bytes = settings.app.max_upload_bytes,
        "Transcription config"
    );

    // Model loads in the background; requests get 503 until the gate is ready
    let gate = Arc::new(EngineGate::new());
    tokio::spawn(engine::load(
        Arc::clone(&gate),
        engine::transcription_config(&settings.transcription),
    ));

    let app_state = AppState::new(settings.clone(), gate);
    let app = build_router(app_state);

    // Start server
    let addr = format!("{}:{}", settings.app.host, settings.app.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
