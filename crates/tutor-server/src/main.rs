//! Tutoring Site HTTP Server
//!
//! Axum-based backend for the marketing site: proxies the AI study helper
//! to a hosted chat-completion gateway and serves the question of the day.

mod handlers;
mod state;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tutor_core::ChatGateway;
use tutor_gateway::OpenAiGateway;
use tutor_quiz::{DailyProgress, FileStore};

use crate::handlers::{
    answer_daily, daily_question, health_check, practice_question, reset_daily, tutor_handler,
};
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    dotenvy::dotenv().ok();

    // Initialize the chat gateway
    let gateway: Arc<dyn ChatGateway> = Arc::new(OpenAiGateway::from_env());

    match gateway.health_check().await {
        Ok(true) => tracing::info!("✓ Connected to AI gateway"),
        Ok(false) | Err(_) => {
            tracing::warn!("⚠ AI gateway not reachable - study helper requests will fail");
            tracing::warn!("  Set AI_GATEWAY_API_KEY (and optionally AI_GATEWAY_URL) in .env");
        }
    }

    // Daily answer record storage
    let progress_path = std::env::var("DAILY_PROGRESS_PATH")
        .unwrap_or_else(|_| "daily_progress.json".into());
    let progress = Arc::new(DailyProgress::new(FileStore::new(&progress_path)));
    tracing::info!("Daily answer record stored at {}", progress_path);

    // Build application state
    let state = AppState { gateway, progress };

    // CORS configuration: permissive by design (the SPA is served from a
    // different origin), and the layer answers OPTIONS preflights itself.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = Router::new()
        // Health & info
        .route("/health", get(health_check))
        // AI study helper
        .route("/api/tutor", post(tutor_handler))
        // Question of the day
        .route("/api/daily", get(daily_question))
        .route("/api/daily/answer", post(answer_daily).delete(reset_daily))
        .route("/api/practice", get(practice_question))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("🚀 tutor-server running on http://{}", addr);
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET    /health           - Health check");
    tracing::info!("  POST   /api/tutor        - AI study helper (stream:false to buffer)");
    tracing::info!("  GET    /api/daily        - Question of the day + saved answer");
    tracing::info!("  POST   /api/daily/answer - Answer today's question");
    tracing::info!("  DELETE /api/daily/answer - Try again");
    tracing::info!("  GET    /api/practice     - Fresh practice question");
    tracing::info!("");

    axum::serve(listener, app).await?;

    Ok(())
}
