//! Web server module - the single-page predictor UI and its JSON API

pub mod http;
pub mod page;

use anyhow::Result;
use axum::{
    response::Html,
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::predict::PredictionService;

/// Shared server state
#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub service: Arc<PredictionService>,
    pub started_at: DateTime<Utc>,
}

impl ServerState {
    pub fn new(config: Config, service: PredictionService) -> Self {
        Self {
            config: Arc::new(config),
            service: Arc::new(service),
            started_at: Utc::now(),
        }
    }
}

/// Build the application router
pub fn router(state: ServerState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index_page))
        .route("/api/catalog", get(http::catalog_handler))
        .route("/api/tier/{years}", get(http::tier_handler))
        .route("/api/predict", post(http::predict_handler))
        .route("/api/history", get(http::history_handler))
        .route("/api/metrics", get(http::metrics_handler))
        .route("/api/status", get(http::status_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the web server
pub async fn start(config: Config, host: &str, port: u16) -> Result<()> {
    let service = PredictionService::from_config(&config)?;
    let model = service.predictor_description();
    let log_path = service.log().path().to_path_buf();
    let state = ServerState::new(config, service);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    let app = router(state);

    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("     Employee Salary Predictor");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!();
    println!("✓ Model: {}", model);
    println!("✓ Evaluation log: {}", log_path.display());
    println!();
    println!("🚀 Listening on http://{}", addr);
    println!();

    info!("Serving salary predictor on {}", addr);
    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;

    Ok(())
}

/// Handler for the index page
async fn index_page() -> Html<&'static str> {
    Html(page::INDEX_HTML)
}
