use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use mindtrack_core::guard::{GuardConfig, InputGuard};
use mindtrack_core::history::{FileStore, HistoryStore};
use serde::Serialize;
use tokio::sync::Mutex;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod checkin;
mod error;
mod extract;
mod gateway;
mod middleware;
mod routes;
mod state;

use checkin::CheckInService;
use gateway::{AnalysisGateway, GatewayConfig};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "MindTrack API",
        version = "0.1.0",
        description = "Mood check-in analysis: free text in, structured sentiment/stress assessment out, with a local 7-day trend."
    ),
    paths(
        routes::health::health_check,
        routes::checkins::create_check_in,
        routes::history::list_history,
        routes::history::get_trend,
        routes::history::clear_history,
    ),
    components(schemas(
        HealthResponse,
        routes::checkins::CheckInRequest,
        routes::history::TrendResponse,
        mindtrack_core::error::ApiError,
        mindtrack_core::mood::Sentiment,
        mindtrack_core::mood::MoodAnalysis,
        mindtrack_core::mood::MoodHistory,
        mindtrack_core::trend::TrendBucket,
    ))
)]
struct ApiDoc;

#[derive(Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Directory holding the persisted history log.
fn data_dir() -> PathBuf {
    std::env::var("MINDTRACK_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("mindtrack")
        })
}

#[tokio::main]
async fn main() {
    // Load .env if present (dev only)
    let _ = dotenvy::dotenv();

    // Structured JSON logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mindtrack_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    let gateway_config = GatewayConfig::from_env();
    if gateway_config.api_key.is_none() {
        tracing::warn!("MINDTRACK_AI_API_KEY is not set; check-ins will fail as unavailable");
    }

    let service = CheckInService::new(
        InputGuard::new(GuardConfig::default()),
        AnalysisGateway::new(gateway_config),
    );

    let history = HistoryStore::load(FileStore::new(data_dir()));

    let app_state = state::AppState {
        service: Arc::new(service),
        history: Arc::new(Mutex::new(history)),
    };

    let app = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .merge(routes::health::router())
        .merge(routes::checkins::router())
        .merge(routes::history::router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::cors::build_cors_layer()),
        )
        .with_state(app_state);

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("MindTrack API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
