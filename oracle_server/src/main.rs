//! # oracle-server
//!
//! REST API server exposing spending-forecast predictions from the
//! spend_oracle pipeline. The model handle is loaded once at startup and
//! shared read-only across requests; if loading fails the server still
//! starts and the prediction routes answer 503.

use axum::{
    routing::{get, post},
    Json, Router,
};
use spend_oracle::forecaster::{SampleForecaster, DEFAULT_SAMPLE_COUNT};
use spend_oracle::models::{BootstrapSampler, SmoothingSampler};
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::store::{HttpStore, TransactionStore};

mod routes;
mod store;

const DEFAULT_ALPHA: f64 = 0.3;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Pretrained forecaster handle; None when startup loading failed
    pub model: Option<Arc<dyn SampleForecaster>>,
    /// Transaction store collaborator
    pub store: Arc<dyn TransactionStore>,
    /// Sample paths drawn per forecast
    pub num_samples: usize,
}

/// Liveness probe
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "alive",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Build the forecaster from the environment. Fail-soft: a bad
/// configuration logs and returns None instead of aborting startup.
fn load_model() -> Option<Arc<dyn SampleForecaster>> {
    let kind = env::var("ORACLE_MODEL").unwrap_or_else(|_| "smoothing".to_string());
    match kind.as_str() {
        "smoothing" => {
            let alpha = env::var("ORACLE_ALPHA")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(DEFAULT_ALPHA);
            match SmoothingSampler::new(alpha) {
                Ok(model) => {
                    tracing::info!(model = model.name(), "forecaster loaded");
                    Some(Arc::new(model))
                }
                Err(err) => {
                    tracing::error!(%err, alpha, "could not load smoothing forecaster");
                    None
                }
            }
        }
        "bootstrap" => {
            let model = BootstrapSampler::new();
            tracing::info!(model = model.name(), "forecaster loaded");
            Some(Arc::new(model))
        }
        other => {
            tracing::error!(model = other, "unknown forecaster kind");
            None
        }
    }
}

#[tokio::main]
async fn main() {
    // Load .env file (optional - won't fail if missing)
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "oracle_server=info,spend_oracle=info,tower_http=info".into()),
        )
        .init();

    let store_url =
        env::var("ORACLE_STORE_URL").unwrap_or_else(|_| "http://localhost:3210".to_string());
    let num_samples = env::var("ORACLE_SAMPLES")
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(DEFAULT_SAMPLE_COUNT);

    let state = AppState {
        model: load_model(),
        store: Arc::new(HttpStore::new(store_url)),
        num_samples,
    };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health))
        .route("/api/oracle/predict", post(routes::predict))
        .route("/api/oracle/predict_params", post(routes::predict_params))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);

    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .unwrap_or_else(|_| "8000".to_string())
        .parse()
        .expect("PORT must be a valid number");
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .expect("Invalid HOST:PORT configuration");

    tracing::info!("oracle-server v{} listening on {}", env!("CARGO_PKG_VERSION"), addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
