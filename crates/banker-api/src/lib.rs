//! banker-api: REST API for scenario analysis.
//!
//! # API Routes
//!
//! | Method | Path | Description |
//! |---|---|---|
//! | GET | `/api/` | Service greeting |
//! | GET | `/api/healthz` | Liveness probe |
//! | POST | `/api/banker/validate` | Detect mistakes in a scenario |
//! | POST | `/api/banker/validate/summary` | Pass/fail plus messages |
//! | POST | `/api/banker/compare` | Paired metrics and divergence score |
//! | POST | `/api/banker/diff` | Cell-wise diff of two scenarios |
//! | GET | `/metrics` | Prometheus exposition |

pub mod handlers;
pub mod metrics;

use std::sync::Arc;

use axum::Router;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use metrics::RequestMetrics;

/// Shared state for API handlers.
#[derive(Clone, Default)]
pub struct ApiState {
    pub metrics: Arc<RequestMetrics>,
}

/// Build the complete API router (analysis routes + metrics).
pub fn build_router(state: ApiState, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/api/", get(handlers::root))
        .route("/api/healthz", get(handlers::healthz))
        .route("/api/banker/validate", post(handlers::validate_scenario))
        .route("/api/banker/validate/summary", post(handlers::summarize_scenario))
        .route("/api/banker/compare", post(handlers::compare_scenarios))
        .route("/api/banker/diff", post(handlers::diff_scenarios))
        .route("/metrics", get(handlers::prometheus_metrics))
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS policy for the configured origins. `*` allows any origin without
/// credentials; an explicit list allows credentials and mirrors the
/// request's method and headers.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
