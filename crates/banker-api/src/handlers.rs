//! REST API handlers.
//!
//! Successful responses are the bare analysis result. A scenario that fails
//! the shape check gets a 422 with `{"success": false, "error": ...}`.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use tracing::warn;

use banker_core::{Scenario, ScenarioError};

use crate::ApiState;
use crate::metrics::{Operation, render_prometheus};

/// Error body, shaped like the rest of the service's failures.
#[derive(serde::Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
}

fn error_response(msg: &str, status: StatusCode) -> Response {
    (
        status,
        Json(ErrorResponse {
            success: false,
            error: msg.to_string(),
        }),
    )
        .into_response()
}

fn rejected(state: &ApiState, op: Operation, err: ScenarioError) -> Response {
    state.metrics.record_rejected(op);
    warn!(operation = op.label(), error = %err, "scenario rejected");
    error_response(&err.to_string(), StatusCode::UNPROCESSABLE_ENTITY)
}

/// Body for the two-scenario endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonRequest {
    pub scenario_a: Scenario,
    pub scenario_b: Scenario,
}

// ── Service ────────────────────────────────────────────────────

/// GET /api/
pub async fn root() -> impl IntoResponse {
    Json(serde_json::json!({ "message": "Banker's Algorithm analysis service" }))
}

/// GET /api/healthz
pub async fn healthz() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ── Validation ─────────────────────────────────────────────────

/// POST /api/banker/validate
pub async fn validate_scenario(
    State(state): State<ApiState>,
    Json(scenario): Json<Scenario>,
) -> Response {
    state.metrics.record_request(Operation::Validate);
    match banker_core::validate(&scenario) {
        Ok(issues) => {
            state.metrics.record_issues(&issues);
            Json(issues).into_response()
        }
        Err(e) => rejected(&state, Operation::Validate, e),
    }
}

/// POST /api/banker/validate/summary
pub async fn summarize_scenario(
    State(state): State<ApiState>,
    Json(scenario): Json<Scenario>,
) -> Response {
    state.metrics.record_request(Operation::Summary);
    match banker_core::summarize(&scenario) {
        Ok(summary) => Json(summary).into_response(),
        Err(e) => rejected(&state, Operation::Summary, e),
    }
}

// ── Comparison ─────────────────────────────────────────────────

/// POST /api/banker/compare
pub async fn compare_scenarios(
    State(state): State<ApiState>,
    Json(req): Json<ComparisonRequest>,
) -> Response {
    state.metrics.record_request(Operation::Compare);
    match banker_core::compare(&req.scenario_a, &req.scenario_b) {
        Ok(metrics) => Json(metrics).into_response(),
        Err(e) => rejected(&state, Operation::Compare, e),
    }
}

/// POST /api/banker/diff
pub async fn diff_scenarios(
    State(state): State<ApiState>,
    Json(req): Json<ComparisonRequest>,
) -> Response {
    state.metrics.record_request(Operation::Diff);
    match banker_core::diff(&req.scenario_a, &req.scenario_b) {
        Ok(diff) => Json(diff).into_response(),
        Err(e) => rejected(&state, Operation::Diff, e),
    }
}

// ── Prometheus ─────────────────────────────────────────────────

/// GET /metrics
pub async fn prometheus_metrics(State(state): State<ApiState>) -> impl IntoResponse {
    let body = render_prometheus(&state.metrics.snapshot());
    (
        StatusCode::OK,
        [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
        body,
    )
}
