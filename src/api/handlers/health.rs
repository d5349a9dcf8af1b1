//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /healthz`
///
/// # Response Codes
///
/// - **200 OK**: Database reachable
/// - **503 Service Unavailable**: Database ping failed
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "ok": true,
///   "version": "0.1.0",
///   "uptime_seconds": 42,
///   "timestamp": "2025-01-01T00:00:00Z",
///   "checks": {
///     "database": { "status": "ok", "message": "Connected" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let db_check = check_database(&state).await;
    let healthy = db_check.status == "ok";

    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        ok: healthy,
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        timestamp: Utc::now(),
        checks: HealthChecks { database: db_check },
    };

    if healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_database(state: &AppState) -> CheckStatus {
    match state.link_service.check_store().await {
        Ok(()) => CheckStatus {
            status: "ok".to_string(),
            message: Some("Connected".to_string()),
        },
        Err(e) => {
            tracing::warn!(error = %e, "Health check: database unreachable");
            CheckStatus {
                status: "error".to_string(),
                message: Some(format!("Database error: {}", e)),
            }
        }
    }
}
