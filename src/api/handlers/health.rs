//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Components Checked
///
/// 1. **Database**: Trivial query against the link store
/// 2. **Rate limit store**: Redis PING (always ok for the in-process store)
/// 3. **Click queue**: Checks that the worker is still receiving
///
/// # Response
///
/// ```json
/// {
///   "ok": true,
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "database": { "status": "ok", "message": "Connected" },
///     "rate_limit_store": { "status": "ok", "message": "Connected" },
///     "click_queue": { "status": "ok", "message": "Queued: 0/10000" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let (database, rate_limit_store) =
        tokio::join!(check_database(&state), check_rate_limit_store(&state));
    let click_queue = check_click_queue(&state);

    let all_healthy = database.is_ok() && rate_limit_store.is_ok() && click_queue.is_ok();

    let response = HealthResponse {
        ok: all_healthy,
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            database,
            rate_limit_store,
            click_queue,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_database(state: &AppState) -> CheckStatus {
    if state.link_service.health_check().await {
        CheckStatus::ok("Connected")
    } else {
        CheckStatus::error("Database connection failed")
    }
}

async fn check_rate_limit_store(state: &AppState) -> CheckStatus {
    if state.rate_limiter.health_check().await {
        CheckStatus::ok("Connected")
    } else {
        CheckStatus::error("Rate limit store connection failed")
    }
}

fn check_click_queue(state: &AppState) -> CheckStatus {
    let recorder = state.redirect_service.click_recorder();

    if recorder.is_closed() {
        CheckStatus::error("Click queue is closed")
    } else {
        CheckStatus::ok(format!(
            "Queued: {}/{}",
            recorder.queued(),
            recorder.capacity()
        ))
    }
}
