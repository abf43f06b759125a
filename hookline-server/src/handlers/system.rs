use axum::{Json, extract::State, http::StatusCode};
use serde_json::{Value, json};
use tracing::{info, warn};

use crate::AppState;

pub async fn ping() -> Json<Value> {
    info!("Ping endpoint called");
    Json(json!({
        "status": "ok",
        "message": "Hookline is running",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Reports 503 when the activity store cannot be reached.
pub async fn health(
    State(state): State<AppState>,
) -> (StatusCode, Json<Value>) {
    let mut health_status = json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "checks": {}
    });

    let status = match state.store().ping().await {
        Ok(()) => {
            health_status["checks"]["store"] = json!({ "status": "healthy" });
            StatusCode::OK
        }
        Err(e) => {
            warn!(error = %e, "Activity store health check failed");
            health_status["checks"]["store"] = json!({
                "status": "unhealthy",
                "error": e.to_string()
            });
            health_status["status"] = json!("unhealthy");
            StatusCode::SERVICE_UNAVAILABLE
        }
    };

    (status, Json(health_status))
}
