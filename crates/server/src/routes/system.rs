//! Health and status routes.

use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::state::AppState;

/// Response for the health probe.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub timestamp: DateTime<Utc>,
}

/// Liveness probe.
///
/// GET /api/health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        message: "OfficeBar server is running",
        timestamp: Utc::now(),
    })
}

/// Per-channel configuration flags.
#[derive(Debug, Serialize)]
pub struct ChannelFlags {
    pub telegram: &'static str,
    pub discord: &'static str,
    pub gmail: &'static str,
}

/// Response for the status endpoint.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub server: &'static str,
    pub notifications: ChannelFlags,
    pub database: &'static str,
    pub timestamp: DateTime<Utc>,
}

const fn flag(configured: bool) -> &'static str {
    if configured { "configured" } else { "not configured" }
}

/// Report which notification channels are configured.
///
/// GET /api/status
pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    let config = state.config();

    Json(StatusResponse {
        server: "running",
        notifications: ChannelFlags {
            telegram: flag(config.telegram().is_some()),
            discord: flag(config.discord().is_some()),
            gmail: flag(config.gmail().is_some()),
        },
        database: "in-memory",
        timestamp: Utc::now(),
    })
}
