//! Request and response DTOs for the API.

use serde::{Deserialize, Serialize};

/// POST /api/review body.
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewBody {
    /// Code to review.
    #[serde(default)]
    pub code: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
    /// Model identifier reviews run against.
    pub model: String,
    /// Whether a review is currently running.
    pub busy: bool,
    /// Uptime in seconds.
    pub uptime_seconds: u64,
}
