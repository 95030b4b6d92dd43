//! DTOs for health check endpoints.

use serde::Serialize;

/// Overall service health response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub checks: HealthChecks,
}

/// Per-component health checks.
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub database: CheckStatus,
}

/// Health status of an individual component.
#[derive(Debug, Serialize)]
pub struct CheckStatus {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Liveness message returned by `GET /`.
#[derive(Debug, Serialize)]
pub struct StatusMessage {
    pub message: &'static str,
}
