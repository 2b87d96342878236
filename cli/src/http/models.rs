//! Response bodies and the HTTP error type.

use std::collections::HashMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use trajview_core::api::{JoinRow, JoinSummary, LoadError};

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub session_id: String,
    pub data_source: String,
    pub uptime_seconds: u64,
    pub requests_handled: u64,
    pub errors: u64,
    pub requests_by_route: HashMap<String, u64>,
    pub timestamp: String,
}

/// Body of `GET /api/join`. `rows` honours `diff_only`; `summary` covers all rows.
#[derive(Debug, Serialize)]
pub struct JoinResponse {
    pub left: String,
    pub right: String,
    pub summary: JoinSummary,
    pub rows: Vec<JoinRow>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub error_code: &'static str,
}

/// Handler failure, rendered as a JSON `ErrorResponse`.
#[derive(Debug)]
pub enum HttpServerError {
    InvalidRequest(String),
    Load(LoadError),
}

impl From<LoadError> for HttpServerError {
    fn from(e: LoadError) -> Self {
        HttpServerError::Load(e)
    }
}

// 400 for bad queries, 404 for missing data, 502 for any other load failure.
impl IntoResponse for HttpServerError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            HttpServerError::InvalidRequest(m) => (StatusCode::BAD_REQUEST, "INVALID_REQUEST", m),
            HttpServerError::Load(e) if e.is_not_found() => {
                (StatusCode::NOT_FOUND, "NOT_FOUND", e.to_string())
            }
            HttpServerError::Load(e) => (StatusCode::BAD_GATEWAY, "LOAD_FAILED", e.to_string()),
        };
        let body = ErrorResponse {
            success: false,
            error: message,
            error_code: code,
        };
        (status, Json(body)).into_response()
    }
}
