//! HTTP error responses.

use crate::service::ServiceError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use serde_json::json;

/// The single JSON error shape every failed request produces:
/// `{statusCode, timestamp, path, error, message}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: u16,
    pub error: &'static str,
    pub message: String,
    pub path: String,
}

impl ApiError {
    pub fn from_service(err: ServiceError, path: &str) -> Self {
        let status = err.http_status();
        Self {
            status,
            error: status_label(status),
            message: err.to_string(),
            path: path.to_string(),
        }
    }
}

fn status_label(status: u16) -> &'static str {
    match status {
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        422 => "Unprocessable Entity",
        429 => "Too Many Requests",
        _ => "Internal Server Error",
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = Json(json!({
            "statusCode": self.status,
            "timestamp": Utc::now().to_rfc3339(),
            "path": self.path,
            "error": self.error,
            "message": self.message,
        }));
        (status, body).into_response()
    }
}
