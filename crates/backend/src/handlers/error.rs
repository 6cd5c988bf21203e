use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use contracts::shared::error_response::ErrorResponse;
use std::any::Any;

use crate::domain::a001_bank_slip::error::BankSlipError;

fn error_json(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorResponse::new(status.as_u16(), message))).into_response()
}

impl IntoResponse for BankSlipError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            BankSlipError::Storage(e) => tracing::error!("Bank slip storage failure: {:#}", e),
            other => tracing::debug!("Bank slip request failed with {}: {}", status, other),
        }
        error_json(status, self.to_string())
    }
}

/// Any method on /error
pub async fn error_page() -> Response {
    error_json(StatusCode::INTERNAL_SERVER_ERROR, "Unexpected error")
}

/// Fallback for unknown routes
pub async fn not_found() -> Response {
    error_json(StatusCode::NOT_FOUND, "No handler found for the requested path")
}

/// Fallback for a known path hit with an unsupported method
pub async fn method_not_allowed() -> Response {
    error_json(
        StatusCode::METHOD_NOT_ALLOWED,
        "Request method not supported for the requested path",
    )
}

/// Response for a handler that panicked, used with `CatchPanicLayer`
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic"
    };
    tracing::error!("Handler panicked: {}", detail);
    error_json(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
}
