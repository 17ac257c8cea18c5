//! HTTP response types.

use axum::Json;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::domain::ledger::LedgerError;
use crate::error::{ErrorBody, ErrorCode};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
}

/// A ledger failure rendered as an HTTP error.
#[derive(Debug)]
pub struct ApiError(pub LedgerError);

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = ErrorCode::from(&self.0);
        if code == ErrorCode::InternalError {
            tracing::error!(error = %self.0, "Request failed");
        }
        (code.http_status(), Json(ErrorBody::from(&self.0))).into_response()
    }
}

/// Handler result type.
pub type ApiResult<T> = Result<Json<T>, ApiError>;
