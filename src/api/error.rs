use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::{error, warn};

use crate::error::ClimateError;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}

impl ClimateError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ClimateError::InvalidDate { .. } | ClimateError::InvalidRange { .. } => {
                StatusCode::BAD_REQUEST
            }
            ClimateError::NoData { .. } => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ClimateError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = if self.is_client_error() {
            warn!("Rejected request: {}", self);
            self.to_string()
        } else {
            error!("Request failed: {}", self);
            "internal server error".to_string()
        };

        let body = ErrorBody {
            error: self.kind(),
            message,
        };
        (status, Json(body)).into_response()
    }
}
