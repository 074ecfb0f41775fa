//! HTTP mapping for store errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use oms_core::{ErrorKind, OmsError};

use crate::api_types::ErrorResponse;

/// Handler error: an [`OmsError`] rendered as a JSON body.
#[derive(Debug)]
pub struct ApiError(pub OmsError);

impl From<OmsError> for ApiError {
    fn from(err: OmsError) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self.0.kind() {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::InvalidStatus
            | ErrorKind::AlreadyTerminal
            | ErrorKind::InvalidTransition => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            detail: self.0.to_string(),
            kind: self.0.kind().as_str().to_string(),
        };
        (status, Json(body)).into_response()
    }
}
