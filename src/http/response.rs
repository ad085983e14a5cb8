//! Error responses.
//!
//! Every failure is answered with a JSON body `{ "error": "<message>" }`:
//! - `MovieError::MalformedPayload` → 400 Bad Request
//! - `MovieError::NotFound` → 404 Not Found
//! - undecodable path id → 400 Bad Request
//! - unknown route → 404 Not Found, known route with wrong method → 405
//!
//! Encoding failures of successful responses are reported by axum's `Json`
//! responder as 500 Internal Server Error.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::movies::MovieError;

/// JSON body of an error response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl MovieError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            MovieError::NotFound(_) => StatusCode::NOT_FOUND,
            MovieError::MalformedPayload(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for MovieError {
    fn into_response(self) -> Response {
        error_response(self.status_code(), self.to_string())
    }
}

/// Build a JSON error response.
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    let body = ErrorBody {
        error: message.into(),
    };
    (status, Json(body)).into_response()
}
