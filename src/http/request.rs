//! Request identification.
//!
//! # Responsibilities
//! - Generate a UUID request ID when the client did not send one
//! - Echo the request ID back on the response
//! - Attach the request ID to the tracing span of the request
//! - Extract the movie id from the path, rejecting with a JSON error
//!
//! The ID is set by the outermost layer so every log line of a request carries it.

use axum::extract::{FromRequestParts, Path};
use axum::http::{request::Parts, Request};
use axum::response::Response;
use tower_http::request_id::{
    MakeRequestUuid, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::MakeSpan;
use tracing::Span;

use crate::http::response::error_response;
use crate::movies::MovieId;

/// Header carrying the request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Layer that assigns `x-request-id` to incoming requests lacking one.
pub fn set_request_id_layer() -> SetRequestIdLayer<MakeRequestUuid> {
    SetRequestIdLayer::x_request_id(MakeRequestUuid)
}

/// Layer that copies `x-request-id` from the request onto the response.
pub fn propagate_request_id_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::x_request_id()
}

/// Access to the request ID assigned by [`set_request_id_layer`].
pub trait RequestIdExt {
    fn request_id(&self) -> &str;
}

impl<B> RequestIdExt for Request<B> {
    fn request_id(&self) -> &str {
        self.extensions()
            .get::<RequestId>()
            .and_then(|id| id.header_value().to_str().ok())
            .unwrap_or("unknown")
    }
}

/// Span factory for `TraceLayer` that records the request ID.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestSpan;

impl<B> MakeSpan<B> for RequestSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        tracing::info_span!(
            "request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = %request.request_id(),
        )
    }
}

/// The `{id}` path segment of a movie route.
#[derive(Debug, Clone)]
pub struct MovieIdPath(pub MovieId);

impl<S> FromRequestParts<S> for MovieIdPath
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<MovieId>::from_request_parts(parts, state).await {
            Ok(Path(id)) => Ok(Self(id)),
            Err(rejection) => {
                tracing::debug!(error = %rejection, "Rejected movie id in path");
                Err(error_response(rejection.status(), rejection.body_text()))
            }
        }
    }
}
