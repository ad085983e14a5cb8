//! Error definitions for movie operations.

use thiserror::Error;

use crate::movies::model::MovieId;

/// Errors that can occur while reading or mutating the movie collection.
#[derive(Debug, Error)]
pub enum MovieError {
    /// No movie in the collection carries the requested id.
    #[error("movie not found: {0}")]
    NotFound(MovieId),

    /// The request body could not be decoded into a movie.
    #[error("malformed movie payload: {0}")]
    MalformedPayload(#[source] serde_json::Error),
}

/// Result type for movie operations.
pub type MovieResult<T> = Result<T, MovieError>;
