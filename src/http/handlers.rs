//! Movie route handlers.
//!
//! | Method | Path           | Handler        |
//! |--------|----------------|----------------|
//! | GET    | /movies        | `list_movies`  |
//! | GET    | /movies/{id}   | `get_movie`    |
//! | POST   | /movies        | `create_movie` |
//! | PUT    | /movies/{id}   | `update_movie` |
//! | DELETE | /movies/{id}   | `delete_movie` |
//! | GET    | /health        | `get_health`   |
//!
//! Unknown routes and unsupported methods fall through to `route_not_found`
//! and `method_not_allowed`, which answer with the same JSON error body.
//!
//! Bodies are taken as raw bytes and decoded here, so a malformed payload is
//! always a 400 whatever `Content-Type` the client sent.

use axum::{
    body::Bytes,
    extract::State,
    http::{Method, StatusCode, Uri},
    response::Response,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::http::request::MovieIdPath;
use crate::http::response::error_response;
use crate::http::server::AppState;
use crate::movies::{Movie, MovieDraft, MovieError};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub movies: usize,
}

pub async fn list_movies(State(state): State<AppState>) -> Json<Vec<Movie>> {
    let movies = state.store.list();
    tracing::debug!(count = movies.len(), "Listing movies");
    Json(movies)
}

pub async fn get_movie(
    State(state): State<AppState>,
    MovieIdPath(id): MovieIdPath,
) -> Result<Json<Movie>, MovieError> {
    let movie = state.store.get(&id).inspect_err(log_failure)?;
    Ok(Json(movie))
}

pub async fn create_movie(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Movie>, MovieError> {
    let draft = MovieDraft::from_json(&body).inspect_err(log_failure)?;
    let movie = state.store.create(draft);

    tracing::info!(movie_id = %movie.id, title = %movie.title, "Movie created");
    Ok(Json(movie))
}

pub async fn update_movie(
    State(state): State<AppState>,
    MovieIdPath(id): MovieIdPath,
    body: Bytes,
) -> Result<Json<Movie>, MovieError> {
    let movie = state
        .store
        .update(&id, || MovieDraft::from_json(&body))
        .inspect_err(log_failure)?;

    tracing::info!(movie_id = %movie.id, title = %movie.title, "Movie updated");
    Ok(Json(movie))
}

pub async fn delete_movie(
    State(state): State<AppState>,
    MovieIdPath(id): MovieIdPath,
) -> Result<Json<Vec<Movie>>, MovieError> {
    let remaining = state.store.delete(&id).inspect_err(log_failure)?;

    tracing::info!(movie_id = %id, remaining = remaining.len(), "Movie deleted");
    Ok(Json(remaining))
}

pub async fn get_health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        movies: state.store.len(),
    })
}

pub async fn route_not_found(uri: Uri) -> Response {
    error_response(StatusCode::NOT_FOUND, format!("no route for {}", uri.path()))
}

pub async fn method_not_allowed(method: Method, uri: Uri) -> Response {
    error_response(
        StatusCode::METHOD_NOT_ALLOWED,
        format!("method {} not allowed on {}", method, uri.path()),
    )
}

fn log_failure(err: &MovieError) {
    match err {
        MovieError::NotFound(id) => tracing::debug!(movie_id = %id, "Movie not found"),
        MovieError::MalformedPayload(e) => tracing::warn!(error = %e, "Rejected movie payload"),
    }
}
