//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, timeout, body limit, metrics)
//! - Bind server to listener
//! - Stop gracefully on shutdown signal

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::DefaultBodyLimit, middleware, routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ServiceConfig;
use crate::http::handlers::{
    create_movie, delete_movie, get_health, get_movie, list_movies, method_not_allowed,
    route_not_found, update_movie,
};
use crate::http::request::{propagate_request_id_layer, set_request_id_layer, RequestSpan};
use crate::lifecycle::shutdown_signal;
use crate::movies::MovieStore;
use crate::observability::metrics;

/// Application state injected into handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: Arc<MovieStore>,
}

/// HTTP server for the movie service.
pub struct HttpServer {
    router: Router,
    store: Arc<MovieStore>,
}

impl HttpServer {
    /// Create a new HTTP server with a store initialized from the configuration.
    pub fn new(config: ServiceConfig) -> Self {
        let store = if config.store.seed {
            MovieStore::seeded()
        } else {
            MovieStore::new()
        };
        Self::with_store(config, Arc::new(store))
    }

    /// Create a new HTTP server serving an existing store.
    pub fn with_store(config: ServiceConfig, store: Arc<MovieStore>) -> Self {
        let state = AppState {
            store: store.clone(),
        };
        let router = Self::build_router(&config, state);
        Self { router, store }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        Router::new()
            .route("/movies", get(list_movies).post(create_movie))
            .route(
                "/movies/{id}",
                get(get_movie).put(update_movie).delete(delete_movie),
            )
            .route("/health", get(get_health))
            .method_not_allowed_fallback(method_not_allowed)
            .fallback(route_not_found)
            .route_layer(middleware::from_fn(metrics::track_requests))
            .with_state(state)
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(config.limits.max_body_size))
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http().make_span_with(RequestSpan))
            .layer(set_request_id_layer())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            movies = self.store.len(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The fully layered router, for driving the service in-process.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the store.
    pub fn store(&self) -> &Arc<MovieStore> {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::handlers::HealthStatus;
    use crate::http::response::ErrorBody;
    use crate::movies::{Director, Movie, MovieId};
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
        response::Response,
    };
    use serde::de::DeserializeOwned;
    use tower::ServiceExt;

    fn server() -> HttpServer {
        HttpServer::new(ServiceConfig::default())
    }

    async fn send(server: &HttpServer, method: Method, uri: &str, body: Option<&str>) -> Response {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(body.map(|b| Body::from(b.to_string())).unwrap_or_default())
            .unwrap();
        server.router().oneshot(request).await.unwrap()
    }

    async fn json<T: DeserializeOwned>(response: Response) -> T {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn is_json(response: &Response) -> bool {
        response.headers().get(header::CONTENT_TYPE).map(|v| v.as_bytes())
            == Some(b"application/json".as_slice())
    }

    #[tokio::test]
    async fn test_list_returns_seed() {
        let server = server();
        let response = send(&server, Method::GET, "/movies", None).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(is_json(&response));
        let movies: Vec<Movie> = json(response).await;
        assert_eq!(movies, crate::movies::seed_movies());
    }

    #[tokio::test]
    async fn test_unseeded_store_lists_empty() {
        let mut config = ServiceConfig::default();
        config.store.seed = false;
        let server = HttpServer::new(config);

        let movies: Vec<Movie> = json(send(&server, Method::GET, "/movies", None).await).await;
        assert!(movies.is_empty());
    }

    #[tokio::test]
    async fn test_get_movie() {
        let server = server();
        let response = send(&server, Method::GET, "/movies/2", None).await;

        assert_eq!(response.status(), StatusCode::OK);
        let movie: Movie = json(response).await;
        assert_eq!(movie.title, "Movie 2");
        assert_eq!(movie.director, Some(Director::new("Steve", "Smith")));
    }

    #[tokio::test]
    async fn test_create_ignores_client_id() {
        let server = server();
        let response = send(
            &server,
            Method::POST,
            "/movies",
            Some(r#"{"id":"1","isbn":9,"title":"X"}"#),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(is_json(&response));
        let movie: Movie = json(response).await;
        assert_ne!(movie.id.as_str(), "1");
        assert_eq!(movie.isbn, 9);
        assert_eq!(movie.director, None);
        assert_eq!(server.store().len(), 3);
        assert_eq!(server.store().get(&movie.id).unwrap(), movie);
    }

    #[tokio::test]
    async fn test_create_malformed_payload() {
        let server = server();
        let response = send(&server, Method::POST, "/movies", Some(r#"{"isbn":"x"}"#)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(is_json(&response));
        let body: ErrorBody = json(response).await;
        assert!(body.error.starts_with("malformed movie payload"));
        assert_eq!(server.store().len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found_everywhere() {
        let server = server();
        let before = server.store().list();

        for (method, body) in [
            (Method::GET, None),
            (Method::PUT, Some(r#"{"isbn":1,"title":"T"}"#)),
            (Method::PUT, Some("{broken")),
            (Method::DELETE, None),
        ] {
            let response = send(&server, method.clone(), "/movies/nope", body).await;
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{method}");
            let body: ErrorBody = json(response).await;
            assert_eq!(body.error, "movie not found: nope");
        }

        assert_eq!(server.store().list(), before);
    }

    #[tokio::test]
    async fn test_update_keeps_id_and_position() {
        let server = server();
        let response = send(
            &server,
            Method::PUT,
            "/movies/1",
            Some(r#"{"id":"99","isbn":5,"title":"New","director":{"firstName":"A","lastName":"B"}}"#),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let movie: Movie = json(response).await;
        assert_eq!(
            movie,
            Movie {
                id: MovieId::new("1"),
                isbn: 5,
                title: "New".to_string(),
                director: Some(Director::new("A", "B")),
            }
        );

        let movies = server.store().list();
        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0], movie);
    }

    #[tokio::test]
    async fn test_update_malformed_payload() {
        let server = server();
        let before = server.store().list();

        let response = send(&server, Method::PUT, "/movies/1", Some("[1,")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(server.store().list(), before);
    }

    #[tokio::test]
    async fn test_delete_returns_remaining() {
        let server = server();
        let response = send(&server, Method::DELETE, "/movies/1", None).await;

        assert_eq!(response.status(), StatusCode::OK);
        let movies: Vec<Movie> = json(response).await;
        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].id.as_str(), "2");

        let response = send(&server, Method::GET, "/movies/1", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_oversized_body_rejected() {
        let mut config = ServiceConfig::default();
        config.limits.max_body_size = 16;
        let server = HttpServer::new(config);

        let body = format!(r#"{{"title":"{}"}}"#, "x".repeat(64));
        let response = send(&server, Method::POST, "/movies", Some(&body)).await;

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(server.store().len(), 2);
    }

    #[tokio::test]
    async fn test_health() {
        let server = server();
        let response = send(&server, Method::GET, "/health", None).await;

        assert_eq!(response.status(), StatusCode::OK);
        let health: HealthStatus = json(response).await;
        assert_eq!(health.status, "ok");
        assert_eq!(health.movies, 2);
    }

    #[tokio::test]
    async fn test_response_carries_request_id() {
        let server = server();
        let response = send(&server, Method::GET, "/movies", None).await;
        assert!(response.headers().contains_key(crate::http::X_REQUEST_ID));
    }

    #[tokio::test]
    async fn test_unsupported_method_is_json_405() {
        let server = server();
        let response = send(&server, Method::PATCH, "/movies", None).await;

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert!(is_json(&response));
        let body: ErrorBody = json(response).await;
        assert_eq!(body.error, "method PATCH not allowed on /movies");
    }

    #[tokio::test]
    async fn test_undecodable_path_id_is_json_400() {
        let server = server();
        let before = server.store().list();

        for method in [Method::GET, Method::DELETE] {
            let response = send(&server, method, "/movies/%FF", None).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert!(is_json(&response));
            let body: ErrorBody = json(response).await;
            assert!(!body.error.is_empty());
        }

        assert_eq!(server.store().list(), before);
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let server = server();
        let response = send(&server, Method::GET, "/nothing", None).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(is_json(&response));
        let body: ErrorBody = json(response).await;
        assert_eq!(body.error, "no route for /nothing");
    }
}
