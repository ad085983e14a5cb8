//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, routing)
//!     → request.rs (request ID, request span)
//!     → handlers.rs (decode body, call the movie store)
//!     → response.rs (map movie errors to status codes and JSON bodies)
//!     → Send to client
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::{RequestIdExt, RequestSpan, X_REQUEST_ID};
pub use response::ErrorBody;
pub use server::{AppState, HttpServer};
