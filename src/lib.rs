//! In-memory movie record service library.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod movies;
pub mod observability;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use movies::{Movie, MovieStore};
