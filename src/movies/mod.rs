//! Movie records and the in-memory collection that holds them.
//!
//! # Data Flow
//! ```text
//! request body (JSON bytes)
//!     → model.rs (MovieDraft::from_json)
//!     → store.rs (MovieStore assigns ids, reads and mutates the collection)
//!     → Movie / Vec<Movie> serialized back to the client
//! ```
//!
//! # Design Decisions
//! - One store instance, shared through the HTTP application state
//! - Every store operation runs inside a single lock acquisition
//! - Lookups that miss report `MovieError::NotFound`, never a placeholder record
//! - Updates replace the record at its current position

pub mod error;
pub mod model;
pub mod store;

pub use error::MovieError;
pub use model::{seed_movies, Director, Movie, MovieDraft, MovieId};
pub use store::MovieStore;
