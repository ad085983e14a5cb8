//! Movie record types and their JSON shape.
//!
//! ```text
//! Movie    = { id: string, isbn: integer, title: string, director: Director | null }
//! Director = { firstName: string, lastName: string }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::movies::error::{MovieError, MovieResult};

/// Identifier of a movie within the collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct MovieId(String);

impl MovieId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh random (UUID v4) identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Director of a movie. Owned by exactly one [`Movie`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Director {
    pub first_name: String,
    pub last_name: String,
}

impl Director {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }
}

/// A stored movie record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Movie {
    pub id: MovieId,
    pub isbn: i64,
    pub title: String,
    pub director: Option<Director>,
}

/// Client-supplied movie fields.
///
/// Any `id` present in the payload is ignored: identity is always decided by
/// the server. Missing fields fall back to their zero values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct MovieDraft {
    pub isbn: i64,
    pub title: String,
    pub director: Option<Director>,
}

impl MovieDraft {
    /// Decode a draft from a raw JSON request body.
    pub fn from_json(body: &[u8]) -> MovieResult<Self> {
        serde_json::from_slice(body).map_err(MovieError::MalformedPayload)
    }

    /// Attach an identifier, producing the record to store.
    pub fn into_movie(self, id: MovieId) -> Movie {
        Movie {
            id,
            isbn: self.isbn,
            title: self.title,
            director: self.director,
        }
    }
}

/// The records present in the collection at startup.
pub fn seed_movies() -> Vec<Movie> {
    vec![
        Movie {
            id: MovieId::new("1"),
            isbn: 438227,
            title: "Movie 1".to_string(),
            director: Some(Director::new("John", "Doe")),
        },
        Movie {
            id: MovieId::new("2"),
            isbn: 45445,
            title: "Movie 2".to_string(),
            director: Some(Director::new("Steve", "Smith")),
        },
    ]
}
