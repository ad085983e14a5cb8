//! In-memory movie collection.
//!
//! # Responsibilities
//! - Hold the ordered list of movies for the lifetime of the process
//! - Assign identifiers to newly created movies
//! - Serialize all access behind one lock
//!
//! Nothing is persisted: the collection is dropped with the process.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::movies::error::{MovieError, MovieResult};
use crate::movies::model::{seed_movies, Movie, MovieDraft, MovieId};

/// Ordered, lock-guarded collection of movies.
#[derive(Debug, Default)]
pub struct MovieStore {
    movies: RwLock<Vec<Movie>>,
}

impl MovieStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the given movies, in order.
    pub fn with_movies(movies: Vec<Movie>) -> Self {
        Self {
            movies: RwLock::new(movies),
        }
    }

    /// Create a store holding the two startup records.
    pub fn seeded() -> Self {
        Self::with_movies(seed_movies())
    }

    /// Snapshot of the whole collection in insertion order.
    pub fn list(&self) -> Vec<Movie> {
        self.read().clone()
    }

    /// First movie whose id matches.
    pub fn get(&self, id: &MovieId) -> MovieResult<Movie> {
        self.read()
            .iter()
            .find(|movie| &movie.id == id)
            .cloned()
            .ok_or_else(|| MovieError::NotFound(id.clone()))
    }

    /// Append a new movie built from `draft` and return it with its assigned id.
    pub fn create(&self, draft: MovieDraft) -> Movie {
        let mut movies = self.write();

        // UUIDs practically never collide, but the id must be unused here.
        let id = loop {
            let candidate = MovieId::generate();
            if !movies.iter().any(|movie| movie.id == candidate) {
                break candidate;
            }
        };

        let movie = draft.into_movie(id);
        movies.push(movie.clone());
        movie
    }

    /// Replace the movie with the given id, keeping its position.
    ///
    /// `replacement` is only invoked once the id is known to exist. If it
    /// fails, the collection is left untouched.
    pub fn update<F>(&self, id: &MovieId, replacement: F) -> MovieResult<Movie>
    where
        F: FnOnce() -> MovieResult<MovieDraft>,
    {
        let mut movies = self.write();

        let slot = movies
            .iter_mut()
            .find(|movie| &movie.id == id)
            .ok_or_else(|| MovieError::NotFound(id.clone()))?;

        let movie = replacement()?.into_movie(id.clone());
        *slot = movie.clone();
        Ok(movie)
    }

    /// Remove the movie with the given id and return the remaining collection.
    pub fn delete(&self, id: &MovieId) -> MovieResult<Vec<Movie>> {
        let mut movies = self.write();

        let index = movies
            .iter()
            .position(|movie| &movie.id == id)
            .ok_or_else(|| MovieError::NotFound(id.clone()))?;

        movies.remove(index);
        Ok(movies.clone())
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // A panic while holding the lock cannot leave a half-applied mutation
    // behind, so a poisoned lock still guards a consistent collection.
    fn read(&self) -> RwLockReadGuard<'_, Vec<Movie>> {
        self.movies.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Movie>> {
        self.movies.write().unwrap_or_else(PoisonError::into_inner)
    }
}
