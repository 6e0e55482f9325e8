//! # Store Module
//!
//! The persistence seam of the catalog. [`MovieStore`] is the CRUD contract the
//! state container delegates every durable write to; it is the only way lists
//! and custom movies are read or changed.
//!
//! Two implementations ship with the crate:
//!
//! - [`HttpStore`] talks to the local data API over REST (the embedded server
//!   started by `cinelist serve`, or anything speaking the same shape).
//! - [`MemoryStore`] keeps the records in process, optionally backed by a JSON
//!   database file. The embedded server is built on top of it.
//!
//! ## REST shape
//!
//! ```text
//! GET    /lists                       -> [List]
//! POST   /lists                       -> List
//! PATCH  /lists/{id}                  -> List
//! DELETE /lists/{id}                  -> 204
//! POST   /lists/{id}/movies           -> List
//! DELETE /lists/{id}/movies/{movie}   -> List
//! GET    /movies                      -> [Movie]
//! POST   /movies                      -> Movie
//! PATCH  /movies/{id}                 -> Movie
//! DELETE /movies/{id}                 -> 204
//! ```

mod http;
mod memory;

use async_trait::async_trait;
use thiserror::Error;

use crate::types::{List, ListPatch, Movie, MoviePatch};

pub use http::HttpStore;
pub use memory::MemoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("store answered {status}: {body}")]
    Status { status: u16, body: String },

    #[error("{entity} '{id}' not found")]
    NotFound { entity: &'static str, id: String },

    #[error("{entity} '{id}' already exists")]
    Conflict { entity: &'static str, id: String },

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn conflict(entity: &'static str, id: impl Into<String>) -> Self {
        Self::Conflict {
            entity,
            id: id.into(),
        }
    }
}

/// CRUD contract over lists and custom movies.
///
/// Every list-mutating call returns the full list as stored after the change.
/// Callers treat that value as authoritative and never patch lists locally.
#[async_trait]
pub trait MovieStore: Send + Sync {
    /// Every list, the favorites list included.
    async fn get_lists(&self) -> Result<Vec<List>, StoreError>;

    /// Stores a new list. An empty id is replaced by a generated one; an id
    /// already taken is a [`StoreError::Conflict`].
    async fn create_list(&self, list: &List) -> Result<List, StoreError>;

    async fn update_list(&self, id: &str, patch: &ListPatch) -> Result<List, StoreError>;

    async fn delete_list(&self, id: &str) -> Result<(), StoreError>;

    /// Every custom movie, of every user.
    async fn get_custom_movies(&self) -> Result<Vec<Movie>, StoreError>;

    async fn create_movie(&self, movie: &Movie) -> Result<Movie, StoreError>;

    /// Applies the set fields of `patch` and returns the stored movie.
    async fn update_movie(&self, id: &str, patch: &MoviePatch) -> Result<Movie, StoreError>;

    async fn delete_movie(&self, id: &str) -> Result<(), StoreError>;

    /// Appends `movie` to the list. Duplicates are not rejected.
    async fn add_movie_to_list(&self, list_id: &str, movie: &Movie) -> Result<List, StoreError>;

    /// Drops every entry of `movie_id` from the list. A movie that is not on
    /// the list leaves it unchanged.
    async fn remove_movie_from_list(
        &self,
        list_id: &str,
        movie_id: &str,
    ) -> Result<List, StoreError>;
}
