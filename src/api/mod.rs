//! # API Module
//!
//! HTTP endpoints of the embedded local data API started by `cinelist serve`.
//! They expose a [`crate::store::MemoryStore`] over the REST shape that
//! [`crate::store::HttpStore`] consumes, so the catalog can run against a
//! durable local backend without any external service.
//!
//! ## Endpoints
//!
//! ### Lists
//!
//! - [`get_lists`], [`create_list`], [`update_list`], [`delete_list`]
//! - [`add_movie`] / [`remove_movie`] - change the movies of one list and
//!   answer the full list
//!
//! ### Custom movies
//!
//! - [`get_movies`], [`create_movie`], [`update_movie`], [`delete_movie`]
//!
//! ### Monitoring
//!
//! - [`health`] - status, version and record counts
//!
//! Store errors map to status codes in [`ApiError`]: missing records answer
//! `404`, duplicate ids `409`, everything else `500`.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use cinelist::{server, store::MemoryStore};
//!
//! let store = Arc::new(MemoryStore::open("db.json").await?);
//! let app = server::router(store);
//! ```

mod error;
mod health;
mod lists;
mod movies;

pub use error::ApiError;
pub use health::health;
pub use lists::{add_movie, create_list, delete_list, get_lists, remove_movie, update_list};
pub use movies::{create_movie, delete_movie, get_movies, update_movie};
