//! # TMDB Integration Module
//!
//! Read-only client for The Movie Database v3 API. It supplies catalog movies
//! the user can favorite or put on lists; the catalog itself never depends on
//! it.
//!
//! TMDB answers movies with numeric ids and relative `poster_path` values.
//! Both deserialize straight into [`crate::types::Movie`]; the card module
//! turns the poster path into a full image URL.
//!
//! ## API Coverage
//!
//! - `GET /search/movie` - search by title
//! - `GET /movie/{id}` - details of one movie

pub mod movies;

pub use movies::TmdbClient;
