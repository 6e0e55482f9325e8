//! # CLI Module
//!
//! The command-line front end of cinelist. Every command opens a
//! [`MovieCatalog`] against the configured data API, runs the catalog
//! operation it stands for, and prints the resulting state.
//!
//! ## Command Categories
//!
//! ### Favorites
//!
//! - [`list_favorites`], [`add_favorite`], [`remove_favorite`]
//!
//! ### Lists
//!
//! - [`list_lists`], [`show_list`], [`create_list`], [`rename_list`],
//!   [`delete_list`], [`add_to_list`], [`remove_from_list`]
//!
//! ### Custom movies
//!
//! - [`list_movies`], [`add_movie`], [`update_movie`], [`delete_movie`],
//!   [`open_movie`]
//!
//! ### Catalog
//!
//! - [`search`] - TMDB search rendered as movie cards
//! - [`serve`] - runs the embedded data API in the foreground
//!
//! ## Usage Patterns
//!
//! ```bash
//! cinelist serve &                         # start the local data API
//! cinelist search "blade runner"           # find catalog movies
//! cinelist favorites add 78                # favorite one of them
//! cinelist lists create "Watch Later"
//! cinelist lists add <list-id> 78
//! ```

mod favorites;
mod lists;
mod movies;
mod search;
mod serve;

use std::{sync::Arc, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    catalog::{InitOutcome, MovieCatalog},
    config,
    management::FileKeyValueStore,
    store::HttpStore,
    tmdb::TmdbClient,
    types::Movie,
    utils, warning,
};

pub use favorites::add_favorite;
pub use favorites::list_favorites;
pub use favorites::remove_favorite;
pub use lists::add_to_list;
pub use lists::create_list;
pub use lists::delete_list;
pub use lists::list_lists;
pub use lists::remove_from_list;
pub use lists::rename_list;
pub use lists::show_list;
pub use movies::add_movie;
pub use movies::delete_movie;
pub use movies::list_movies;
pub use movies::open_movie;
pub use movies::update_movie;
pub use search::search;
pub use serve::serve;

/// Builds the catalog from configuration and seeds it from the data API.
async fn open_catalog() -> MovieCatalog {
    let catalog = MovieCatalog::new(
        Arc::new(HttpStore::from_env()),
        Arc::new(FileKeyValueStore::default()),
        config::session(),
    );

    let pb = ProgressBar::new_spinner();
    pb.set_message("Loading your movie data...");
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let outcome = catalog.initialize().await;
    pb.finish_and_clear();

    if let InitOutcome::Degraded {
        recovered_favorites,
    } = outcome
    {
        if let Some(message) = catalog.error().await {
            warning!("{}", message);
        }
        warning!(
            "Working offline from the local backup ({} favorites). Is `cinelist serve` running at {}?",
            recovered_favorites,
            config::api_url()
        );
    }

    catalog
}

/// Looks a movie up among the catalog's records, then on TMDB.
async fn resolve_movie(catalog: &MovieCatalog, movie_id: &str) -> Option<Movie> {
    let state = catalog.snapshot().await;
    if let Some(movie) =
        utils::find_known_movie(movie_id, &state.custom_movies, &state.favorites, &state.lists)
    {
        return Some(movie.clone());
    }

    let client = match TmdbClient::from_env() {
        Ok(client) => client,
        Err(e) => {
            warning!("Movie {} is not known locally and TMDB is not configured: {}", movie_id, e);
            return None;
        }
    };

    match client.get_movie(movie_id).await {
        Ok(movie) => Some(movie),
        Err(e) => {
            warning!("Failed to fetch movie {} from TMDB: {}", movie_id, e);
            None
        }
    }
}
