use tabled::Table;

use crate::{
    card, cli, error, info, success,
    types::{MoviePatch, NewMovie},
    utils,
};

pub async fn list_movies() {
    let catalog = cli::open_catalog().await;
    let movies = catalog.custom_movies().await;

    if movies.is_empty() {
        info!("No custom movies yet");
        return;
    }

    let favorites = catalog.favorites().await;
    println!("{}", Table::new(utils::movie_rows(&movies, &favorites)));
}

pub async fn add_movie(data: NewMovie) {
    let catalog = cli::open_catalog().await;

    match catalog.add_custom_movie(data).await {
        Ok(movie) => success!("Added custom movie {} ({})", movie.title, movie.id),
        Err(e) => error!("{}", e),
    }
}

pub async fn update_movie(movie_id: String, patch: MoviePatch) {
    if patch == MoviePatch::default() {
        info!("Nothing to update");
        return;
    }

    let catalog = cli::open_catalog().await;
    match catalog.update_custom_movie(&movie_id, patch).await {
        Ok(movie) => success!("Updated {} ({})", movie.title, movie.id),
        Err(e) => error!("{}", e),
    }
}

pub async fn delete_movie(movie_id: String) {
    let catalog = cli::open_catalog().await;

    match catalog.delete_custom_movie(&movie_id).await {
        Ok(()) => success!("Deleted custom movie {}", movie_id),
        Err(e) => error!("{}", e),
    }
}

/// Opens the TMDB page of a movie in the browser.
pub async fn open_movie(movie_id: String) {
    let catalog = cli::open_catalog().await;
    let Some(movie) = cli::resolve_movie(&catalog, &movie_id).await else {
        error!("Movie {} not found", movie_id);
    };

    let Some(url) = card::details_url(&movie) else {
        info!("{} is a custom movie and has no TMDB page", movie.title);
        return;
    };

    info!("Opening {}", url);
    if let Err(e) = webbrowser::open(&url) {
        error!("Failed to open browser: {}", e);
    }
}
