use tabled::Table;

use crate::{catalog::OpStatus, cli, error, info, success, utils, warning};

pub async fn list_favorites() {
    let catalog = cli::open_catalog().await;
    let favorites = catalog.favorites().await;

    if favorites.is_empty() {
        info!("No favorites yet. Add one with `cinelist favorites add <movie-id>`.");
        return;
    }

    let rows = utils::movie_rows(&favorites, &favorites);
    println!("{}", Table::new(rows));
    info!("{} favorites", favorites.len());
}

pub async fn add_favorite(movie_id: String) {
    let catalog = cli::open_catalog().await;

    if catalog.is_favorite(&movie_id).await {
        info!("Movie {} is already a favorite", movie_id);
        return;
    }

    let Some(movie) = cli::resolve_movie(&catalog, &movie_id).await else {
        error!("Movie {} not found", movie_id);
    };

    match catalog.add_to_favorites(&movie).await {
        OpStatus::Applied(_) => success!("Added {} to favorites", movie.title),
        OpStatus::Skipped => warning!("Favorites are not available right now"),
        OpStatus::Failed { message, .. } => warning!("{}", message),
    }
}

pub async fn remove_favorite(movie_id: String) {
    let catalog = cli::open_catalog().await;

    if !catalog.is_favorite(&movie_id).await {
        info!("Movie {} is not a favorite", movie_id);
        return;
    }

    match catalog.remove_from_favorites(&movie_id).await {
        OpStatus::Applied(_) => success!("Removed {} from favorites", movie_id),
        OpStatus::Skipped => warning!("Favorites are not available right now"),
        OpStatus::Failed { message, .. } => warning!("{}", message),
    }
}
