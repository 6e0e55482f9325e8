use tabled::Table;

use crate::{
    catalog::CatalogError,
    cli, error, info, success,
    types::{ListPatch, NewList},
    utils, warning,
};

pub async fn list_lists() {
    let catalog = cli::open_catalog().await;
    let lists = catalog.lists().await;

    if lists.is_empty() {
        info!("No lists found");
        return;
    }

    println!("{}", Table::new(utils::list_rows(&lists)));
}

pub async fn show_list(list_id: String) {
    let catalog = cli::open_catalog().await;
    let Some(list) = catalog.list(&list_id).await else {
        error!("List {} not found", list_id);
    };

    info!("{} ({} movies)", list.name, list.movies.len());
    if list.movies.is_empty() {
        return;
    }

    let favorites = catalog.favorites().await;
    println!("{}", Table::new(utils::movie_rows(&list.movies, &favorites)));
}

pub async fn create_list(name: String, id: Option<String>) {
    let catalog = cli::open_catalog().await;
    let mut data = NewList::named(name);
    data.id = id;

    match catalog.create_list(data).await {
        Ok(list) => success!("Created list {} ({})", list.name, list.id),
        Err(e) => report(e),
    }
}

pub async fn rename_list(list_id: String, name: String) {
    let catalog = cli::open_catalog().await;
    let patch = ListPatch {
        name: Some(name),
        movies: None,
    };

    match catalog.update_list(&list_id, patch).await {
        Ok(list) => success!("Renamed list {} to {}", list.id, list.name),
        Err(e) => report(e),
    }
}

pub async fn delete_list(list_id: String) {
    let catalog = cli::open_catalog().await;

    match catalog.delete_list(&list_id).await {
        Ok(()) => success!("Deleted list {}", list_id),
        Err(e) => report(e),
    }
}

pub async fn add_to_list(list_id: String, movie_id: String) {
    let catalog = cli::open_catalog().await;
    if let Some(list) = catalog.list(&list_id).await {
        if list.contains(&movie_id) {
            warning!("Movie {} is already on {}; adding it again", movie_id, list.name);
        }
    }

    let Some(movie) = cli::resolve_movie(&catalog, &movie_id).await else {
        error!("Movie {} not found", movie_id);
    };

    match catalog.add_movie_to_list(&list_id, &movie).await {
        Ok(list) => success!("Added {} to {}", movie.title, list.name),
        Err(e) => report(e),
    }
}

pub async fn remove_from_list(list_id: String, movie_id: String) {
    let catalog = cli::open_catalog().await;

    match catalog.remove_movie_from_list(&list_id, &movie_id).await {
        Ok(list) => success!("Removed {} from {}", movie_id, list.name),
        Err(e) => report(e),
    }
}

fn report(err: CatalogError) {
    match &err {
        CatalogError::Failed { source, .. } => error!("{} ({})", err, source),
        CatalogError::FavoritesListProtected => error!("{}", err),
    }
}
