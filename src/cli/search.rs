use tabled::Table;

use crate::{
    card::{ListMenu, MovieCard},
    cli, error, info,
    tmdb::TmdbClient,
    types::CardTableRow,
};

pub async fn search(query: String) {
    let client = match TmdbClient::from_env() {
        Ok(client) => client,
        Err(e) => error!("Cannot search TMDB: {}", e),
    };

    let movies = match client.search_movies(&query).await {
        Ok(movies) => movies,
        Err(e) => error!("TMDB search failed: {}", e),
    };

    if movies.is_empty() {
        info!("No movies found for \"{}\"", query);
        return;
    }

    let catalog = cli::open_catalog().await;
    let state = catalog.snapshot().await;
    let cards: Vec<MovieCard> = movies
        .iter()
        .map(|m| MovieCard::build(m, &state.favorites, &state.lists))
        .collect();

    let rows: Vec<CardTableRow> = cards.iter().map(MovieCard::to_row).collect();
    println!("{}", Table::new(rows));

    match cards.first().map(|c| &c.menu) {
        Some(ListMenu::Choose(options)) => {
            let names: Vec<&str> = options.iter().map(|o| o.name.as_str()).collect();
            info!(
                "Add a movie with `cinelist lists add <list-id> <movie-id>` ({})",
                names.join(", ")
            );
        }
        Some(ListMenu::CreateList) => {
            info!("Create a list with `cinelist lists create <name>` to collect movies");
        }
        None => {}
    }
}
