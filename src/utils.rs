use std::cmp::Ordering;

use rand::{Rng, distr::Alphanumeric};

use crate::{
    card,
    types::{List, ListTableRow, Movie, MovieTableRow},
};

/// Id assigned by the local data API to records created without one.
pub fn generate_record_id() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(12)
        .map(char::from)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

pub fn movie_rows(movies: &[Movie], favorites: &[Movie]) -> Vec<MovieTableRow> {
    movies
        .iter()
        .map(|movie| MovieTableRow {
            id: movie.id.clone(),
            title: movie.title.clone(),
            year: card::release_year(movie),
            favorite: if favorites.iter().any(|f| f.id == movie.id) {
                "♥".to_string()
            } else {
                String::new()
            },
            custom: if movie.custom { "yes" } else { "" }.to_string(),
        })
        .collect()
}

/// Favorites first, then named lists by name.
pub fn list_rows(lists: &[List]) -> Vec<ListTableRow> {
    let mut rows: Vec<&List> = lists.iter().collect();
    rows.sort_by(|a, b| match (a.is_favorites(), b.is_favorites()) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
    });

    rows.into_iter()
        .map(|list| ListTableRow {
            id: list.id.clone(),
            name: list.name.clone(),
            movies: list.movies.len(),
        })
        .collect()
}

/// Finds a movie already known to the catalog, custom movies first.
pub fn find_known_movie<'a>(
    movie_id: &str,
    custom_movies: &'a [Movie],
    favorites: &'a [Movie],
    lists: &'a [List],
) -> Option<&'a Movie> {
    custom_movies
        .iter()
        .chain(favorites.iter())
        .chain(lists.iter().flat_map(|l| l.movies.iter()))
        .find(|m| m.id == movie_id)
}
