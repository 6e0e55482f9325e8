//! Display model of a movie card and the actions wired to it.

use crate::{
    catalog::{CatalogError, MovieCatalog, OpStatus},
    types::{CardTableRow, List, Movie},
};

pub const TMDB_IMAGE_BASE: &str = "https://image.tmdb.org/t/p/w500";
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/300x450?text=No+Image";
pub const TMDB_MOVIE_PAGE: &str = "https://www.themoviedb.org/movie";

/// Image shown on the card. Relative poster paths are served from TMDB.
pub fn poster_url(movie: &Movie) -> String {
    match movie.poster_path.as_deref() {
        None | Some("") => PLACEHOLDER_IMAGE.to_string(),
        Some(path) if path.starts_with("http") => path.to_string(),
        Some(path) => format!("{TMDB_IMAGE_BASE}{path}"),
    }
}

pub fn release_year(movie: &Movie) -> String {
    match movie.release_date.as_deref() {
        None | Some("") => "Unknown".to_string(),
        Some(date) => date.split('-').next().unwrap_or(date).to_string(),
    }
}

/// TMDB page of a catalog movie. Custom movies have none.
pub fn details_url(movie: &Movie) -> Option<String> {
    if movie.custom || movie.id.is_empty() {
        return None;
    }
    Some(format!("{TMDB_MOVIE_PAGE}/{id}", id = movie.id))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListOption {
    pub id: String,
    pub name: String,
}

/// Content of the card's inline menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListMenu {
    Choose(Vec<ListOption>),
    /// No named list exists yet; offer to create one.
    CreateList,
}

impl ListMenu {
    pub fn from_lists(lists: &[List]) -> Self {
        let options: Vec<ListOption> = lists
            .iter()
            .filter(|l| !l.is_favorites())
            .map(|l| ListOption {
                id: l.id.clone(),
                name: l.name.clone(),
            })
            .collect();

        if options.is_empty() {
            ListMenu::CreateList
        } else {
            ListMenu::Choose(options)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieCard {
    pub movie_id: String,
    pub title: String,
    pub year: String,
    pub image_url: String,
    pub favorite: bool,
    pub custom: bool,
    pub menu: ListMenu,
}

impl MovieCard {
    pub fn build(movie: &Movie, favorites: &[Movie], lists: &[List]) -> Self {
        Self {
            movie_id: movie.id.clone(),
            title: movie.title.clone(),
            year: release_year(movie),
            image_url: poster_url(movie),
            favorite: favorites.iter().any(|m| m.id == movie.id),
            custom: movie.custom,
            menu: ListMenu::from_lists(lists),
        }
    }

    pub async fn for_movie(catalog: &MovieCatalog, movie: &Movie) -> Self {
        let state = catalog.snapshot().await;
        Self::build(movie, &state.favorites, &state.lists)
    }

    pub fn favorite_label(&self) -> &'static str {
        if self.favorite {
            "Remove from favorites"
        } else {
            "Add to favorites"
        }
    }

    pub fn to_row(&self) -> CardTableRow {
        let mut title = self.title.clone();
        if self.custom {
            title.push_str(" [Custom]");
        }
        CardTableRow {
            id: self.movie_id.clone(),
            title,
            year: self.year.clone(),
            favorite: if self.favorite { "♥" } else { "" }.to_string(),
            poster: self.image_url.clone(),
        }
    }
}

pub async fn toggle_favorite(catalog: &MovieCatalog, movie: &Movie) -> OpStatus {
    if catalog.is_favorite(&movie.id).await {
        catalog.remove_from_favorites(&movie.id).await
    } else {
        catalog.add_to_favorites(movie).await
    }
}

/// Adds the movie to the list picked in the card menu. Nothing is picked means
/// nothing happens.
pub async fn add_to_selected_list(
    catalog: &MovieCatalog,
    selected: Option<&str>,
    movie: &Movie,
) -> Result<Option<List>, CatalogError> {
    match selected {
        None | Some("") => Ok(None),
        Some(list_id) => catalog.add_movie_to_list(list_id, movie).await.map(Some),
    }
}
