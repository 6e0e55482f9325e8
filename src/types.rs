use serde::{Deserialize, Deserializer, Serialize};
use tabled::Tabled;

/// Id of the list that backs the favorites collection. Every user has exactly one.
pub const FAVORITES_LIST_ID: &str = "favorites";
pub const FAVORITES_LIST_NAME: &str = "Favorites";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: String,
}

impl Session {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    #[serde(
        default,
        deserialize_with = "deserialize_id",
        skip_serializing_if = "String::is_empty"
    )]
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(default)]
    pub custom: bool,
    #[serde(rename = "userId", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl Movie {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            release_date: None,
            poster_path: None,
            overview: None,
            custom: false,
            user_id: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct List {
    #[serde(
        default,
        deserialize_with = "deserialize_id",
        skip_serializing_if = "String::is_empty"
    )]
    pub id: String,
    pub name: String,
    #[serde(rename = "userId", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub movies: Vec<Movie>,
    /// Bumped by the store on every mutation of the list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u64>,
}

impl List {
    pub fn is_favorites(&self) -> bool {
        self.id == FAVORITES_LIST_ID
    }

    pub fn contains(&self, movie_id: &str) -> bool {
        self.movies.iter().any(|m| m.id == movie_id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewMovie {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
}

impl NewMovie {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MoviePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
}

impl MoviePatch {
    pub fn apply(&self, movie: &mut Movie) {
        if let Some(title) = &self.title {
            movie.title = title.clone();
        }
        if let Some(release_date) = &self.release_date {
            movie.release_date = Some(release_date.clone());
        }
        if let Some(poster_path) = &self.poster_path {
            movie.poster_path = Some(poster_path.clone());
        }
        if let Some(overview) = &self.overview {
            movie.overview = Some(overview.clone());
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewList {
    pub id: Option<String>,
    pub name: String,
}

impl NewList {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movies: Option<Vec<Movie>>,
}

impl ListPatch {
    pub fn apply(&self, list: &mut List) {
        if let Some(name) = &self.name {
            list.name = name.clone();
        }
        if let Some(movies) = &self.movies {
            list.movies = movies.clone();
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchMoviesResponse {
    pub page: u32,
    pub results: Vec<Movie>,
    pub total_results: Option<u64>,
}

#[derive(Tabled)]
pub struct MovieTableRow {
    pub id: String,
    pub title: String,
    pub year: String,
    pub favorite: String,
    pub custom: String,
}

#[derive(Tabled)]
pub struct ListTableRow {
    pub id: String,
    pub name: String,
    pub movies: usize,
}

#[derive(Tabled)]
pub struct CardTableRow {
    pub id: String,
    pub title: String,
    pub year: String,
    pub favorite: String,
    pub poster: String,
}

// TMDB hands out numeric ids while locally created records use strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(u64),
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Number(id) => id.to_string(),
    })
}
