use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    store::StoreError,
    types::{List, ListPatch, Movie, MoviePatch},
    utils,
};

/// Records held by the local data API: every list and every custom movie.
///
/// This is the document written to `db.json`. Mutations keep the REST
/// semantics the [`crate::store::MovieStore`] contract promises: list writes
/// bump the list version and return the whole list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Database {
    #[serde(default)]
    pub lists: Vec<List>,
    #[serde(default)]
    pub movies: Vec<Movie>,
}

impl Database {
    pub fn new(lists: Vec<List>, movies: Vec<Movie>) -> Self {
        Self { lists, movies }
    }

    /// Loads the database from `path`. A missing file yields an empty database.
    pub async fn load(path: &Path) -> Result<Self, StoreError> {
        match async_fs::read_to_string(path).await {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    pub async fn persist(&self, path: &Path) -> Result<(), StoreError> {
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(self)?;
        async_fs::write(path, json).await?;
        Ok(())
    }

    pub fn default_path() -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("cinelist/db.json");
        path
    }

    pub fn create_list(&mut self, list: &List) -> Result<List, StoreError> {
        let mut list = list.clone();
        if list.id.is_empty() {
            list.id = utils::generate_record_id();
        }
        if self.lists.iter().any(|l| l.id == list.id) {
            return Err(StoreError::conflict("list", list.id));
        }

        list.version = Some(1);
        self.lists.push(list.clone());
        Ok(list)
    }

    pub fn update_list(&mut self, id: &str, patch: &ListPatch) -> Result<List, StoreError> {
        let list = self.list_mut(id)?;
        patch.apply(list);
        Ok(Self::bump(list))
    }

    pub fn delete_list(&mut self, id: &str) -> Result<(), StoreError> {
        let before = self.lists.len();
        self.lists.retain(|l| l.id != id);
        if self.lists.len() == before {
            return Err(StoreError::not_found("list", id));
        }
        Ok(())
    }

    pub fn add_movie_to_list(&mut self, list_id: &str, movie: &Movie) -> Result<List, StoreError> {
        let list = self.list_mut(list_id)?;
        list.movies.push(movie.clone());
        Ok(Self::bump(list))
    }

    pub fn remove_movie_from_list(
        &mut self,
        list_id: &str,
        movie_id: &str,
    ) -> Result<List, StoreError> {
        let list = self.list_mut(list_id)?;
        list.movies.retain(|m| m.id != movie_id);
        Ok(Self::bump(list))
    }

    pub fn create_movie(&mut self, movie: &Movie) -> Result<Movie, StoreError> {
        let mut movie = movie.clone();
        if movie.id.is_empty() {
            movie.id = utils::generate_record_id();
        }
        if self.movies.iter().any(|m| m.id == movie.id) {
            return Err(StoreError::conflict("movie", movie.id));
        }

        self.movies.push(movie.clone());
        Ok(movie)
    }

    pub fn update_movie(&mut self, id: &str, patch: &MoviePatch) -> Result<Movie, StoreError> {
        let movie = self
            .movies
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| StoreError::not_found("movie", id))?;
        patch.apply(movie);
        Ok(movie.clone())
    }

    pub fn delete_movie(&mut self, id: &str) -> Result<(), StoreError> {
        let before = self.movies.len();
        self.movies.retain(|m| m.id != id);
        if self.movies.len() == before {
            return Err(StoreError::not_found("movie", id));
        }
        Ok(())
    }

    fn list_mut(&mut self, id: &str) -> Result<&mut List, StoreError> {
        self.lists
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| StoreError::not_found("list", id))
    }

    fn bump(list: &mut List) -> List {
        list.version = Some(list.version.unwrap_or(0) + 1);
        list.clone()
    }
}
