use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    management::Database,
    store::{MovieStore, StoreError},
    types::{List, ListPatch, Movie, MoviePatch},
};

/// In-process [`MovieStore`].
///
/// When opened from a file every successful write is persisted before the
/// call returns, so the file always reflects the last acknowledged state. A
/// write whose persist fails leaves the records untouched.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    db: Arc<Mutex<Database>>,
    path: Option<PathBuf>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(lists: Vec<List>, movies: Vec<Movie>) -> Self {
        Self {
            db: Arc::new(Mutex::new(Database::new(lists, movies))),
            path: None,
        }
    }

    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let db = Database::load(&path).await?;
        Ok(Self {
            db: Arc::new(Mutex::new(db)),
            path: Some(path),
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub async fn snapshot(&self) -> Database {
        self.db.lock().await.clone()
    }

    async fn write<T>(
        &self,
        change: impl FnOnce(&mut Database) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut db = self.db.lock().await;
        let mut next = db.clone();
        let value = change(&mut next)?;
        if let Some(path) = &self.path {
            next.persist(path).await?;
        }
        *db = next;
        Ok(value)
    }
}

#[async_trait]
impl MovieStore for MemoryStore {
    async fn get_lists(&self) -> Result<Vec<List>, StoreError> {
        Ok(self.db.lock().await.lists.clone())
    }

    async fn create_list(&self, list: &List) -> Result<List, StoreError> {
        self.write(|db| db.create_list(list)).await
    }

    async fn update_list(&self, id: &str, patch: &ListPatch) -> Result<List, StoreError> {
        self.write(|db| db.update_list(id, patch)).await
    }

    async fn delete_list(&self, id: &str) -> Result<(), StoreError> {
        self.write(|db| db.delete_list(id)).await
    }

    async fn get_custom_movies(&self) -> Result<Vec<Movie>, StoreError> {
        Ok(self.db.lock().await.movies.clone())
    }

    async fn create_movie(&self, movie: &Movie) -> Result<Movie, StoreError> {
        self.write(|db| db.create_movie(movie)).await
    }

    async fn update_movie(&self, id: &str, patch: &MoviePatch) -> Result<Movie, StoreError> {
        self.write(|db| db.update_movie(id, patch)).await
    }

    async fn delete_movie(&self, id: &str) -> Result<(), StoreError> {
        self.write(|db| db.delete_movie(id)).await
    }

    async fn add_movie_to_list(&self, list_id: &str, movie: &Movie) -> Result<List, StoreError> {
        self.write(|db| db.add_movie_to_list(list_id, movie)).await
    }

    async fn remove_movie_from_list(
        &self,
        list_id: &str,
        movie_id: &str,
    ) -> Result<List, StoreError> {
        self.write(|db| db.remove_movie_from_list(list_id, movie_id))
            .await
    }
}
