#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use cinelist::{
    catalog::MovieCatalog,
    management::{KeyValueStore, MemoryKeyValueStore},
    store::{MemoryStore, MovieStore, StoreError},
    types::{List, ListPatch, Movie, MoviePatch, Session},
};
use tokio::sync::Notify;

pub const USER_ID: &str = "1";

pub fn movie(id: &str, title: &str) -> Movie {
    let mut movie = Movie::new(id, title);
    movie.release_date = Some("1999-03-31".to_string());
    movie.poster_path = Some(format!("/{id}.jpg"));
    movie
}

pub fn list(id: &str, name: &str, movies: Vec<Movie>) -> List {
    List {
        id: id.to_string(),
        name: name.to_string(),
        user_id: Some(USER_ID.to_string()),
        movies,
        version: Some(1),
    }
}

pub fn catalog_with(
    store: Arc<dyn MovieStore>,
    backup: Arc<dyn KeyValueStore>,
) -> MovieCatalog {
    MovieCatalog::new(store, backup, Session::new(USER_ID))
}

/// Empty memory store plus empty backup, already initialized.
pub async fn fresh_catalog() -> (MovieCatalog, MemoryStore, Arc<MemoryKeyValueStore>) {
    let store = MemoryStore::new();
    let backup = Arc::new(MemoryKeyValueStore::new());
    let catalog = catalog_with(Arc::new(store.clone()), backup.clone());
    catalog.initialize().await;
    (catalog, store, backup)
}

fn unavailable() -> StoreError {
    StoreError::Unavailable("connection refused".to_string())
}

/// Fails every call.
pub struct FailingStore;

#[async_trait]
impl MovieStore for FailingStore {
    async fn get_lists(&self) -> Result<Vec<List>, StoreError> {
        Err(unavailable())
    }

    async fn create_list(&self, _list: &List) -> Result<List, StoreError> {
        Err(unavailable())
    }

    async fn update_list(&self, _id: &str, _patch: &ListPatch) -> Result<List, StoreError> {
        Err(unavailable())
    }

    async fn delete_list(&self, _id: &str) -> Result<(), StoreError> {
        Err(unavailable())
    }

    async fn get_custom_movies(&self) -> Result<Vec<Movie>, StoreError> {
        Err(unavailable())
    }

    async fn create_movie(&self, _movie: &Movie) -> Result<Movie, StoreError> {
        Err(unavailable())
    }

    async fn update_movie(&self, _id: &str, _patch: &MoviePatch) -> Result<Movie, StoreError> {
        Err(unavailable())
    }

    async fn delete_movie(&self, _id: &str) -> Result<(), StoreError> {
        Err(unavailable())
    }

    async fn add_movie_to_list(&self, _list_id: &str, _movie: &Movie) -> Result<List, StoreError> {
        Err(unavailable())
    }

    async fn remove_movie_from_list(
        &self,
        _list_id: &str,
        _movie_id: &str,
    ) -> Result<List, StoreError> {
        Err(unavailable())
    }
}

/// Delegates to a memory store; list writes can be failed, delayed or
/// answered with a stale copy.
pub struct ScriptedStore {
    pub inner: MemoryStore,
    pub fail_writes: bool,
    pub fail_custom_movies: bool,
    pub gate: Option<Arc<Notify>>,
    pub stale_answer: Option<List>,
}

impl ScriptedStore {
    pub fn new(inner: MemoryStore) -> Self {
        Self {
            inner,
            fail_writes: false,
            fail_custom_movies: false,
            gate: None,
            stale_answer: None,
        }
    }

    async fn before_write(&self) -> Result<(), StoreError> {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if self.fail_writes {
            return Err(unavailable());
        }
        Ok(())
    }
}

#[async_trait]
impl MovieStore for ScriptedStore {
    async fn get_lists(&self) -> Result<Vec<List>, StoreError> {
        self.inner.get_lists().await
    }

    async fn create_list(&self, list: &List) -> Result<List, StoreError> {
        self.inner.create_list(list).await
    }

    async fn update_list(&self, id: &str, patch: &ListPatch) -> Result<List, StoreError> {
        self.before_write().await?;
        self.inner.update_list(id, patch).await
    }

    async fn delete_list(&self, id: &str) -> Result<(), StoreError> {
        self.before_write().await?;
        self.inner.delete_list(id).await
    }

    async fn get_custom_movies(&self) -> Result<Vec<Movie>, StoreError> {
        if self.fail_custom_movies {
            return Err(unavailable());
        }
        self.inner.get_custom_movies().await
    }

    async fn create_movie(&self, movie: &Movie) -> Result<Movie, StoreError> {
        self.before_write().await?;
        self.inner.create_movie(movie).await
    }

    async fn update_movie(&self, id: &str, patch: &MoviePatch) -> Result<Movie, StoreError> {
        self.before_write().await?;
        self.inner.update_movie(id, patch).await
    }

    async fn delete_movie(&self, id: &str) -> Result<(), StoreError> {
        self.before_write().await?;
        self.inner.delete_movie(id).await
    }

    async fn add_movie_to_list(&self, list_id: &str, movie: &Movie) -> Result<List, StoreError> {
        self.before_write().await?;
        if let Some(stale) = &self.stale_answer {
            return Ok(stale.clone());
        }
        self.inner.add_movie_to_list(list_id, movie).await
    }

    async fn remove_movie_from_list(
        &self,
        list_id: &str,
        movie_id: &str,
    ) -> Result<List, StoreError> {
        self.before_write().await?;
        self.inner.remove_movie_from_list(list_id, movie_id).await
    }
}

/// Reads nothing and refuses every write.
pub struct FailingKeyValueStore;

#[async_trait]
impl KeyValueStore for FailingKeyValueStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: String) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("quota exceeded".to_string()))
    }

    async fn remove(&self, _key: &str) -> Result<(), StoreError> {
        Ok(())
    }
}
