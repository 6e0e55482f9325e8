//! # Catalog Module
//!
//! [`MovieCatalog`] is the single source of truth for the favorites, the named
//! lists and the custom movies of one session. Presentation code reads state
//! from it and calls its operations; nothing else talks to the
//! [`MovieStore`] directly.
//!
//! ## Operation lifecycle
//!
//! Every operation:
//!
//! 1. registers itself as in flight under a fresh [`RequestId`],
//! 2. delegates the durable write to the store,
//! 3. on success reconciles the in-memory state from the store's answer,
//! 4. on failure records the user-facing message in the error slot,
//! 5. leaves the in-flight set, whatever happened.
//!
//! List contents are never computed locally. Any operation that returns a
//! list goes through one reconciliation step which replaces the held list
//! wholesale and, for the favorites list, rewrites the favorites mirror and the
//! local backup snapshot.
//!
//! ## Versions
//!
//! Lists carry an optional monotonic `version`. A response older than the list
//! currently held is stale and dropped, so overlapping operations finishing
//! out of order cannot roll the state back.

mod status;

use std::{future::Future, sync::Arc};

use thiserror::Error;
use tokio::sync::Mutex;

use crate::{
    management::{FAVORITES_KEY, KeyValueStore},
    store::{MovieStore, StoreError},
    types::{
        FAVORITES_LIST_ID, FAVORITES_LIST_NAME, List, ListPatch, Movie, MoviePatch, NewList,
        NewMovie, Session,
    },
    warning,
};

pub use status::{ErrorRecord, InitOutcome, OpStatus, Operation, RequestId};
use status::{InFlight, Tracker};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{}", .operation.failure_message())]
    Failed {
        operation: Operation,
        request: RequestId,
        #[source]
        source: StoreError,
    },

    #[error("Cannot delete the favorites list")]
    FavoritesListProtected,
}

/// In-memory view of the session's records.
#[derive(Debug, Clone, Default)]
pub struct CatalogState {
    pub favorites: Vec<Movie>,
    pub lists: Vec<List>,
    pub custom_movies: Vec<Movie>,
    pub error: Option<ErrorRecord>,
}

/// State container of one session.
///
/// Holds the favorites, the named lists and the custom movies of the session
/// user, and reports failures through a single error slot that presentation
/// code reads and clears.
pub struct MovieCatalog {
    store: Arc<dyn MovieStore>,
    backup: Arc<dyn KeyValueStore>,
    session: Session,
    state: Mutex<CatalogState>,
    tracker: Tracker,
}

impl MovieCatalog {
    pub fn new(
        store: Arc<dyn MovieStore>,
        backup: Arc<dyn KeyValueStore>,
        session: Session,
    ) -> Self {
        Self {
            store,
            backup,
            session,
            state: Mutex::new(CatalogState::default()),
            tracker: Tracker::default(),
        }
    }

    /// Seeds the catalog from the store.
    ///
    /// Makes sure the favorites list exists, creating it when the store has
    /// none. On failure the favorites are restored from the local snapshot
    /// while lists and custom movies stay as they were.
    pub async fn initialize(&self) -> InitOutcome {
        let guard = self.tracker.begin(Operation::Initialize);

        match self.load_from_store().await {
            Ok(()) => InitOutcome::Loaded,
            Err(source) => {
                self.record_error(&guard, Operation::Initialize.failure_message(), &source)
                    .await;

                let recovered_favorites = match self.load_backup().await {
                    Some(movies) => {
                        let count = movies.len();
                        self.replace_favorites(movies).await;
                        count
                    }
                    None => 0,
                };
                InitOutcome::Degraded {
                    recovered_favorites,
                }
            }
        }
    }

    async fn load_from_store(&self) -> Result<(), StoreError> {
        let lists = self.store.get_lists().await?;
        self.state.lock().await.lists = lists.clone();

        match lists.into_iter().find(|l| l.is_favorites()) {
            Some(favorites) => self.replace_favorites(favorites.movies).await,
            None => {
                let favorites = List {
                    id: FAVORITES_LIST_ID.to_string(),
                    name: FAVORITES_LIST_NAME.to_string(),
                    user_id: Some(self.session.id.clone()),
                    movies: Vec::new(),
                    version: None,
                };
                let created = self.store.create_list(&favorites).await?;
                self.state.lock().await.lists.push(created);
            }
        }

        let movies = self.store.get_custom_movies().await?;
        self.state.lock().await.custom_movies = movies
            .into_iter()
            .filter(|m| m.user_id.as_deref() == Some(self.session.id.as_str()))
            .collect();

        Ok(())
    }

    /// Appends `movie` to the favorites list in the store and mirrors the
    /// returned list into the favorites.
    ///
    /// Never returns an error: a failure lands in the error slot and is
    /// reported as [`OpStatus::Failed`]. Without a loaded favorites list
    /// nothing is attempted.
    ///
    /// # Example
    ///
    /// ```
    /// if catalog.add_to_favorites(&movie).await.is_applied() {
    ///     success!("Added {} to favorites", movie.title);
    /// }
    /// ```
    pub async fn add_to_favorites(&self, movie: &Movie) -> OpStatus {
        let guard = self.tracker.begin(Operation::AddToFavorites);
        if !self.has_favorites_list().await {
            return OpStatus::Skipped;
        }

        match self
            .delegate(
                &guard,
                self.store.add_movie_to_list(FAVORITES_LIST_ID, movie),
            )
            .await
        {
            Ok(list) => {
                self.reconcile(list).await;
                OpStatus::Applied(guard.request)
            }
            Err(e) => OpStatus::Failed {
                request: guard.request,
                message: e.to_string(),
            },
        }
    }

    /// Counterpart of [`MovieCatalog::add_to_favorites`].
    pub async fn remove_from_favorites(&self, movie_id: &str) -> OpStatus {
        let guard = self.tracker.begin(Operation::RemoveFromFavorites);
        if !self.has_favorites_list().await {
            return OpStatus::Skipped;
        }

        match self
            .delegate(
                &guard,
                self.store
                    .remove_movie_from_list(FAVORITES_LIST_ID, movie_id),
            )
            .await
        {
            Ok(list) => {
                self.reconcile(list).await;
                OpStatus::Applied(guard.request)
            }
            Err(e) => OpStatus::Failed {
                request: guard.request,
                message: e.to_string(),
            },
        }
    }

    /// Membership test on the in-memory favorites. No store call.
    pub async fn is_favorite(&self, movie_id: &str) -> bool {
        self.state
            .lock()
            .await
            .favorites
            .iter()
            .any(|m| m.id == movie_id)
    }

    /// Creates a movie owned by the session user. The store assigns the id.
    ///
    /// # Example
    ///
    /// ```
    /// let movie = catalog.add_custom_movie(NewMovie::titled("Backyard Epic")).await?;
    /// assert!(movie.custom);
    /// ```
    pub async fn add_custom_movie(&self, data: NewMovie) -> Result<Movie, CatalogError> {
        let guard = self.tracker.begin(Operation::AddCustomMovie);
        let movie = Movie {
            id: String::new(),
            title: data.title,
            release_date: data.release_date,
            poster_path: data.poster_path,
            overview: data.overview,
            custom: true,
            user_id: Some(self.session.id.clone()),
        };

        let created = self
            .delegate(&guard, self.store.create_movie(&movie))
            .await?;
        self.state.lock().await.custom_movies.push(created.clone());
        Ok(created)
    }

    pub async fn update_custom_movie(
        &self,
        movie_id: &str,
        patch: MoviePatch,
    ) -> Result<Movie, CatalogError> {
        let guard = self.tracker.begin(Operation::UpdateCustomMovie);
        let updated = self
            .delegate(&guard, self.store.update_movie(movie_id, &patch))
            .await?;

        let mut state = self.state.lock().await;
        for movie in state.custom_movies.iter_mut().filter(|m| m.id == movie_id) {
            *movie = updated.clone();
        }
        Ok(updated)
    }

    /// Deletes a custom movie and drops it from the favorites when present.
    pub async fn delete_custom_movie(&self, movie_id: &str) -> Result<(), CatalogError> {
        let guard = self.tracker.begin(Operation::DeleteCustomMovie);
        self.delegate(&guard, self.store.delete_movie(movie_id))
            .await?;

        let was_favorite = {
            let mut state = self.state.lock().await;
            state.custom_movies.retain(|m| m.id != movie_id);
            state.favorites.iter().any(|m| m.id == movie_id)
        };
        if was_favorite {
            self.remove_from_favorites(movie_id).await;
        }
        Ok(())
    }

    /// Creates an empty list for the session user and appends it to the held
    /// lists.
    pub async fn create_list(&self, data: NewList) -> Result<List, CatalogError> {
        let guard = self.tracker.begin(Operation::CreateList);
        let list = List {
            id: data.id.unwrap_or_default(),
            name: data.name,
            user_id: Some(self.session.id.clone()),
            movies: Vec::new(),
            version: None,
        };

        let created = self
            .delegate(&guard, self.store.create_list(&list))
            .await?;
        self.state.lock().await.lists.push(created.clone());
        Ok(created)
    }

    /// Patches a list. Updating the favorites list through here also rewrites
    /// the favorites.
    pub async fn update_list(&self, list_id: &str, patch: ListPatch) -> Result<List, CatalogError> {
        let guard = self.tracker.begin(Operation::UpdateList);
        let updated = self
            .delegate(&guard, self.store.update_list(list_id, &patch))
            .await?;
        self.reconcile(updated.clone()).await;
        Ok(updated)
    }

    /// Deletes a named list. The favorites list is refused before the store
    /// is contacted.
    pub async fn delete_list(&self, list_id: &str) -> Result<(), CatalogError> {
        let guard = self.tracker.begin(Operation::DeleteList);
        if list_id == FAVORITES_LIST_ID {
            let err = CatalogError::FavoritesListProtected;
            self.record_error(&guard, Operation::DeleteList.failure_message(), &err)
                .await;
            return Err(err);
        }

        self.delegate(&guard, self.store.delete_list(list_id))
            .await?;
        self.state.lock().await.lists.retain(|l| l.id != list_id);
        Ok(())
    }

    /// Appends `movie` to a list and replaces the held list with the store's
    /// answer. Adding a movie twice keeps both entries.
    pub async fn add_movie_to_list(
        &self,
        list_id: &str,
        movie: &Movie,
    ) -> Result<List, CatalogError> {
        let guard = self.tracker.begin(Operation::AddMovieToList);
        let updated = self
            .delegate(&guard, self.store.add_movie_to_list(list_id, movie))
            .await?;
        self.reconcile(updated.clone()).await;
        Ok(updated)
    }

    pub async fn remove_movie_from_list(
        &self,
        list_id: &str,
        movie_id: &str,
    ) -> Result<List, CatalogError> {
        let guard = self.tracker.begin(Operation::RemoveMovieFromList);
        let updated = self
            .delegate(
                &guard,
                self.store.remove_movie_from_list(list_id, movie_id),
            )
            .await?;
        self.reconcile(updated.clone()).await;
        Ok(updated)
    }

    /// Empties the error slot.
    pub async fn clear_error(&self) {
        self.state.lock().await.error = None;
    }

    /// Message of the most recent failure, if any.
    pub async fn error(&self) -> Option<String> {
        self.state
            .lock()
            .await
            .error
            .as_ref()
            .map(|e| e.message.clone())
    }

    /// Like [`MovieCatalog::error`], with the failed request and operation.
    pub async fn last_error(&self) -> Option<ErrorRecord> {
        self.state.lock().await.error.clone()
    }

    pub async fn favorites(&self) -> Vec<Movie> {
        self.state.lock().await.favorites.clone()
    }

    pub async fn lists(&self) -> Vec<List> {
        self.state.lock().await.lists.clone()
    }

    pub async fn list(&self, list_id: &str) -> Option<List> {
        self.state
            .lock()
            .await
            .lists
            .iter()
            .find(|l| l.id == list_id)
            .cloned()
    }

    pub async fn custom_movies(&self) -> Vec<Movie> {
        self.state.lock().await.custom_movies.clone()
    }

    /// Copy of the whole state, taken under one lock.
    pub async fn snapshot(&self) -> CatalogState {
        self.state.lock().await.clone()
    }

    /// True while at least one operation is in flight.
    pub fn is_loading(&self) -> bool {
        self.tracker.in_flight() > 0
    }

    /// Number of operations currently in flight.
    pub fn in_flight(&self) -> usize {
        self.tracker.in_flight()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    async fn has_favorites_list(&self) -> bool {
        self.state
            .lock()
            .await
            .lists
            .iter()
            .any(|l| l.is_favorites())
    }

    async fn delegate<T>(
        &self,
        guard: &InFlight<'_>,
        call: impl Future<Output = Result<T, StoreError>>,
    ) -> Result<T, CatalogError> {
        match call.await {
            Ok(value) => Ok(value),
            Err(source) => {
                let message = guard.operation.failure_message();
                self.record_error(guard, message, &source).await;
                Err(CatalogError::Failed {
                    operation: guard.operation,
                    request: guard.request,
                    source,
                })
            }
        }
    }

    async fn record_error(
        &self,
        guard: &InFlight<'_>,
        message: &str,
        cause: &(dyn std::error::Error + Send + Sync),
    ) {
        warning!(
            "{} {} failed: {}",
            guard.operation,
            guard.request,
            cause
        );
        self.state.lock().await.error = Some(ErrorRecord {
            request: guard.request,
            operation: guard.operation,
            message: message.to_string(),
        });
    }

    /// Applies a list returned by the store to the in-memory state.
    async fn reconcile(&self, list: List) {
        let favorites = {
            let mut state = self.state.lock().await;
            if let Some(held) = state.lists.iter_mut().find(|l| l.id == list.id) {
                if let (Some(held_version), Some(version)) = (held.version, list.version) {
                    if version < held_version {
                        warning!(
                            "Ignoring stale list '{}' (version {} < {})",
                            list.id,
                            version,
                            held_version
                        );
                        return;
                    }
                }
                *held = list.clone();
            }

            if list.is_favorites() {
                state.favorites = list.movies.clone();
                Some(list.movies)
            } else {
                None
            }
        };

        if let Some(favorites) = favorites {
            self.save_backup(&favorites).await;
        }
    }

    async fn replace_favorites(&self, movies: Vec<Movie>) {
        self.state.lock().await.favorites = movies.clone();
        self.save_backup(&movies).await;
    }

    async fn save_backup(&self, movies: &[Movie]) {
        let json = match serde_json::to_string(movies) {
            Ok(json) => json,
            Err(e) => {
                warning!("Failed to serialize favorites backup: {}", e);
                return;
            }
        };
        if let Err(e) = self.backup.set(FAVORITES_KEY, json).await {
            warning!("Failed to write favorites backup: {}", e);
        }
    }

    async fn load_backup(&self) -> Option<Vec<Movie>> {
        let content = match self.backup.get(FAVORITES_KEY).await {
            Ok(content) => content?,
            Err(e) => {
                warning!("Failed to read favorites backup: {}", e);
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(movies) => Some(movies),
            Err(e) => {
                warning!("Favorites backup is unreadable: {}", e);
                None
            }
        }
    }
}
