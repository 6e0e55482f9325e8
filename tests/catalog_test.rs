mod common;

use std::sync::Arc;

use cinelist::{
    catalog::{CatalogError, InitOutcome, OpStatus, Operation},
    management::{FAVORITES_KEY, KeyValueStore, MemoryKeyValueStore},
    store::{MemoryStore, MovieStore},
    types::{FAVORITES_LIST_ID, ListPatch, Movie, MoviePatch, NewList, NewMovie},
};
use tokio::sync::Notify;

use common::{
    FailingKeyValueStore, FailingStore, ScriptedStore, catalog_with, fresh_catalog, list, movie,
};

fn favorites_count(lists: &[cinelist::types::List]) -> usize {
    lists.iter().filter(|l| l.id == FAVORITES_LIST_ID).count()
}

#[tokio::test]
async fn test_initialize_creates_favorites_list_once() {
    let (catalog, store, _) = fresh_catalog().await;

    let lists = catalog.lists().await;
    assert_eq!(favorites_count(&lists), 1);
    assert_eq!(favorites_count(&store.get_lists().await.unwrap()), 1);

    // A second session over the same store finds the list instead of creating it
    let again = catalog_with(Arc::new(store.clone()), Arc::new(MemoryKeyValueStore::new()));
    assert_eq!(again.initialize().await, InitOutcome::Loaded);
    assert_eq!(favorites_count(&again.lists().await), 1);
    assert_eq!(favorites_count(&store.get_lists().await.unwrap()), 1);
    assert!(catalog.error().await.is_none());
}

#[tokio::test]
async fn test_initialize_loads_existing_favorites_and_own_movies() {
    let mut own = movie("c1", "Home Video");
    own.custom = true;
    own.user_id = Some("1".to_string());
    let mut foreign = movie("c2", "Someone Else's");
    foreign.custom = true;
    foreign.user_id = Some("2".to_string());

    let store = MemoryStore::with_data(
        vec![list(FAVORITES_LIST_ID, "Favorites", vec![movie("m1", "The Matrix")])],
        vec![own.clone(), foreign],
    );
    let backup = Arc::new(MemoryKeyValueStore::new());
    let catalog = catalog_with(Arc::new(store), backup.clone());

    assert_eq!(catalog.initialize().await, InitOutcome::Loaded);
    assert!(catalog.is_favorite("m1").await);
    assert_eq!(catalog.custom_movies().await, vec![own]);

    // Favorites are mirrored into the backup as soon as they are known
    let snapshot = backup.get(FAVORITES_KEY).await.unwrap().unwrap();
    let mirrored: Vec<Movie> = serde_json::from_str(&snapshot).unwrap();
    assert_eq!(mirrored.len(), 1);
    assert_eq!(mirrored[0].id, "m1");
}

#[tokio::test]
async fn test_initialize_failure_recovers_favorites_from_backup() {
    let snapshot = serde_json::to_string(&vec![movie("m1", "The Matrix")]).unwrap();
    let backup = Arc::new(MemoryKeyValueStore::with_entry(FAVORITES_KEY, snapshot));
    let catalog = catalog_with(Arc::new(FailingStore), backup);

    let outcome = catalog.initialize().await;

    assert_eq!(
        outcome,
        InitOutcome::Degraded {
            recovered_favorites: 1
        }
    );
    let favorites = catalog.favorites().await;
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].id, "m1");
    assert!(catalog.lists().await.is_empty());
    assert!(catalog.custom_movies().await.is_empty());

    let error = catalog.last_error().await.unwrap();
    assert_eq!(error.operation, Operation::Initialize);
    assert!(!error.message.is_empty());
    assert!(!catalog.is_loading());
}

#[tokio::test]
async fn test_initialize_failure_without_backup() {
    let catalog = catalog_with(Arc::new(FailingStore), Arc::new(MemoryKeyValueStore::new()));

    assert_eq!(
        catalog.initialize().await,
        InitOutcome::Degraded {
            recovered_favorites: 0
        }
    );
    assert!(catalog.favorites().await.is_empty());
    assert!(catalog.error().await.is_some());
}

#[tokio::test]
async fn test_add_then_remove_favorite() {
    let (catalog, _, backup) = fresh_catalog().await;
    let m = movie("m7", "Alien");

    let status = catalog.add_to_favorites(&m).await;
    assert!(status.is_applied());
    assert!(catalog.is_favorite("m7").await);

    let status = catalog.remove_from_favorites("m7").await;
    assert!(status.is_applied());
    assert!(!catalog.is_favorite("m7").await);
    assert!(catalog.favorites().await.iter().all(|f| f.id != "m7"));

    // favorites always equals the movies of the favorites list
    let favorites_list = catalog.list(FAVORITES_LIST_ID).await.unwrap();
    assert_eq!(favorites_list.movies, catalog.favorites().await);

    let snapshot = backup.get(FAVORITES_KEY).await.unwrap().unwrap();
    assert_eq!(snapshot, "[]");
}

#[tokio::test]
async fn test_favorites_skipped_without_favorites_list() {
    let catalog = catalog_with(Arc::new(FailingStore), Arc::new(MemoryKeyValueStore::new()));
    catalog.initialize().await;
    catalog.clear_error().await;

    let status = catalog.add_to_favorites(&movie("m1", "Heat")).await;

    assert_eq!(status, OpStatus::Skipped);
    assert!(catalog.error().await.is_none());
}

#[tokio::test]
async fn test_favorite_failure_sets_error_without_raising() {
    let inner = MemoryStore::new();
    let mut scripted = ScriptedStore::new(inner);
    scripted.fail_writes = true;
    let catalog = catalog_with(Arc::new(scripted), Arc::new(MemoryKeyValueStore::new()));
    catalog.initialize().await;

    let status = catalog.add_to_favorites(&movie("m1", "Heat")).await;

    match status {
        OpStatus::Failed { message, .. } => {
            assert_eq!(message, "Failed to add movie to favorites. Please try again.")
        }
        other => panic!("expected failure, got {:?}", other),
    }
    assert!(!catalog.is_favorite("m1").await);
    assert_eq!(
        catalog.error().await.as_deref(),
        Some("Failed to add movie to favorites. Please try again.")
    );

    catalog.clear_error().await;
    assert!(catalog.error().await.is_none());
}

#[tokio::test]
async fn test_delete_favorites_list_is_refused() {
    let (catalog, store, _) = fresh_catalog().await;
    let before = catalog.lists().await;

    let result = catalog.delete_list(FAVORITES_LIST_ID).await;

    assert!(matches!(result, Err(CatalogError::FavoritesListProtected)));
    assert_eq!(catalog.lists().await, before);
    assert_eq!(favorites_count(&store.get_lists().await.unwrap()), 1);
    assert_eq!(
        catalog.error().await.as_deref(),
        Some("Failed to delete list. Please try again.")
    );
}

#[tokio::test]
async fn test_delete_named_list() {
    let (catalog, _, _) = fresh_catalog().await;
    catalog
        .create_list(NewList::named("Weekend").with_id("w1"))
        .await
        .unwrap();

    catalog.delete_list("w1").await.unwrap();

    assert!(catalog.list("w1").await.is_none());
    assert_eq!(catalog.lists().await.len(), 1);
}

#[tokio::test]
async fn test_create_list_and_add_movie() {
    let (catalog, _, _) = fresh_catalog().await;
    let favorites_before = catalog.favorites().await;
    let movie_a = movie("a", "Movie A");

    let created = catalog
        .create_list(NewList::named("Watch Later").with_id("l1"))
        .await
        .unwrap();
    assert_eq!(created.user_id.as_deref(), Some("1"));
    assert!(created.movies.is_empty());

    catalog.add_movie_to_list("l1", &movie_a).await.unwrap();

    let named: Vec<_> = catalog
        .lists()
        .await
        .into_iter()
        .filter(|l| l.id == "l1")
        .collect();
    assert_eq!(named.len(), 1);
    assert_eq!(named[0].movies, vec![movie_a]);
    assert_eq!(catalog.favorites().await, favorites_before);
}

#[tokio::test]
async fn test_list_mutations_through_favorites_id_update_favorites() {
    let (catalog, _, _) = fresh_catalog().await;
    let m = movie("m3", "Arrival");

    catalog.add_movie_to_list(FAVORITES_LIST_ID, &m).await.unwrap();
    assert!(catalog.is_favorite("m3").await);

    catalog
        .remove_movie_from_list(FAVORITES_LIST_ID, "m3")
        .await
        .unwrap();
    assert!(!catalog.is_favorite("m3").await);
}

#[tokio::test]
async fn test_update_favorites_list_overwrites_favorites() {
    let (catalog, _, _) = fresh_catalog().await;
    let replacement = vec![movie("x1", "Ran"), movie("x2", "Ikiru")];

    let patch = ListPatch {
        name: None,
        movies: Some(replacement.clone()),
    };
    catalog.update_list(FAVORITES_LIST_ID, patch).await.unwrap();

    assert_eq!(catalog.favorites().await, replacement);
}

#[tokio::test]
async fn test_rename_list() {
    let (catalog, _, _) = fresh_catalog().await;
    catalog
        .create_list(NewList::named("Later").with_id("l2"))
        .await
        .unwrap();

    let patch = ListPatch {
        name: Some("Much Later".to_string()),
        movies: None,
    };
    catalog.update_list("l2", patch).await.unwrap();

    assert_eq!(catalog.list("l2").await.unwrap().name, "Much Later");
}

#[tokio::test]
async fn test_add_custom_movie_stamps_session_user() {
    let (catalog, _, _) = fresh_catalog().await;

    let created = catalog
        .add_custom_movie(NewMovie::titled("X"))
        .await
        .unwrap();

    assert_eq!(created.user_id.as_deref(), Some("1"));
    assert!(created.custom);
    assert!(!created.id.is_empty());
    assert!(catalog.custom_movies().await.contains(&created));
}

#[tokio::test]
async fn test_update_custom_movie_replaces_entry() {
    let (catalog, _, _) = fresh_catalog().await;
    let created = catalog
        .add_custom_movie(NewMovie::titled("Draft"))
        .await
        .unwrap();

    let patch = MoviePatch {
        title: Some("Final Cut".to_string()),
        ..MoviePatch::default()
    };
    let updated = catalog
        .update_custom_movie(&created.id, patch)
        .await
        .unwrap();

    assert_eq!(updated.title, "Final Cut");
    let movies = catalog.custom_movies().await;
    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0].title, "Final Cut");
}

#[tokio::test]
async fn test_delete_favorite_custom_movie_removes_it_everywhere() {
    let (catalog, _, _) = fresh_catalog().await;
    let created = catalog
        .add_custom_movie(NewMovie::titled("Backyard Epic"))
        .await
        .unwrap();
    catalog.add_to_favorites(&created).await;
    assert!(catalog.is_favorite(&created.id).await);

    catalog.delete_custom_movie(&created.id).await.unwrap();

    assert!(catalog.custom_movies().await.is_empty());
    assert!(!catalog.is_favorite(&created.id).await);
}

#[tokio::test]
async fn test_failed_operation_returns_error_and_sets_slot() {
    let (catalog, _, _) = fresh_catalog().await;

    let result = catalog.update_custom_movie("missing", MoviePatch::default()).await;

    match result {
        Err(CatalogError::Failed {
            operation, request, ..
        }) => {
            assert_eq!(operation, Operation::UpdateCustomMovie);
            let record = catalog.last_error().await.unwrap();
            assert_eq!(record.request, request);
            assert_eq!(record.message, "Failed to update movie. Please try again.");
        }
        other => panic!("expected failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_error_slot_is_last_write_wins() {
    let (catalog, _, _) = fresh_catalog().await;

    let _ = catalog.delete_custom_movie("nope").await;
    let _ = catalog.add_movie_to_list("nope", &movie("m", "M")).await;

    assert_eq!(
        catalog.error().await.as_deref(),
        Some("Failed to add movie to list. Please try again.")
    );
}

#[tokio::test]
async fn test_stale_list_answer_is_ignored() {
    let inner = MemoryStore::with_data(
        vec![
            list(FAVORITES_LIST_ID, "Favorites", Vec::new()),
            {
                let mut l = list("l1", "Watch Later", vec![movie("a", "A"), movie("b", "B")]);
                l.version = Some(5);
                l
            },
        ],
        Vec::new(),
    );
    let mut scripted = ScriptedStore::new(inner);
    let mut stale = list("l1", "Watch Later", vec![movie("a", "A")]);
    stale.version = Some(2);
    scripted.stale_answer = Some(stale);

    let catalog = catalog_with(Arc::new(scripted), Arc::new(MemoryKeyValueStore::new()));
    catalog.initialize().await;

    catalog.add_movie_to_list("l1", &movie("c", "C")).await.unwrap();

    let held = catalog.list("l1").await.unwrap();
    assert_eq!(held.version, Some(5));
    assert_eq!(held.movies.len(), 2);
}

#[tokio::test]
async fn test_loading_tracks_every_operation_in_flight() {
    let gate = Arc::new(Notify::new());
    let mut scripted = ScriptedStore::new(MemoryStore::new());
    scripted.gate = Some(gate.clone());
    let catalog = catalog_with(Arc::new(scripted), Arc::new(MemoryKeyValueStore::new()));
    catalog.initialize().await;
    assert!(!catalog.is_loading());

    let (result, observed) = tokio::join!(
        catalog.add_custom_movie(NewMovie::titled("Slow")),
        async {
            tokio::task::yield_now().await;
            let observed = catalog.in_flight();
            gate.notify_one();
            observed
        }
    );

    assert_eq!(observed, 1);
    assert!(result.is_ok());
    assert!(!catalog.is_loading());
}

#[tokio::test]
async fn test_loading_stays_on_until_the_last_overlapping_operation_ends() {
    let gate = Arc::new(Notify::new());
    let mut scripted = ScriptedStore::new(MemoryStore::new());
    scripted.gate = Some(gate.clone());
    let catalog = catalog_with(Arc::new(scripted), Arc::new(MemoryKeyValueStore::new()));
    catalog.initialize().await;

    let (first, second, (both, loading_after_one, remaining)) = tokio::join!(
        catalog.add_custom_movie(NewMovie::titled("First")),
        catalog.add_custom_movie(NewMovie::titled("Second")),
        async {
            tokio::task::yield_now().await;
            let both = catalog.in_flight();

            gate.notify_one();
            while catalog.in_flight() > 1 {
                tokio::task::yield_now().await;
            }
            let loading_after_one = catalog.is_loading();
            let remaining = catalog.in_flight();

            gate.notify_one();
            (both, loading_after_one, remaining)
        }
    );

    assert_eq!(both, 2);
    assert!(loading_after_one);
    assert_eq!(remaining, 1);
    assert!(first.is_ok());
    assert!(second.is_ok());
    assert!(!catalog.is_loading());
    assert_eq!(catalog.in_flight(), 0);
    assert_eq!(catalog.custom_movies().await.len(), 2);
}

#[tokio::test]
async fn test_initialize_keeps_loaded_lists_when_custom_movies_fail() {
    let mut scripted = ScriptedStore::new(MemoryStore::with_data(
        vec![
            list(FAVORITES_LIST_ID, "Favorites", vec![movie("m1", "The Matrix")]),
            list("l1", "Watch Later", Vec::new()),
        ],
        vec![{
            let mut own = movie("c1", "Home Video");
            own.custom = true;
            own
        }],
    ));
    scripted.fail_custom_movies = true;
    let catalog = catalog_with(Arc::new(scripted), Arc::new(FailingKeyValueStore));

    let outcome = catalog.initialize().await;

    assert_eq!(
        outcome,
        InitOutcome::Degraded {
            recovered_favorites: 0
        }
    );
    assert_eq!(catalog.lists().await.len(), 2);
    assert!(catalog.custom_movies().await.is_empty());
    assert!(catalog.is_favorite("m1").await);
    assert_eq!(
        catalog.last_error().await.unwrap().operation,
        Operation::Initialize
    );

    // The favorites list was loaded, so favorites keep working
    let status = catalog.add_to_favorites(&movie("m2", "Heat")).await;
    assert!(status.is_applied());
    assert!(catalog.is_favorite("m2").await);
}

#[tokio::test]
async fn test_backup_write_failures_never_surface() {
    let catalog = catalog_with(
        Arc::new(MemoryStore::new()),
        Arc::new(FailingKeyValueStore),
    );

    assert_eq!(catalog.initialize().await, InitOutcome::Loaded);

    let status = catalog.add_to_favorites(&movie("m1", "Alien")).await;
    assert!(status.is_applied());
    let status = catalog.remove_from_favorites("m1").await;
    assert!(status.is_applied());

    assert!(catalog.error().await.is_none());
    assert!(catalog.favorites().await.is_empty());
}
