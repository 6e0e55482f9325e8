use std::sync::Arc;

use axum::{Extension, Json, extract::Path, http::StatusCode};

use crate::{
    api::ApiError,
    store::{MemoryStore, MovieStore},
    types::{List, ListPatch, Movie},
};

pub async fn get_lists(
    Extension(store): Extension<Arc<MemoryStore>>,
) -> Result<Json<Vec<List>>, ApiError> {
    Ok(Json(store.get_lists().await?))
}

pub async fn create_list(
    Extension(store): Extension<Arc<MemoryStore>>,
    Json(list): Json<List>,
) -> Result<(StatusCode, Json<List>), ApiError> {
    let created = store.create_list(&list).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_list(
    Extension(store): Extension<Arc<MemoryStore>>,
    Path(id): Path<String>,
    Json(patch): Json<ListPatch>,
) -> Result<Json<List>, ApiError> {
    Ok(Json(store.update_list(&id, &patch).await?))
}

pub async fn delete_list(
    Extension(store): Extension<Arc<MemoryStore>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    store.delete_list(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_movie(
    Extension(store): Extension<Arc<MemoryStore>>,
    Path(id): Path<String>,
    Json(movie): Json<Movie>,
) -> Result<Json<List>, ApiError> {
    Ok(Json(store.add_movie_to_list(&id, &movie).await?))
}

pub async fn remove_movie(
    Extension(store): Extension<Arc<MemoryStore>>,
    Path((id, movie_id)): Path<(String, String)>,
) -> Result<Json<List>, ApiError> {
    Ok(Json(store.remove_movie_from_list(&id, &movie_id).await?))
}
