use std::sync::Arc;

use axum::{Extension, Json, extract::Path, http::StatusCode};

use crate::{
    api::ApiError,
    store::{MemoryStore, MovieStore},
    types::{Movie, MoviePatch},
};

pub async fn get_movies(
    Extension(store): Extension<Arc<MemoryStore>>,
) -> Result<Json<Vec<Movie>>, ApiError> {
    Ok(Json(store.get_custom_movies().await?))
}

pub async fn create_movie(
    Extension(store): Extension<Arc<MemoryStore>>,
    Json(movie): Json<Movie>,
) -> Result<(StatusCode, Json<Movie>), ApiError> {
    let created = store.create_movie(&movie).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_movie(
    Extension(store): Extension<Arc<MemoryStore>>,
    Path(id): Path<String>,
    Json(patch): Json<MoviePatch>,
) -> Result<Json<Movie>, ApiError> {
    Ok(Json(store.update_movie(&id, &patch).await?))
}

pub async fn delete_movie(
    Extension(store): Extension<Arc<MemoryStore>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    store.delete_movie(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
