use axum::{
    Extension, Router,
    routing::{delete, get, patch, post},
};
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tokio::net::TcpListener;

use crate::{Res, api, config, store::MemoryStore};

pub fn router(store: Arc<MemoryStore>) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/lists", get(api::get_lists).post(api::create_list))
        .route(
            "/lists/{id}",
            patch(api::update_list).delete(api::delete_list),
        )
        .route("/lists/{id}/movies", post(api::add_movie))
        .route("/lists/{id}/movies/{movie_id}", delete(api::remove_movie))
        .route("/movies", get(api::get_movies).post(api::create_movie))
        .route(
            "/movies/{id}",
            patch(api::update_movie).delete(api::delete_movie),
        )
        .layer(Extension(store))
}

/// Serves the data API on an already bound listener until the task is dropped.
pub async fn serve(listener: TcpListener, store: Arc<MemoryStore>) -> Res<()> {
    axum::serve(listener, router(store)).await?;
    Ok(())
}

/// Binds the address configured in `CINELIST_SERVER_ADDRESS`.
pub async fn bind() -> Res<TcpListener> {
    let addr = SocketAddr::from_str(&config::server_addr())?;
    Ok(TcpListener::bind(&addr).await?)
}
