use std::sync::Arc;

use axum::{Extension, response::Json};
use serde_json::{Value, json};

use crate::store::MemoryStore;

/// Liveness plus a count of the records being served.
pub async fn health(Extension(store): Extension<Arc<MemoryStore>>) -> Json<Value> {
    let db = store.snapshot().await;
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "lists": db.lists.len(),
        "movies": db.movies.len(),
        "persisted": store.path().is_some(),
    }))
}
