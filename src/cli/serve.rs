use std::sync::Arc;

use crate::{config, error, info, server, store::MemoryStore};

pub async fn serve() {
    let path = config::db_path();
    let store = match MemoryStore::open(&path).await {
        Ok(store) => Arc::new(store),
        Err(e) => error!("Failed to open database {}: {}", path.display(), e),
    };

    let listener = match server::bind().await {
        Ok(listener) => listener,
        Err(e) => error!("Failed to bind {}: {}", config::server_addr(), e),
    };

    match listener.local_addr() {
        Ok(addr) => info!("Serving {} on http://{}", path.display(), addr),
        Err(_) => info!("Serving {}", path.display()),
    }

    if let Err(e) = server::serve(listener, store).await {
        error!("Server stopped: {}", e);
    }
}
