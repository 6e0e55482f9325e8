//! Configuration management for cinelist.
//!
//! Settings come from environment variables, optionally seeded from a `.env`
//! file in the local data directory:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use std::{env, path::PathBuf};

use thiserror::Error;

use crate::{management::Database, types::Session};

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:3001";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:3001";
pub const DEFAULT_USER_ID: &str = "1";
pub const DEFAULT_TMDB_API_URL: &str = "https://api.themoviedb.org/3";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("cannot prepare data directory: {0}")]
    DataDir(#[from] std::io::Error),

    #[error("cannot read .env file: {0}")]
    Env(#[from] dotenv::Error),
}

/// Loads environment variables from `.env` in the local data directory.
///
/// The file lives at:
/// - Linux: `~/.local/share/cinelist/.env`
/// - macOS: `~/Library/Application Support/cinelist/.env`
/// - Windows: `%LOCALAPPDATA%/cinelist/.env`
///
/// A missing file is not an error; every setting has a default except the
/// TMDB key.
pub async fn load_env() -> Result<(), ConfigError> {
    let path = data_dir().join(".env");
    async_fs::create_dir_all(data_dir()).await?;

    match dotenv::from_path(&path) {
        Ok(()) => Ok(()),
        Err(dotenv::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(ConfigError::Env(e)),
    }
}

pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("cinelist");
    path
}

/// Base URL of the local data API, e.g. `http://127.0.0.1:3001`.
pub fn api_url() -> String {
    env::var("CINELIST_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string())
}

/// Identity of the current session. Stands in for a real login.
pub fn user_id() -> String {
    env::var("CINELIST_USER_ID").unwrap_or_else(|_| DEFAULT_USER_ID.to_string())
}

pub fn session() -> Session {
    Session::new(user_id())
}

/// Address the embedded data API binds to.
pub fn server_addr() -> String {
    env::var("CINELIST_SERVER_ADDRESS").unwrap_or_else(|_| DEFAULT_SERVER_ADDRESS.to_string())
}

/// Database file served by the embedded data API.
pub fn db_path() -> PathBuf {
    env::var("CINELIST_DB_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| Database::default_path())
}

pub fn tmdb_api_url() -> String {
    env::var("TMDB_API_URL").unwrap_or_else(|_| DEFAULT_TMDB_API_URL.to_string())
}

/// TMDB v3 API key. Only needed for catalog lookups.
pub fn tmdb_api_key() -> Result<String, ConfigError> {
    env::var("TMDB_API_KEY").map_err(|_| ConfigError::Missing("TMDB_API_KEY"))
}
