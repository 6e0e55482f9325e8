//! Cinelist Movie Catalog Library
//!
//! This library keeps a personal movie catalog: favorites, named lists and
//! custom movies, stored by a local data API and enriched with catalog entries
//! from TMDB.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints of the embedded local data API
//! - `card` - Display model and actions of a movie card
//! - `catalog` - State container owning favorites, lists and custom movies
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `management` - Local database document and key-value snapshots
//! - `server` - Router and listener of the embedded data API
//! - `store` - Persistence contract and its REST and in-memory clients
//! - `tmdb` - TMDB Web API client
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use cinelist::{catalog::MovieCatalog, management::FileKeyValueStore, store::HttpStore};
//!
//! #[tokio::main]
//! async fn main() -> cinelist::Res<()> {
//!     cinelist::config::load_env().await?;
//!     let catalog = MovieCatalog::new(
//!         Arc::new(HttpStore::from_env()),
//!         Arc::new(FileKeyValueStore::default()),
//!         cinelist::config::session(),
//!     );
//!     catalog.initialize().await;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod card;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod management;
pub mod server;
pub mod store;
pub mod tmdb;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Uses a boxed dynamic error trait object with Send + Sync bounds so it can
/// cross await points in async contexts.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// let favorites = catalog.favorites().await;
/// info!("{} favorites", favorites.len());
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// let list = catalog.create_list(NewList::named("Watch Later")).await?;
/// success!("Created list {} ({})", list.name, list.id);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only for fatal errors in the binary. Library code reports failures through
/// return values and [`warning!`].
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// # Example
///
/// ```
/// if let OpStatus::Failed { message, .. } = catalog.add_to_favorites(&movie).await {
///     warning!("{}", message);
/// }
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
