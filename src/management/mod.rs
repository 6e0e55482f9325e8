mod backup;
mod database;

pub use backup::FAVORITES_KEY;
pub use backup::FileKeyValueStore;
pub use backup::KeyValueStore;
pub use backup::MemoryKeyValueStore;
pub use database::Database;
