pub mod json;
pub mod memory;

#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use json::JsonFileStorage;
pub use memory::InMemoryStorage;

#[cfg(feature = "sqlite")]
pub use sqlite::SQLiteStorage;
