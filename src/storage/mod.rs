//! Key-value persistence.
//!
//! The state stores only see [`KeyValueStore`]; [`Database`] (SQLite) backs
//! real sessions and [`MemoryStore`] backs tests and ephemeral sessions.

mod kv;
mod memory;
mod schema;
mod types;

use futures::future::BoxFuture;

pub use memory::MemoryStore;
pub use schema::Database;
pub use types::StorageError;

/// Storage port: string values addressed by string keys.
///
/// Writes replace the previous value wholesale ("last write wins").
pub trait KeyValueStore: Send + Sync {
    fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<Option<String>, StorageError>>;

    fn set<'a>(&'a self, key: &'a str, value: &'a str) -> BoxFuture<'a, Result<(), StorageError>>;

    fn remove<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<(), StorageError>>;
}
