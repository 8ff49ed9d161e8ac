#![forbid(unsafe_code)]

pub mod progress;
pub mod repository;
pub mod snapshot;
pub mod sqlite;

pub use progress::{KvProgressRepository, PROGRESS_KEY, ProgressRepository};
pub use repository::{InMemoryRepository, KeyValueStore, Storage, StorageError};
