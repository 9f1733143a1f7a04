//! Concrete persistence adapters: SQLite content repository and the local
//! filesystem media store.

pub mod local_media;
pub mod sqlite;

pub use local_media::LocalMediaStore;
pub use sqlite::SqliteContentRepo;
