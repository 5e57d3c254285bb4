//! Storage traits consumed by the HTTP layer.
//!
//! Handlers never touch a pool directly; they hold `Arc<dyn FolderStore>` and
//! `Arc<dyn NoteStore>`, so the same routers run against PostgreSQL
//! ([`PgStore`]) or the in-process [`MemoryStore`].
//!
//! Stores do no validation and no sanitization. A lookup that matches no row
//! returns `Ok(None)`; turning that into a 404 is the caller's job.

mod memory;
mod pg;

use async_trait::async_trait;
use noteful_core::types::DbId;

use crate::models::folder::{CreateFolder, Folder, UpdateFolder};
use crate::models::note::{CreateNote, Note, UpdateNote};

pub use memory::MemoryStore;
pub use pg::PgStore;

/// Failure reported by a storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Raised by backends that enforce referential integrity themselves.
    #[error("insert or update on table \"{table}\" violates foreign key constraint: {column} {value} does not exist")]
    ForeignKeyViolation {
        table: &'static str,
        column: &'static str,
        value: DbId,
    },
}

/// Data access for the `folders` table.
#[async_trait]
pub trait FolderStore: Send + Sync {
    /// All folders in insertion order.
    async fn list(&self) -> Result<Vec<Folder>, StoreError>;

    async fn get_by_id(&self, id: DbId) -> Result<Option<Folder>, StoreError>;

    async fn insert(&self, input: &CreateFolder) -> Result<Folder, StoreError>;

    /// Returns the number of rows updated.
    async fn update(&self, id: DbId, input: &UpdateFolder) -> Result<u64, StoreError>;

    /// Returns the number of folders deleted. Notes in the folder are
    /// deleted along with it.
    async fn delete(&self, id: DbId) -> Result<u64, StoreError>;
}

/// Data access for the `notes` table.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// All notes in insertion order.
    async fn list(&self) -> Result<Vec<Note>, StoreError>;

    async fn get_by_id(&self, id: DbId) -> Result<Option<Note>, StoreError>;

    /// Fails when `input.folder_id` does not reference an existing folder.
    async fn insert(&self, input: &CreateNote) -> Result<Note, StoreError>;

    async fn update(&self, id: DbId, input: &UpdateNote) -> Result<u64, StoreError>;

    async fn delete(&self, id: DbId) -> Result<u64, StoreError>;
}
