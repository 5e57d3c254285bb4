use async_trait::async_trait;
use noteful_core::types::DbId;

use super::{FolderStore, NoteStore, StoreError};
use crate::models::folder::{CreateFolder, Folder, UpdateFolder};
use crate::models::note::{CreateNote, Note, UpdateNote};
use crate::repositories::{FolderRepo, NoteRepo};
use crate::DbPool;

/// PostgreSQL-backed store delegating to the repositories.
///
/// Cloning is cheap; the pool is reference-counted.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FolderStore for PgStore {
    async fn list(&self) -> Result<Vec<Folder>, StoreError> {
        Ok(FolderRepo::list(&self.pool).await?)
    }

    async fn get_by_id(&self, id: DbId) -> Result<Option<Folder>, StoreError> {
        Ok(FolderRepo::find_by_id(&self.pool, id).await?)
    }

    async fn insert(&self, input: &CreateFolder) -> Result<Folder, StoreError> {
        Ok(FolderRepo::create(&self.pool, input).await?)
    }

    async fn update(&self, id: DbId, input: &UpdateFolder) -> Result<u64, StoreError> {
        Ok(FolderRepo::update(&self.pool, id, input).await?)
    }

    async fn delete(&self, id: DbId) -> Result<u64, StoreError> {
        Ok(FolderRepo::delete(&self.pool, id).await?)
    }
}

#[async_trait]
impl NoteStore for PgStore {
    async fn list(&self) -> Result<Vec<Note>, StoreError> {
        Ok(NoteRepo::list(&self.pool).await?)
    }

    async fn get_by_id(&self, id: DbId) -> Result<Option<Note>, StoreError> {
        Ok(NoteRepo::find_by_id(&self.pool, id).await?)
    }

    async fn insert(&self, input: &CreateNote) -> Result<Note, StoreError> {
        Ok(NoteRepo::create(&self.pool, input).await?)
    }

    async fn update(&self, id: DbId, input: &UpdateNote) -> Result<u64, StoreError> {
        Ok(NoteRepo::update(&self.pool, id, input).await?)
    }

    async fn delete(&self, id: DbId) -> Result<u64, StoreError> {
        Ok(NoteRepo::delete(&self.pool, id).await?)
    }
}
