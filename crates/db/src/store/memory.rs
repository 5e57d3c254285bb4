use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use noteful_core::types::DbId;
use tokio::sync::RwLock;

use super::{FolderStore, NoteStore, StoreError};
use crate::models::folder::{CreateFolder, Folder, UpdateFolder};
use crate::models::note::{CreateNote, Note, UpdateNote};

/// In-process store with the same observable behaviour as the PostgreSQL
/// schema: sequential ids starting at 1, the `notes.folder_id` foreign key,
/// and cascading folder deletes.
///
/// Clones share the same tables.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

#[derive(Default)]
struct Tables {
    folders: BTreeMap<DbId, Folder>,
    notes: BTreeMap<DbId, Note>,
    folder_seq: DbId,
    note_seq: DbId,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn missing_folder(value: DbId) -> StoreError {
    StoreError::ForeignKeyViolation {
        table: "notes",
        column: "folder_id",
        value,
    }
}

#[async_trait]
impl FolderStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Folder>, StoreError> {
        Ok(self.tables.read().await.folders.values().cloned().collect())
    }

    async fn get_by_id(&self, id: DbId) -> Result<Option<Folder>, StoreError> {
        Ok(self.tables.read().await.folders.get(&id).cloned())
    }

    async fn insert(&self, input: &CreateFolder) -> Result<Folder, StoreError> {
        let mut tables = self.tables.write().await;
        tables.folder_seq += 1;
        let folder = Folder {
            id: tables.folder_seq,
            name: input.name.clone(),
        };
        tables.folders.insert(folder.id, folder.clone());
        Ok(folder)
    }

    async fn update(&self, id: DbId, input: &UpdateFolder) -> Result<u64, StoreError> {
        let mut tables = self.tables.write().await;
        match tables.folders.get_mut(&id) {
            Some(folder) => {
                folder.name = input.name.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: DbId) -> Result<u64, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.folders.remove(&id).is_none() {
            return Ok(0);
        }
        tables.notes.retain(|_, note| note.folder_id != id);
        Ok(1)
    }
}

#[async_trait]
impl NoteStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Note>, StoreError> {
        Ok(self.tables.read().await.notes.values().cloned().collect())
    }

    async fn get_by_id(&self, id: DbId) -> Result<Option<Note>, StoreError> {
        Ok(self.tables.read().await.notes.get(&id).cloned())
    }

    async fn insert(&self, input: &CreateNote) -> Result<Note, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.folders.contains_key(&input.folder_id) {
            return Err(missing_folder(input.folder_id));
        }

        tables.note_seq += 1;
        let note = Note {
            id: tables.note_seq,
            name: input.name.clone(),
            content: input.content.clone(),
            date_modified: input.date_modified.unwrap_or_else(Utc::now),
            folder_id: input.folder_id,
        };
        tables.notes.insert(note.id, note.clone());
        Ok(note)
    }

    async fn update(&self, id: DbId, input: &UpdateNote) -> Result<u64, StoreError> {
        let mut tables = self.tables.write().await;
        if let Some(folder_id) = input.folder_id {
            if !tables.folders.contains_key(&folder_id) {
                return Err(missing_folder(folder_id));
            }
        }

        let Some(note) = tables.notes.get_mut(&id) else {
            return Ok(0);
        };
        if let Some(name) = &input.name {
            note.name = name.clone();
        }
        if let Some(content) = &input.content {
            note.content = Some(content.clone());
        }
        if let Some(folder_id) = input.folder_id {
            note.folder_id = folder_id;
        }
        note.date_modified = input.date_modified;
        Ok(1)
    }

    async fn delete(&self, id: DbId) -> Result<u64, StoreError> {
        let mut tables = self.tables.write().await;
        Ok(u64::from(tables.notes.remove(&id).is_some()))
    }
}
