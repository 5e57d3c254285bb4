//! Note entity model and DTOs.

use noteful_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A note row from the `notes` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Note {
    pub id: DbId,
    pub name: String,
    pub content: Option<String>,
    pub date_modified: Timestamp,
    pub folder_id: DbId,
}

/// DTO for creating a new note.
#[derive(Debug, Clone)]
pub struct CreateNote {
    pub name: String,
    pub content: Option<String>,
    /// Defaults to the insertion time if omitted.
    pub date_modified: Option<Timestamp>,
    pub folder_id: DbId,
}

/// DTO for patching a note. `None` fields are left unchanged;
/// `date_modified` is always written.
#[derive(Debug, Clone)]
pub struct UpdateNote {
    pub name: Option<String>,
    pub content: Option<String>,
    pub folder_id: Option<DbId>,
    pub date_modified: Timestamp,
}
