//! Folder entity model and DTOs.

use noteful_core::types::DbId;
use sqlx::FromRow;

/// A folder row from the `folders` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Folder {
    pub id: DbId,
    pub name: String,
}

/// DTO for creating a new folder.
#[derive(Debug, Clone)]
pub struct CreateFolder {
    pub name: String,
}

/// DTO for renaming a folder. The name is the only mutable column.
#[derive(Debug, Clone)]
pub struct UpdateFolder {
    pub name: String,
}
