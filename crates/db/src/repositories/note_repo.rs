//! Repository for the `notes` table.

use noteful_core::types::DbId;
use sqlx::PgPool;

use crate::models::note::{CreateNote, Note, UpdateNote};

const COLUMNS: &str = "id, name, content, date_modified, folder_id";

/// Provides CRUD operations for notes.
pub struct NoteRepo;

impl NoteRepo {
    /// List all notes in insertion order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Note>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notes ORDER BY id ASC");
        sqlx::query_as::<_, Note>(&query).fetch_all(pool).await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Note>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notes WHERE id = $1");
        sqlx::query_as::<_, Note>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new note, returning the created row.
    ///
    /// `date_modified` falls back to `NOW()` when not supplied. A `folder_id`
    /// with no matching folder fails with a foreign-key violation (23503).
    pub async fn create(pool: &PgPool, input: &CreateNote) -> Result<Note, sqlx::Error> {
        let query = format!(
            "INSERT INTO notes (name, content, date_modified, folder_id)
             VALUES ($1, $2, COALESCE($3, NOW()), $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(&input.name)
            .bind(&input.content)
            .bind(input.date_modified)
            .bind(input.folder_id)
            .fetch_one(pool)
            .await
    }

    /// Patch a note. Only non-`None` fields in `input` are applied;
    /// `date_modified` is always overwritten.
    ///
    /// Returns the number of rows updated.
    pub async fn update(pool: &PgPool, id: DbId, input: &UpdateNote) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notes SET
                name = COALESCE($2, name),
                content = COALESCE($3, content),
                folder_id = COALESCE($4, folder_id),
                date_modified = $5
             WHERE id = $1",
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.content)
        .bind(input.folder_id)
        .bind(input.date_modified)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
