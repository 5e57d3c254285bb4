//! Existence gate for `/{id}` routes.
//!
//! GET, PATCH and DELETE on a single resource all start by resolving the id.
//! The extractors below do that once, before any body is read, so the verb
//! handlers receive the row itself and never run for a missing one:
//!
//! ```ignore
//! async fn get_by_id(ResolvedFolder(folder): ResolvedFolder) -> Json<FolderResponse> {
//!     Json(FolderResponse::from(&folder))
//! }
//! ```

use std::future::Future;

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use noteful_core::error::CoreError;
use noteful_core::types::DbId;
use noteful_db::models::folder::Folder;
use noteful_db::models::note::Note;
use noteful_db::StoreError;

use crate::error::AppError;
use crate::state::AppState;

/// The folder named by the `{id}` path segment.
#[derive(Debug, Clone)]
pub struct ResolvedFolder(pub Folder);

/// The note named by the `{id}` path segment.
#[derive(Debug, Clone)]
pub struct ResolvedNote(pub Note);

impl FromRequestParts<AppState> for ResolvedFolder {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let raw_id = path_id(parts, state).await?;
        let folder =
            resolve_or_not_found("Folder", &raw_id, |id| state.folders.get_by_id(id)).await?;
        Ok(ResolvedFolder(folder))
    }
}

impl FromRequestParts<AppState> for ResolvedNote {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let raw_id = path_id(parts, state).await?;
        let note = resolve_or_not_found("Note", &raw_id, |id| state.notes.get_by_id(id)).await?;
        Ok(ResolvedNote(note))
    }
}

/// Look up `raw_id` with `lookup`, mapping "no such row" to a 404.
///
/// An id that is not an integer cannot name any row and is a 404 as well.
/// Storage failures pass through untouched.
pub async fn resolve_or_not_found<T, F, Fut>(
    entity: &'static str,
    raw_id: &str,
    lookup: F,
) -> Result<T, AppError>
where
    F: FnOnce(DbId) -> Fut,
    Fut: Future<Output = Result<Option<T>, StoreError>>,
{
    let not_found = || {
        tracing::error!(entity, id = raw_id, "{entity} not found");
        AppError::Core(CoreError::NotFound {
            entity,
            id: raw_id.to_string(),
        })
    };

    let Ok(id) = raw_id.parse::<DbId>() else {
        return Err(not_found());
    };

    lookup(id).await?.ok_or_else(not_found)
}

async fn path_id(parts: &mut Parts, state: &AppState) -> Result<String, AppError> {
    let Path(raw_id) = Path::<String>::from_request_parts(parts, state)
        .await
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    Ok(raw_id)
}
