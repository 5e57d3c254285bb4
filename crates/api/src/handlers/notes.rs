//! Handlers for the `/notes` resource.

use axum::extract::{OriginalUri, State};
use axum::http::header::LOCATION;
use axum::http::{HeaderName, StatusCode};
use axum::Json;
use chrono::Utc;
use noteful_core::error::CoreError;
use noteful_core::fields;
use noteful_core::types::Timestamp;
use noteful_db::models::note::{CreateNote, UpdateNote};
use serde_json::{Map, Value};

use super::rejected;
use crate::error::AppResult;
use crate::extract::JsonBody;
use crate::middleware::existence::ResolvedNote;
use crate::response::{location, NoteResponse};
use crate::state::AppState;

/// Fields of which a PATCH must carry at least one truthy value.
const UPDATABLE_FIELDS: [&str; 3] = ["name", "content", "folder_id"];

/// GET /api/notes
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<NoteResponse>>> {
    let notes = state.notes.list().await?;
    Ok(Json(notes.iter().map(NoteResponse::from).collect()))
}

/// POST /api/notes
///
/// An unknown `folder_id` is rejected by storage, not here.
pub async fn create(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    JsonBody(body): JsonBody,
) -> AppResult<(StatusCode, [(HeaderName, String); 1], Json<NoteResponse>)> {
    let input = parse_create(&body).map_err(rejected)?;
    let note = state.notes.insert(&input).await?;
    tracing::info!(note_id = note.id, folder_id = note.folder_id, "Note created");

    Ok((
        StatusCode::CREATED,
        [(LOCATION, location(&uri, note.id))],
        Json(NoteResponse::from(&note)),
    ))
}

/// GET /api/notes/{id}
pub async fn get_by_id(ResolvedNote(note): ResolvedNote) -> Json<NoteResponse> {
    Json(NoteResponse::from(&note))
}

/// DELETE /api/notes/{id}
pub async fn delete(
    State(state): State<AppState>,
    ResolvedNote(note): ResolvedNote,
) -> AppResult<StatusCode> {
    state.notes.delete(note.id).await?;
    tracing::info!(note_id = note.id, "Note deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/notes/{id}
///
/// `date_modified` is refreshed to the current time unless the body supplies one.
pub async fn update(
    State(state): State<AppState>,
    ResolvedNote(note): ResolvedNote,
    JsonBody(body): JsonBody,
) -> AppResult<StatusCode> {
    let input = parse_update(&body, Utc::now()).map_err(rejected)?;
    state.notes.update(note.id, &input).await?;
    tracing::info!(note_id = note.id, "Note updated");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Body validation
// ---------------------------------------------------------------------------

/// `name` and `folder_id` must be present and non-null (checked in that
/// order); their truthiness is not checked.
fn parse_create(body: &Map<String, Value>) -> Result<CreateNote, CoreError> {
    let name = required(body, "name")?;
    let folder_id = required(body, "folder_id")?;

    Ok(CreateNote {
        name: fields::text_field("name", name)?,
        content: optional_text(body, "content")?,
        date_modified: optional_timestamp(body)?,
        folder_id: fields::id_field("folder_id", folder_id)?,
    })
}

/// At least one of [`UPDATABLE_FIELDS`] must be truthy, so `content: ""` or
/// `folder_id: 0` on their own do not count as an update.
fn parse_update(body: &Map<String, Value>, now: Timestamp) -> Result<UpdateNote, CoreError> {
    if !UPDATABLE_FIELDS
        .iter()
        .any(|field| fields::truthy(body.get(*field)))
    {
        return Err(CoreError::Validation(
            "Request body must contain 'name', 'content', or 'folder_id'".to_string(),
        ));
    }

    let folder_id = fields::supplied(body.get("folder_id"))
        .map(|value| fields::id_field("folder_id", value))
        .transpose()?;

    Ok(UpdateNote {
        name: optional_text(body, "name")?,
        content: optional_text(body, "content")?,
        folder_id,
        date_modified: optional_timestamp(body)?.unwrap_or(now),
    })
}

fn required<'a>(body: &'a Map<String, Value>, field: &str) -> Result<&'a Value, CoreError> {
    fields::supplied(body.get(field))
        .ok_or_else(|| CoreError::Validation(format!("Missing '{field}' in request body")))
}

fn optional_text(body: &Map<String, Value>, field: &str) -> Result<Option<String>, CoreError> {
    fields::supplied(body.get(field))
        .map(|value| fields::text_field(field, value))
        .transpose()
}

/// A falsy `date_modified` counts as not supplied.
fn optional_timestamp(body: &Map<String, Value>) -> Result<Option<Timestamp>, CoreError> {
    match body.get("date_modified") {
        Some(value) if fields::is_truthy(value) => {
            fields::timestamp_field("date_modified", value).map(Some)
        }
        _ => Ok(None),
    }
}
