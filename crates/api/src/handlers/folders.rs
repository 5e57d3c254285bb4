//! Handlers for the `/folders` resource.

use axum::extract::{OriginalUri, State};
use axum::http::header::LOCATION;
use axum::http::{HeaderName, StatusCode};
use axum::Json;
use noteful_core::error::CoreError;
use noteful_core::fields;
use noteful_db::models::folder::{CreateFolder, UpdateFolder};
use serde_json::{Map, Value};

use super::rejected;
use crate::error::AppResult;
use crate::extract::JsonBody;
use crate::middleware::existence::ResolvedFolder;
use crate::response::{location, FolderResponse};
use crate::state::AppState;

/// GET /api/folders
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<FolderResponse>>> {
    let folders = state.folders.list().await?;
    Ok(Json(folders.iter().map(FolderResponse::from).collect()))
}

/// POST /api/folders
pub async fn create(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    JsonBody(body): JsonBody,
) -> AppResult<(StatusCode, [(HeaderName, String); 1], Json<FolderResponse>)> {
    let input = parse_create(&body).map_err(rejected)?;
    let folder = state.folders.insert(&input).await?;
    tracing::info!(folder_id = folder.id, "Folder created");

    Ok((
        StatusCode::CREATED,
        [(LOCATION, location(&uri, folder.id))],
        Json(FolderResponse::from(&folder)),
    ))
}

/// GET /api/folders/{id}
pub async fn get_by_id(ResolvedFolder(folder): ResolvedFolder) -> Json<FolderResponse> {
    Json(FolderResponse::from(&folder))
}

/// DELETE /api/folders/{id}
///
/// Notes in the folder are removed by the storage layer.
pub async fn delete(
    State(state): State<AppState>,
    ResolvedFolder(folder): ResolvedFolder,
) -> AppResult<StatusCode> {
    state.folders.delete(folder.id).await?;
    tracing::info!(folder_id = folder.id, "Folder deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/folders/{id}
pub async fn update(
    State(state): State<AppState>,
    ResolvedFolder(folder): ResolvedFolder,
    JsonBody(body): JsonBody,
) -> AppResult<StatusCode> {
    let input = parse_update(&body).map_err(rejected)?;
    state.folders.update(folder.id, &input).await?;
    tracing::info!(folder_id = folder.id, "Folder updated");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Body validation
// ---------------------------------------------------------------------------

fn parse_create(body: &Map<String, Value>) -> Result<CreateFolder, CoreError> {
    let name = truthy_name(body, "Missing 'name' in request body")?;
    Ok(CreateFolder { name })
}

fn parse_update(body: &Map<String, Value>) -> Result<UpdateFolder, CoreError> {
    let name = truthy_name(body, "Request body must contain a value for 'name'")?;
    Ok(UpdateFolder { name })
}

/// A folder name must be truthy: missing, `null` and `""` are all rejected.
fn truthy_name(body: &Map<String, Value>, missing: &str) -> Result<String, CoreError> {
    match body.get("name") {
        Some(value) if fields::is_truthy(value) => fields::text_field("name", value),
        _ => Err(CoreError::Validation(missing.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    fn body(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!("test bodies are objects"),
        }
    }

    #[test]
    fn create_requires_a_truthy_name() {
        for payload in [json!({}), json!({"name": ""}), json!({"name": null}), json!({"name": 0})] {
            assert_matches!(
                parse_create(&body(payload)),
                Err(CoreError::Validation(msg)) if msg == "Missing 'name' in request body"
            );
        }
    }

    #[test]
    fn create_keeps_only_the_name() {
        let input = parse_create(&body(json!({"name": "Test new folder", "id": 99}))).unwrap();
        assert_eq!(input.name, "Test new folder");
    }

    #[test]
    fn update_names_the_required_field() {
        assert_matches!(
            parse_update(&body(json!({"irrelevantField": "foo"}))),
            Err(CoreError::Validation(msg)) if msg == "Request body must contain a value for 'name'"
        );
    }

    #[test]
    fn numeric_names_are_stored_as_text() {
        let input = parse_update(&body(json!({"name": 2024}))).unwrap();
        assert_eq!(input.name, "2024");
    }
}
