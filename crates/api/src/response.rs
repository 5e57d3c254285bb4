//! Outgoing representations of folders and notes.
//!
//! Every text field supplied by users passes through
//! [`sanitize`](noteful_core::sanitize::sanitize) here, so no handler can
//! return stored markup verbatim.

use axum::http::Uri;
use noteful_core::sanitize::sanitize;
use noteful_core::types::{DbId, Timestamp};
use noteful_db::models::folder::Folder;
use noteful_db::models::note::Note;
use serde::Serialize;

/// Serialized folder: exactly `id` and `name`.
#[derive(Debug, Serialize)]
pub struct FolderResponse {
    pub id: DbId,
    pub name: String,
}

impl From<&Folder> for FolderResponse {
    fn from(folder: &Folder) -> Self {
        Self {
            id: folder.id,
            name: sanitize(&folder.name),
        }
    }
}

/// Serialized note. Missing content is rendered as an empty string.
#[derive(Debug, Serialize)]
pub struct NoteResponse {
    pub id: DbId,
    pub name: String,
    pub content: String,
    pub date_modified: Timestamp,
    pub folder_id: DbId,
}

impl From<&Note> for NoteResponse {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id,
            name: sanitize(&note.name),
            content: sanitize(note.content.as_deref().unwrap_or_default()),
            date_modified: note.date_modified,
            folder_id: note.folder_id,
        }
    }
}

/// `Location` of a newly created resource: the request path joined with its id.
pub fn location(uri: &Uri, id: DbId) -> String {
    format!("{}/{id}", uri.path().trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn folder_name_is_sanitized() {
        let folder = Folder {
            id: 911,
            name: r#"Naughty <script>alert("xss");</script>"#.to_string(),
        };
        let body = serde_json::to_value(FolderResponse::from(&folder)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "id": 911,
                "name": r#"Naughty &lt;script&gt;alert("xss");&lt;/script&gt;"#,
            })
        );
    }

    #[test]
    fn note_without_content_renders_empty_string() {
        let note = Note {
            id: 1,
            name: "Dogs".into(),
            content: None,
            date_modified: Utc.with_ymd_and_hms(2019, 1, 3, 0, 0, 0).unwrap(),
            folder_id: 2,
        };
        let body = serde_json::to_value(NoteResponse::from(&note)).unwrap();
        assert_eq!(body["content"], "");
        assert_eq!(body["date_modified"], "2019-01-03T00:00:00Z");
        assert_eq!(body["folder_id"], 2);
    }

    #[test]
    fn location_joins_path_and_id() {
        let uri: Uri = "/api/folders".parse().unwrap();
        assert_eq!(location(&uri, 7), "/api/folders/7");

        let uri: Uri = "/api/notes/?draft=1".parse().unwrap();
        assert_eq!(location(&uri, 3), "/api/notes/3");
    }
}
