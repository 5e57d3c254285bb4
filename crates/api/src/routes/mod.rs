pub mod folders;
pub mod health;
pub mod notes;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /folders          list, create
/// /folders/{id}     get, update, delete
///
/// /notes            list, create
/// /notes/{id}       get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/folders", folders::router())
        .nest("/notes", notes::router())
}
