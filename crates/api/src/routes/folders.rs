use axum::routing::get;
use axum::Router;

use crate::handlers::folders;
use crate::state::AppState;

/// Folder routes mounted at `/folders`.
///
/// ```text
/// GET    /       -> list
/// POST   /       -> create
/// GET    /{id}   -> get_by_id
/// PATCH  /{id}   -> update
/// DELETE /{id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(folders::list).post(folders::create))
        .route(
            "/{id}",
            get(folders::get_by_id)
                .patch(folders::update)
                .delete(folders::delete),
        )
}
