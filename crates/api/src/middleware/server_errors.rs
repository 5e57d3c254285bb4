use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::error::{verbose_error_body, ServerErrorDetail};
use crate::state::AppState;

/// Top-level responder for unhandled failures.
///
/// Handlers always emit a redacted 500 body and attach the raw detail as a
/// [`ServerErrorDetail`] extension. Outside production the body is replaced
/// with one that carries the detail.
pub async fn render_server_errors(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    let response = next.run(req).await;
    if !state.config.expose_error_details() {
        return response;
    }

    match response.extensions().get::<ServerErrorDetail>() {
        Some(ServerErrorDetail(detail)) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(verbose_error_body(detail)),
        )
            .into_response(),
        None => response,
    }
}
