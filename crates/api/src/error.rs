use std::any::Any;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use noteful_core::error::CoreError;
use noteful_db::StoreError;
use serde_json::{json, Value};

/// Message returned for 500 responses when error details are hidden.
pub const REDACTED_MESSAGE: &str = "server error";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`StoreError`] for storage
/// failures. Implements [`IntoResponse`] to produce the
/// `{ "error": { "message": ... } }` body.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `noteful_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Any failure reported by the storage backend.
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// A request body that could not be read as a JSON object.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// Raw detail of a 500 response, carried as a response extension so the
/// server-error middleware can decide whether to reveal it.
#[derive(Debug, Clone)]
pub struct ServerErrorDetail(pub String);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Core(err @ CoreError::NotFound { .. }) => {
                client_error(StatusCode::NOT_FOUND, &err.client_message())
            }
            AppError::Core(CoreError::Validation(msg)) => {
                client_error(StatusCode::BAD_REQUEST, &msg)
            }
            AppError::Core(CoreError::Internal(msg)) => server_error(msg),
            AppError::Store(err) => server_error(err.to_string()),
            AppError::BadRequest(msg) => client_error(StatusCode::BAD_REQUEST, &msg),
        }
    }
}

/// The `{ "error": { "message": ... } }` body used for every client error
/// and for redacted server errors.
pub fn error_body(message: &str) -> Value {
    json!({ "error": { "message": message } })
}

/// The body used for server errors when details may be shown.
pub fn verbose_error_body(detail: &str) -> Value {
    json!({
        "message": detail,
        "error": { "message": detail },
    })
}

/// Response for a handler that panicked: a 500 like any other server error.
///
/// Installed with `CatchPanicLayer::custom`.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else {
        "unknown panic payload".to_string()
    };
    server_error(format!("Handler panicked: {detail}"))
}

fn client_error(status: StatusCode, message: &str) -> Response {
    (status, axum::Json(error_body(message))).into_response()
}

fn server_error(detail: String) -> Response {
    tracing::error!(error = %detail, "Unhandled server error");
    let mut response = (
        StatusCode::INTERNAL_SERVER_ERROR,
        axum::Json(error_body(REDACTED_MESSAGE)),
    )
        .into_response();
    response.extensions_mut().insert(ServerErrorDetail(detail));
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404_with_entity_message() {
        let response = AppError::Core(CoreError::NotFound {
            entity: "Note",
            id: "9".to_string(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.extensions().get::<ServerErrorDetail>().is_none());
    }

    #[test]
    fn validation_and_bad_request_map_to_400() {
        let validation = AppError::Core(CoreError::Validation("nope".into())).into_response();
        assert_eq!(validation.status(), StatusCode::BAD_REQUEST);

        let bad_request = AppError::BadRequest("Malformed JSON".into()).into_response();
        assert_eq!(bad_request.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn storage_errors_carry_their_detail() {
        let response = AppError::Store(StoreError::ForeignKeyViolation {
            table: "notes",
            column: "folder_id",
            value: 3,
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let detail = response.extensions().get::<ServerErrorDetail>().unwrap();
        assert!(detail.0.contains("folder_id 3 does not exist"));
    }

    #[test]
    fn panics_become_redacted_server_errors() {
        let response = panic_response(Box::new("index out of bounds"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let detail = response.extensions().get::<ServerErrorDetail>().unwrap();
        assert_eq!(detail.0, "Handler panicked: index out of bounds");

        let formatted = panic_response(Box::new(format!("row {}", 7)));
        let detail = formatted.extensions().get::<ServerErrorDetail>().unwrap();
        assert_eq!(detail.0, "Handler panicked: row 7");
    }

    #[test]
    fn verbose_body_repeats_the_detail() {
        assert_eq!(
            verbose_error_body("boom"),
            json!({"message": "boom", "error": {"message": "boom"}})
        );
        assert_eq!(
            error_body(REDACTED_MESSAGE),
            json!({"error": {"message": "server error"}})
        );
    }
}
