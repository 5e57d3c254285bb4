//! Request handlers for the `/api/folders` and `/api/notes` resources.

pub mod folders;
pub mod notes;

use noteful_core::error::CoreError;

use crate::error::AppError;

/// Log a rejected request body and convert it into a 400 response.
fn rejected(err: CoreError) -> AppError {
    tracing::error!(error = %err, "Rejected request body");
    AppError::Core(err)
}
