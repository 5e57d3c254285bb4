#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// `id` is the raw path segment, which may not even be numeric.
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Message shown to clients for this error.
    ///
    /// Internal errors are never rendered through this path; the server-error
    /// responder decides how much of them to reveal.
    pub fn client_message(&self) -> String {
        match self {
            CoreError::NotFound { entity, .. } => format!("{entity} doesn't exist"),
            CoreError::Validation(msg) => msg.clone(),
            CoreError::Internal(msg) => msg.clone(),
        }
    }
}
