use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Plain-text body served at `/`.
pub const BANNER: &str = "Noteful Server Running!";

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    storage: &'static str,
    db_healthy: bool,
}

async fn banner() -> &'static str {
    BANNER
}

/// Always 200; `db_healthy` reports whether the database answered.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = match &state.pool {
        Some(pool) => match noteful_db::health_check(pool).await {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(error = %err, "Database health check failed");
                false
            }
        },
        None => true,
    };

    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        storage: state.storage_label(),
        db_healthy,
    })
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(banner))
        .route("/health", get(health_check))
}
