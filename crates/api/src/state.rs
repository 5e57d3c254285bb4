use std::sync::Arc;

use noteful_db::{DbPool, FolderStore, MemoryStore, NoteStore, PgStore};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Folder data access.
    pub folders: Arc<dyn FolderStore>,
    /// Note data access.
    pub notes: Arc<dyn NoteStore>,
    /// Database connection pool, present only when backed by PostgreSQL.
    pub pool: Option<DbPool>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// State backed by PostgreSQL.
    pub fn postgres(pool: DbPool, config: ServerConfig) -> Self {
        let store = PgStore::new(pool.clone());
        Self {
            folders: Arc::new(store.clone()),
            notes: Arc::new(store),
            pool: Some(pool),
            config: Arc::new(config),
        }
    }

    /// State backed by an in-process store.
    pub fn in_memory(store: MemoryStore, config: ServerConfig) -> Self {
        Self {
            folders: Arc::new(store.clone()),
            notes: Arc::new(store),
            pool: None,
            config: Arc::new(config),
        }
    }

    /// Short name of the storage backend, reported by the health check.
    pub fn storage_label(&self) -> &'static str {
        if self.pool.is_some() {
            "postgres"
        } else {
            "memory"
        }
    }
}
