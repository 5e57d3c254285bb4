use axum::http::HeaderValue;

/// Deployment environment, selected by `APP_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

/// Which storage implementation backs the resource routers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Configuration errors detected at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be {expected}, got '{value}'")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("DATABASE_URL must be set when STORAGE_BACKEND is 'postgres'")]
    MissingDatabaseUrl,
}

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    pub environment: Environment,
    /// Allowed CORS origins. A single `*` allows any origin.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub storage: StorageBackend,
    /// Required when `storage` is [`StorageBackend::Postgres`].
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub log_format: LogFormat,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default     |
    /// |----------------------------|-------------|
    /// | `HOST`                     | `0.0.0.0`   |
    /// | `PORT`                     | `8000`      |
    /// | `APP_ENV`                  | development |
    /// | `CORS_ORIGINS`             | `*`         |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`        |
    /// | `STORAGE_BACKEND`          | `postgres`  |
    /// | `DATABASE_URL`             | (none)      |
    /// | `DATABASE_MAX_CONNECTIONS` | `20`        |
    /// | `LOG_FORMAT`               | `pretty`    |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let host = var("HOST", "0.0.0.0");
        let port = parse_number("PORT", var("PORT", "8000"))?;

        let environment = match var("APP_ENV", "development").to_ascii_lowercase().as_str() {
            "production" => Environment::Production,
            _ => Environment::Development,
        };

        let cors_origins: Vec<String> = var("CORS_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        for origin in &cors_origins {
            if origin != "*" && origin.parse::<HeaderValue>().is_err() {
                return Err(ConfigError::Invalid {
                    var: "CORS_ORIGINS",
                    expected: "a comma-separated list of origins",
                    value: origin.clone(),
                });
            }
        }

        let request_timeout_secs =
            parse_number("REQUEST_TIMEOUT_SECS", var("REQUEST_TIMEOUT_SECS", "30"))?;

        let storage = match var("STORAGE_BACKEND", "postgres").to_ascii_lowercase().as_str() {
            "postgres" => StorageBackend::Postgres,
            "memory" => StorageBackend::Memory,
            other => {
                return Err(ConfigError::Invalid {
                    var: "STORAGE_BACKEND",
                    expected: "'postgres' or 'memory'",
                    value: other.to_string(),
                })
            }
        };

        let database_url = lookup("DATABASE_URL").filter(|url| !url.is_empty());
        if storage == StorageBackend::Postgres && database_url.is_none() {
            return Err(ConfigError::MissingDatabaseUrl);
        }

        let database_max_connections = parse_number(
            "DATABASE_MAX_CONNECTIONS",
            var("DATABASE_MAX_CONNECTIONS", "20"),
        )?;

        let log_format = match var("LOG_FORMAT", "pretty").to_ascii_lowercase().as_str() {
            "pretty" => LogFormat::Pretty,
            "json" => LogFormat::Json,
            other => {
                return Err(ConfigError::Invalid {
                    var: "LOG_FORMAT",
                    expected: "'pretty' or 'json'",
                    value: other.to_string(),
                })
            }
        };

        Ok(Self {
            host,
            port,
            environment,
            cors_origins,
            request_timeout_secs,
            storage,
            database_url,
            database_max_connections,
            log_format,
        })
    }

    /// Whether 500 responses may carry the underlying error text.
    pub fn expose_error_details(&self) -> bool {
        self.environment != Environment::Production
    }

    /// Tracing filter used when `RUST_LOG` is not set.
    pub fn default_log_filter(&self) -> &'static str {
        match self.environment {
            Environment::Production => "noteful_api=info,tower_http=info",
            Environment::Development => "noteful_api=debug,tower_http=debug",
        }
    }
}

fn parse_number<T: std::str::FromStr>(var: &'static str, value: String) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        var,
        expected: "a non-negative integer",
        value,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn load(pairs: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_with_memory_storage() {
        let config = load(&[("STORAGE_BACKEND", "memory")]).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8000);
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.cors_origins, vec!["*".to_string()]);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.storage, StorageBackend::Memory);
        assert_eq!(config.database_max_connections, 20);
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert!(config.expose_error_details());
    }

    #[test]
    fn postgres_requires_database_url() {
        assert_matches!(load(&[]), Err(ConfigError::MissingDatabaseUrl));

        let config = load(&[("DATABASE_URL", "postgres://localhost/noteful")]).unwrap();
        assert_eq!(config.storage, StorageBackend::Postgres);
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://localhost/noteful")
        );
    }

    #[test]
    fn production_hides_error_details() {
        let config = load(&[("STORAGE_BACKEND", "memory"), ("APP_ENV", "Production")]).unwrap();
        assert_eq!(config.environment, Environment::Production);
        assert!(!config.expose_error_details());
        assert_eq!(config.default_log_filter(), "noteful_api=info,tower_http=info");
    }

    #[test]
    fn cors_origins_are_split_and_trimmed() {
        let config = load(&[
            ("STORAGE_BACKEND", "memory"),
            ("CORS_ORIGINS", "http://localhost:3000, https://noteful.example ,"),
        ])
        .unwrap();
        assert_eq!(
            config.cors_origins,
            vec!["http://localhost:3000", "https://noteful.example"]
        );
    }

    #[test]
    fn invalid_port_is_rejected() {
        let err = load(&[("STORAGE_BACKEND", "memory"), ("PORT", "eighty")]).unwrap_err();
        assert_matches!(err, ConfigError::Invalid { var: "PORT", .. });
    }

    #[test]
    fn unknown_storage_backend_is_rejected() {
        let err = load(&[("STORAGE_BACKEND", "sqlite")]).unwrap_err();
        assert_matches!(err, ConfigError::Invalid { var: "STORAGE_BACKEND", .. });
    }

    #[test]
    fn json_log_format() {
        let config = load(&[("STORAGE_BACKEND", "memory"), ("LOG_FORMAT", "json")]).unwrap();
        assert_eq!(config.log_format, LogFormat::Json);
    }
}
