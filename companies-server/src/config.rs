//! Store configuration - database location and pool size
//!
//! Loaded from environment variables:
//! - `DATABASE_URL`: SQLite connection string (default: sqlite://companies.db)
//! - `DATABASE_MAX_CONNECTIONS`: pool size (default: 5)

/// Default database location, relative to the working directory
pub const DEFAULT_DATABASE_URL: &str = "sqlite://companies.db";

/// Default maximum connections for the pool.
/// Kept low: SQLite serialises writers anyway.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Store configuration, passed explicitly to the pool constructor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub database_url: String,
    pub max_connections: u32,
}

impl StoreConfig {
    /// Create config from environment variables
    pub fn from_env() -> Self {
        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
        let max_connections = std::env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_MAX_CONNECTIONS);

        Self {
            database_url,
            max_connections,
        }
    }

    /// Config for an explicit database URL
    pub fn with_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }

    /// Private in-memory database (for testing).
    ///
    /// Every SQLite `:memory:` connection is its own database, so the pool
    /// is pinned to a single connection.
    pub fn in_memory() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_uses_one_connection() {
        let config = StoreConfig::in_memory();
        assert_eq!(config.max_connections, 1);
        assert!(config.database_url.contains(":memory:"));
    }

    #[test]
    fn explicit_url_keeps_default_pool_size() {
        let config = StoreConfig::with_url("sqlite:///tmp/companies.db");
        assert_eq!(config.database_url, "sqlite:///tmp/companies.db");
        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
    }
}
