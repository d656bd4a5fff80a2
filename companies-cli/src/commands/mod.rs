//! Command implementations for the companies CLI

pub mod init_db;
pub mod serve;

use companies_server::StoreConfig;

// Re-export main dispatcher functions for flat access from main.rs
pub use init_db::{run_init_db, InitDbArgs};
pub use serve::{run_serve, ServeArgs};

/// Resolve store config: explicit flag/env value first, library defaults after.
fn store_config(database_url: Option<String>, max_connections: Option<u32>) -> StoreConfig {
    let mut config = StoreConfig::from_env();
    if let Some(url) = database_url {
        config.database_url = url;
    }
    if let Some(max) = max_connections {
        config.max_connections = max;
    }
    config
}
