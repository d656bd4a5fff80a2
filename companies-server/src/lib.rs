//! companies-server: HTTP API for company records
//!
//! Validates tax ids and activity codes, pages and sorts listings, and
//! persists companies in a single SQLite table with partial-update
//! semantics.

pub mod config;
pub mod db;
pub mod http;
pub mod models;

pub use config::StoreConfig;
pub use db::{create_pool, init_schema, Company, CompanyRepo, DbError};
pub use http::{build_router, run_server, ApiError, ServerConfig};
