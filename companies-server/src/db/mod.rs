//! Database layer - connection pool, schema and repositories
//!
//! # Design Principles
//!
//! - Pool passed explicitly - no global connection or implicit file location
//! - Every value is a bound parameter; identifiers come from static allow-lists
//! - Writes run in a transaction that is rolled back on failure

pub mod error;
pub mod pool;
pub mod repos;
pub mod schema;

pub use error::DbError;
pub use pool::create_pool;
pub use repos::*;
pub use schema::init_schema;
