//! Repository implementations for database access

pub mod companies;

pub use companies::{Company, CompanyRepo};
