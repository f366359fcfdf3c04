//! Database connection pool and key-value operations.

pub mod connection;
pub mod kv;

pub use connection::{connect, count_entries, ensure_schema, get_version};
