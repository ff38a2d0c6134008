//! Corpora Database Layer
//!
//! SQLite persistence for corpora and their texts.

pub mod migrations;
pub mod pool;
pub mod queries;

pub use pool::{init_pool, DbError, DbPool, DbResult};
