//! Database layer
//!
//! Provides the persistence abstraction for giveaway records. The store is
//! selected by configuration:
//! - SQLite (default, for single-binary deployment)
//! - MySQL (for larger deployments)
//!
//! A trait-based pool abstraction (`DatabasePool`) lets the rest of the
//! application work with either backend without knowing which one is active.

pub mod migrations;
pub mod pool;
pub mod repositories;

pub use pool::{
    create_pool, create_test_pool, DatabasePool, DynDatabasePool, MysqlDatabase, SqliteDatabase,
};
