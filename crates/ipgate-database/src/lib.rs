//! # ipgate-database
//!
//! PostgreSQL connection management and the database-backed user
//! directory, session store, and settings store.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
