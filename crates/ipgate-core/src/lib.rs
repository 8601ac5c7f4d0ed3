//! # ipgate-core
//!
//! Core crate for IpGate. Contains the configuration schema, the records
//! shared with external collaborators (users, sessions, gate settings),
//! the collaborator traits, and the unified error system.
//!
//! This crate has **no** internal dependencies on other IpGate crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
