//! # ipgate-api
//!
//! HTTP surface for IpGate built on Axum.
//!
//! The login page and the login endpoint sit behind the pre-login gate
//! middleware; the health check does not.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
