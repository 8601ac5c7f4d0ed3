//! Custom Axum extractors.

pub mod client_ip;
pub mod credentials;

pub use client_ip::{ClientIp, resolve_client_ip};
pub use credentials::Credentials;
