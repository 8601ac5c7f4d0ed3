//! Axum middleware stack.

pub mod ip_gate;
