//! The login gate and its operator-facing messages.

pub mod login;
pub mod message;

pub use login::{CredentialOutcome, DenyReason, GateDecision, LoginAttempt, LoginGate};
pub use message::{denial_message, lockout_warning, render_template};
