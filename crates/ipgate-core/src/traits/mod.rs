//! Collaborator traits defined in `ipgate-core` and implemented by other crates.

pub mod directory;
pub mod session_store;
pub mod settings_store;

pub use directory::{PasswordVerifier, UserDirectory};
pub use session_store::SessionStore;
pub use settings_store::SettingsStore;
