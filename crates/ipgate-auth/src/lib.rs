//! # ipgate-auth
//!
//! Address-based access control for logins and live sessions.
//!
//! ## Modules
//!
//! - `allowlist`: IPv4 allow-list parsing, matching, and validation
//! - `gate`: pre-login and credential-time checks, denial messages
//! - `session`: reaping sessions whose address is no longer permitted
//! - `settings`: validated, optionally cached access to gate settings
//! - `password`: Argon2id password verification
//! - `directory`: in-memory user directory

pub mod allowlist;
pub mod directory;
pub mod gate;
pub mod password;
pub mod session;
pub mod settings;

pub use allowlist::{AllowList, AllowListEntry, is_ip_permitted, is_permitted};
pub use directory::MemoryUserDirectory;
pub use gate::{CredentialOutcome, DenyReason, GateDecision, LoginAttempt, LoginGate};
pub use password::PasswordHasher;
pub use session::{MemorySessionStore, ReapProgress, ReapReport, SessionReaper};
pub use settings::{MemorySettingsStore, SettingsService};
