//! Records shared between IpGate and its external collaborators.

pub mod id;
pub mod session;
pub mod settings;
pub mod user;

pub use id::*;
pub use session::SessionRecord;
pub use settings::GateSettings;
pub use user::UserRecord;
