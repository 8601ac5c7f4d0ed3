//! Repository implementations of the `ipgate-core` collaborator traits.

pub mod session;
pub mod settings;
pub mod user;

pub use session::SessionRepository;
pub use settings::SettingsRepository;
pub use user::UserRepository;
