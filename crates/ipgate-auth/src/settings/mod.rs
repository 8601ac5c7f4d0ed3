//! Runtime gate settings: validated writes and optional in-process caching.

pub mod memory;
pub mod service;

pub use memory::MemorySettingsStore;
pub use service::SettingsService;
