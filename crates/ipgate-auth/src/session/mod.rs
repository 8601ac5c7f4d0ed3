//! Session invalidation under the allow-list policy.

pub mod memory;
pub mod reaper;

pub use memory::MemorySessionStore;
pub use reaper::{ReapProgress, ReapReport, SessionReaper};
