//! IPv4 allow-list parsing, matching, and validation.
//!
//! - `entry`: one rule: exact address, dotted prefix, CIDR block, or
//!   dashed last-octet range
//! - `policy`: OR-evaluation of a whole list against an address
//! - `validator`: write-time checks and legacy format upgrade

pub mod entry;
pub mod policy;
pub mod validator;

pub use entry::{AllowListEntry, EntryError};
pub use policy::{AllowList, as_ipv4, is_ip_permitted, is_permitted};
pub use validator::{InvalidEntry, ensure_valid, normalize, upgrade_legacy, validate};
