//! Aggregate allow-list evaluation.

use std::net::{IpAddr, Ipv4Addr};

use super::entry::AllowListEntry;

/// A parsed allow-list.
///
/// Evaluation is a pure OR over the entries: the list permits an address
/// as soon as any entry matches. An empty list permits nobody.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowList {
    entries: Vec<AllowListEntry>,
}

impl AllowList {
    /// Parse the stored allow-list text.
    ///
    /// Entries are separated by newlines; commas from the legacy
    /// single-line format are accepted too. Each entry is trimmed and
    /// blank entries are skipped.
    pub fn parse(text: &str) -> Self {
        let entries = split_entries(text).map(AllowListEntry::parse).collect();
        Self { entries }
    }

    /// The parsed entries, in stored order.
    pub fn entries(&self) -> &[AllowListEntry] {
        &self.entries
    }

    /// True when the list has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The first entry that covers `address`, if any.
    pub fn find_match(&self, address: Ipv4Addr) -> Option<&AllowListEntry> {
        self.entries.iter().find(|entry| entry.matches(address))
    }

    /// Whether `address` is permitted.
    pub fn permits(&self, address: Ipv4Addr) -> bool {
        self.find_match(address).is_some()
    }

    /// Whether an address of either family is permitted.
    ///
    /// IPv4-mapped IPv6 addresses are evaluated as IPv4. Any other IPv6
    /// address is not permitted.
    pub fn permits_ip(&self, address: IpAddr) -> bool {
        as_ipv4(address).is_some_and(|v4| self.permits(v4))
    }

    /// Whether an address recorded as text is permitted.
    ///
    /// Text that does not parse as an address is not permitted.
    pub fn permits_text(&self, address: &str) -> bool {
        address
            .trim()
            .parse::<IpAddr>()
            .is_ok_and(|addr| self.permits_ip(addr))
    }
}

/// Evaluate raw allow-list text against an IPv4 address.
pub fn is_permitted(config_text: &str, address: Ipv4Addr) -> bool {
    split_entries(config_text).any(|raw| AllowListEntry::parse(raw).matches(address))
}

/// Evaluate raw allow-list text against an address of either family.
pub fn is_ip_permitted(config_text: &str, address: IpAddr) -> bool {
    as_ipv4(address).is_some_and(|v4| is_permitted(config_text, v4))
}

/// Narrow an address to IPv4, unwrapping IPv4-mapped IPv6.
pub fn as_ipv4(address: IpAddr) -> Option<Ipv4Addr> {
    match address {
        IpAddr::V4(v4) => Some(v4),
        IpAddr::V6(v6) => v6.to_ipv4_mapped(),
    }
}

/// Trimmed, non-empty entry strings from stored allow-list text.
pub(crate) fn split_entries(text: &str) -> impl Iterator<Item = &str> {
    text.split(['\n', ','])
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
}
