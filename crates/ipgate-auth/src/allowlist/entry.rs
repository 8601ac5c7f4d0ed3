//! A single allow-list entry and the rules for matching it against an address.

use std::fmt;
use std::net::Ipv4Addr;

use ipnet::Ipv4Net;
use thiserror::Error;

/// Why an entry string could not be understood.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryError {
    /// The part before `/` is not a complete IPv4 address.
    #[error("network '{0}' is not a valid IPv4 address")]
    InvalidNetwork(String),
    /// The part after `/` is not a number in `0..=32`.
    #[error("prefix length '{0}' must be a number between 0 and 32")]
    InvalidPrefixLength(String),
    /// A dashed range that is not `a.b.c.start-end`.
    #[error("range must look like a.b.c.start-end")]
    MalformedRange,
    /// A dashed range whose bounds are reversed.
    #[error("range start {start} is greater than range end {end}")]
    ReversedRange {
        /// First octet of the range.
        start: u8,
        /// Last octet of the range.
        end: u8,
    },
    /// Neither an address nor a dotted-decimal prefix.
    #[error("not an IPv4 address or dotted prefix")]
    Unrecognized,
}

/// One parsed allow-list rule.
///
/// Parsing never fails: text that cannot be understood becomes
/// [`AllowListEntry::Literal`], which is compared verbatim against the
/// address text and in practice never matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowListEntry {
    /// A complete address, e.g. `10.0.0.1`.
    Exact(Ipv4Addr),
    /// One to three leading dotted groups, e.g. `192.168`.
    Prefix(String),
    /// A CIDR block, e.g. `10.40.22.0/24`. Host bits may be set.
    Cidr(Ipv4Net),
    /// A dashed last-octet range, e.g. `192.168.1.1-200`.
    Range {
        /// The first three octets, which must match exactly.
        base: [u8; 3],
        /// Lowest permitted last octet (inclusive).
        start: u8,
        /// Highest permitted last octet (inclusive).
        end: u8,
    },
    /// Unparseable text kept for exact-string comparison.
    Literal(String),
}

impl AllowListEntry {
    /// Parse one entry, degrading to [`AllowListEntry::Literal`] on bad input.
    ///
    /// Surrounding whitespace is ignored.
    pub fn parse(raw: &str) -> Self {
        let text = raw.trim();
        Self::try_parse(text).unwrap_or_else(|_| Self::Literal(text.to_string()))
    }

    /// Parse one entry, reporting why it is not usable.
    pub fn try_parse(raw: &str) -> Result<Self, EntryError> {
        let text = raw.trim();

        if let Some((network, len)) = text.split_once('/') {
            let network: Ipv4Addr = network
                .parse()
                .map_err(|_| EntryError::InvalidNetwork(network.to_string()))?;
            return len
                .parse::<u8>()
                .ok()
                .and_then(|prefix_len| Ipv4Net::new(network, prefix_len).ok())
                .map(Self::Cidr)
                .ok_or_else(|| EntryError::InvalidPrefixLength(len.to_string()));
        }

        let last_segment = text.rsplit('.').next().unwrap_or(text);
        if last_segment.contains('-') {
            return parse_range(text);
        }

        if let Ok(addr) = text.parse::<Ipv4Addr>() {
            return Ok(Self::Exact(addr));
        }

        let prefix = text.strip_suffix('.').unwrap_or(text);
        let groups: Vec<&str> = prefix.split('.').collect();
        if (1..=3).contains(&groups.len()) && groups.iter().all(|g| parse_octet(g).is_some()) {
            return Ok(Self::Prefix(prefix.to_string()));
        }

        Err(EntryError::Unrecognized)
    }

    /// Whether `address` is covered by this entry.
    pub fn matches(&self, address: Ipv4Addr) -> bool {
        match self {
            Self::Exact(addr) => *addr == address,
            Self::Prefix(prefix) => address
                .to_string()
                .strip_prefix(prefix.as_str())
                .is_some_and(|rest| rest.starts_with('.')),
            Self::Cidr(net) => net.contains(&address),
            Self::Range { base, start, end } => {
                let octets = address.octets();
                octets[..3] == base[..] && (*start..=*end).contains(&octets[3])
            }
            Self::Literal(text) => *text == address.to_string(),
        }
    }

    /// True for every variant except [`AllowListEntry::Literal`].
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Literal(_))
    }
}

impl fmt::Display for AllowListEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(addr) => write!(f, "{addr}"),
            Self::Prefix(prefix) => write!(f, "{prefix}"),
            Self::Cidr(net) => write!(f, "{net}"),
            Self::Range { base, start, end } => {
                write!(f, "{}.{}.{}.{start}-{end}", base[0], base[1], base[2])
            }
            Self::Literal(text) => write!(f, "{text}"),
        }
    }
}

fn parse_range(text: &str) -> Result<AllowListEntry, EntryError> {
    let (head, tail) = text.rsplit_once('.').ok_or(EntryError::MalformedRange)?;
    let base: Vec<u8> = head
        .split('.')
        .map(parse_octet)
        .collect::<Option<_>>()
        .ok_or(EntryError::MalformedRange)?;
    let base: [u8; 3] = base.try_into().map_err(|_| EntryError::MalformedRange)?;

    let (start, end) = tail.split_once('-').ok_or(EntryError::MalformedRange)?;
    let start = parse_octet(start.trim()).ok_or(EntryError::MalformedRange)?;
    let end = parse_octet(end.trim()).ok_or(EntryError::MalformedRange)?;
    if start > end {
        return Err(EntryError::ReversedRange { start, end });
    }

    Ok(AllowListEntry::Range { base, start, end })
}

/// A dotted-decimal group: one to three ASCII digits, value `0..=255`.
fn parse_octet(group: &str) -> Option<u8> {
    if group.is_empty() || group.len() > 3 || !group.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    group.parse().ok()
}
