//! Host name helpers: SMTP address literals and root-dot normalization.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use trust_dns_resolver::proto::rr::Name;

const IPV6_TAG: &str = "ipv6:";

/// Classification of an announced host name (RFC 5321 §4.1.3).
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressLiteral {
    /// Plain domain name.
    NotLiteral,
    Address(IpAddr),
    /// Bracketed, but the content is not an address of the declared family.
    Malformed,
}

impl AddressLiteral {
    pub fn is_literal(&self) -> bool {
        !matches!(self, Self::NotLiteral)
    }

    pub fn address(&self) -> Option<IpAddr> {
        match self {
            Self::Address(addr) => Some(*addr),
            _ => None,
        }
    }
}

/// Recognize `[a.b.c.d]` and `[IPv6:addr]` (tag is case-insensitive).
pub fn parse_address_literal(host: &str) -> AddressLiteral {
    let Some(inner) = host
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
    else {
        return AddressLiteral::NotLiteral;
    };

    let tagged_v6 = inner
        .get(..IPV6_TAG.len())
        .filter(|tag| tag.eq_ignore_ascii_case(IPV6_TAG))
        .map(|_| &inner[IPV6_TAG.len()..]);

    let parsed = match tagged_v6 {
        Some(text) => text.parse::<Ipv6Addr>().map(IpAddr::V6).ok(),
        None => inner.parse::<Ipv4Addr>().map(IpAddr::V4).ok(),
    };

    parsed
        .map(AddressLiteral::Address)
        .unwrap_or(AddressLiteral::Malformed)
}

pub fn format_address_literal(addr: IpAddr) -> String {
    match addr {
        IpAddr::V4(v4) => format!("[{v4}]"),
        IpAddr::V6(v6) => format!("[IPv6:{v6}]"),
    }
}

/// Remove the trailing root-label dot, if any.
///
/// A name ending in `..` has an empty label, not a root separator, and is
/// returned as is.
pub fn strip_root_dot(name: &str) -> &str {
    if name.ends_with("..") {
        return name;
    }
    name.strip_suffix('.').unwrap_or(name)
}

/// Case-insensitive comparison ignoring the root-label dot on either side.
pub fn names_match(left: &str, right: &str) -> bool {
    strip_root_dot(left).eq_ignore_ascii_case(strip_root_dot(right))
}

/// Whether `name` can be sent to a resolver (label and total lengths, syntax).
pub fn is_valid_dns_name(name: &str) -> bool {
    let trimmed = strip_root_dot(name.trim());
    !trimmed.is_empty() && Name::from_utf8(trimmed).is_ok()
}

/// Absolute form of `name` for resolver queries (no search-list expansion).
pub(crate) fn absolute_name(name: &str) -> String {
    let trimmed = strip_root_dot(name.trim());
    format!("{trimmed}.")
}
