//! Host formatting and IP literal validation.
//!
//! # Grammar Reference
//!
//! ```abnf
//! host        = IP-literal / IPv4address / reg-name
//! IP-literal  = "[" ( IPv6address / IPv6addrz / IPvFuture ) "]"
//! IPv6addrz   = IPv6address "%" ZoneID        ; link-local only
//! IPvFuture   = "v" 1*HEXDIG "." 1*( unreserved / sub-delims / ":" )
//! reg-name    = *( unreserved / pct-encoded / sub-delims )
//! ```
//!
//! Registered names are never rejected: offending bytes are escaped and
//! ASCII letters lowercased. Bracketed literals are either accepted as
//! given or rejected.

use std::net::{Ipv4Addr, Ipv6Addr};

use crate::constants::{IP_FUTURE_RE, REG_NAME_CHARS, ZONE_ID_CHARS, ZONE_ID_FORBIDDEN};
use crate::encoding::{decode, encode, is_encoded, lowercase_outside_triplets};
use crate::error::HostError;

/// What kind of host a formatted host string holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostKind {
    /// A registered name, including the empty host
    RegisteredName,
    /// A dotted-decimal IPv4 address
    Ipv4,
    /// A bracketed IPv6 address, possibly with a zone identifier
    Ipv6,
    /// A bracketed IPvFuture literal
    IpFuture,
}

impl HostKind {
    /// Classifies an already formatted host.
    ///
    /// # Examples
    ///
    /// ```
    /// use generic_uri::HostKind;
    ///
    /// assert_eq!(HostKind::of("example.com"), HostKind::RegisteredName);
    /// assert_eq!(HostKind::of("192.0.2.1"), HostKind::Ipv4);
    /// assert_eq!(HostKind::of("[::1]"), HostKind::Ipv6);
    /// assert_eq!(HostKind::of("[v1.x]"), HostKind::IpFuture);
    /// ```
    #[must_use]
    pub fn of(host: &str) -> Self {
        match bracketed(host) {
            Some(inner) if inner.parse::<Ipv6Addr>().is_ok() || inner.contains('%') => Self::Ipv6,
            Some(_) => Self::IpFuture,
            None if host.parse::<Ipv4Addr>().is_ok() => Self::Ipv4,
            None => Self::RegisteredName,
        }
    }
}

/// Formats a raw host.
///
/// `None` and the empty string pass through unchanged.
///
/// # Errors
///
/// Returns `HostError` if a bracketed literal is not a valid IPv6 or
/// IPvFuture literal, or carries a zone identifier that is malformed or
/// attached to a non link-local address.
///
/// # Examples
///
/// ```
/// use generic_uri::format_host;
///
/// assert_eq!(format_host(Some("Bücher.EXAMPLE")).unwrap().as_deref(), Some("b%C3%BCcher.example"));
/// assert_eq!(format_host(Some("[fe80::1%eth0]")).unwrap().as_deref(), Some("[fe80::1%eth0]"));
/// assert!(format_host(Some("[2001:db8::1%eth0]")).is_err());
/// ```
pub fn format_host(raw: Option<&str>) -> Result<Option<String>, HostError> {
    let Some(host) = raw else {
        return Ok(None);
    };
    if host.is_empty() {
        return Ok(Some(String::new()));
    }

    match bracketed(host) {
        Some(inner) => {
            validate_ip_literal(inner)?;
            Ok(Some(host.to_string()))
        }
        None => Ok(Some(format_registered_name(host))),
    }
}

fn bracketed(host: &str) -> Option<&str> {
    host.strip_prefix('[')?.strip_suffix(']')
}

fn format_registered_name(host: &str) -> String {
    lowercase_outside_triplets(&encode(host, REG_NAME_CHARS))
}

fn validate_ip_literal(inner: &str) -> Result<(), HostError> {
    if inner.parse::<Ipv6Addr>().is_ok() {
        return Ok(());
    }

    if let Some(caps) = IP_FUTURE_RE.captures(inner) {
        if !matches!(&caps["version"], "4" | "6") {
            return Ok(());
        }
    }

    let Some((address, zone)) = inner.split_once('%') else {
        return Err(HostError::InvalidIpLiteral {
            literal: inner.to_string(),
        });
    };

    // The literal is kept as given, so the raw zone must already be encoded
    let decoded = decode(zone);
    if decoded.is_empty()
        || !is_encoded(zone, ZONE_ID_CHARS)
        || decoded
            .iter()
            .any(|b| b.is_ascii_control() || ZONE_ID_FORBIDDEN.contains(b))
    {
        return Err(HostError::InvalidZoneId {
            zone: zone.to_string(),
        });
    }

    let ip: Ipv6Addr = address.parse().map_err(|_| HostError::InvalidIpLiteral {
        literal: inner.to_string(),
    })?;

    if !is_link_local(ip) {
        return Err(HostError::ZoneOutsideLinkLocal {
            address: address.to_string(),
        });
    }

    Ok(())
}

/// First ten bits equal to the `fe80::/10` prefix.
const fn is_link_local(ip: Ipv6Addr) -> bool {
    ip.segments()[0] & 0xffc0 == 0xfe80
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host(raw: &str) -> Result<Option<String>, HostError> {
        format_host(Some(raw))
    }

    #[test]
    fn absent_and_empty_pass_through() {
        assert_eq!(format_host(None), Ok(None));
        assert_eq!(host(""), Ok(Some(String::new())));
    }

    #[test]
    fn registered_name_is_lowercased() {
        assert_eq!(host("WWW.Example.COM").unwrap().as_deref(), Some("www.example.com"));
    }

    #[test]
    fn registered_name_escapes_invalid_bytes() {
        assert_eq!(host("a b").unwrap().as_deref(), Some("a%20b"));
        assert_eq!(host("a:b").unwrap().as_deref(), Some("a%3Ab"));
        assert_eq!(host("[::1").unwrap().as_deref(), Some("%5B%3A%3A1"));
    }

    #[test]
    fn registered_name_keeps_existing_triplets() {
        assert_eq!(host("%C3%BC.DE").unwrap().as_deref(), Some("%C3%BC.de"));
    }

    #[test]
    fn ipv4_passes_as_registered_name() {
        assert_eq!(host("192.168.0.1").unwrap().as_deref(), Some("192.168.0.1"));
    }

    #[test]
    fn ipv6_literals_are_kept_as_given() {
        assert_eq!(host("[::1]").unwrap().as_deref(), Some("[::1]"));
        assert_eq!(host("[2001:DB8::1]").unwrap().as_deref(), Some("[2001:DB8::1]"));
        assert_eq!(host("[::ffff:192.0.2.1]").unwrap().as_deref(), Some("[::ffff:192.0.2.1]"));
    }

    #[test]
    fn ip_future_literals() {
        assert!(host("[v1.fe80::a+en1]").is_ok());
        assert!(host("[VF.abc]").is_ok());
        assert!(matches!(host("[v4.1.2.3.4]"), Err(HostError::InvalidIpLiteral { .. })));
        assert!(matches!(host("[v6.::1]"), Err(HostError::InvalidIpLiteral { .. })));
        assert!(matches!(host("[v1.]"), Err(HostError::InvalidIpLiteral { .. })));
    }

    #[test]
    fn malformed_literals_fail() {
        assert!(matches!(host("[not-an-ip]"), Err(HostError::InvalidIpLiteral { .. })));
        assert!(matches!(host("[]"), Err(HostError::InvalidIpLiteral { .. })));
        assert!(matches!(host("[1::2::3%eth0]"), Err(HostError::InvalidIpLiteral { .. })));
    }

    #[test]
    fn link_local_zone_is_accepted() {
        assert_eq!(host("[fe80::1%eth0]").unwrap().as_deref(), Some("[fe80::1%eth0]"));
        assert!(host("[fe80::1%25en1]").is_ok());
        assert!(host("[febf::1%eth0]").is_ok());
    }

    #[test]
    fn zone_outside_link_local_fails() {
        assert_eq!(
            host("[2001:db8::1%eth0]"),
            Err(HostError::ZoneOutsideLinkLocal {
                address: "2001:db8::1".to_string()
            })
        );
        assert!(matches!(host("[fec0::1%eth0]"), Err(HostError::ZoneOutsideLinkLocal { .. })));
    }

    #[test]
    fn forbidden_zone_characters_fail() {
        assert!(matches!(host("[fe80::1%]"), Err(HostError::InvalidZoneId { .. })));
        assert!(matches!(host("[fe80::1%eth%2F0]"), Err(HostError::InvalidZoneId { .. })));
        assert!(matches!(host("[fe80::1%a%20b]"), Err(HostError::InvalidZoneId { .. })));
    }

    #[test]
    fn zone_must_be_unreserved_or_triplets() {
        for literal in [
            "[fe80::1%eth<0>]",
            "[fe80::1%e%t]",
            "[fe80::1%e\"t{h}|0]",
            "[fe80::1%eth0%]",
            "[fe80::1%eth+0]",
        ] {
            assert_eq!(
                host(literal),
                Err(HostError::InvalidZoneId {
                    zone: literal[9..literal.len() - 1].to_string()
                }),
                "{literal}"
            );
        }
        assert!(host("[fe80::1%en-1.a_b~]").is_ok());
        assert!(host("[fe80::1%25eth%2D0]").is_ok());
    }

    #[test]
    fn classification() {
        assert_eq!(HostKind::of(""), HostKind::RegisteredName);
        assert_eq!(HostKind::of("[fe80::1%eth0]"), HostKind::Ipv6);
        assert_eq!(HostKind::of("10.0.0.256"), HostKind::RegisteredName);
    }
}
