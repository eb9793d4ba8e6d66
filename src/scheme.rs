//! Scheme policy table.
//!
//! Maps the schemes this crate knows about to their default port and to
//! the structural policy their URIs must satisfy. Unlisted schemes carry
//! no policy beyond the generic RFC 3986 rules.

use std::fmt;

use crate::components::FormattedComponents;

/// Structural policy a scheme imposes on the formatted components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemePolicy {
    /// No authority, query, or fragment (`data`).
    SchemeAndPathOnly,
    /// A host (possibly empty) and a path only (`file`).
    SchemeHostAndPathOnly,
    /// A non-empty host (`http`, `https`).
    NonEmptyHost,
    /// A non-empty host and no fragment (`ws`, `wss`).
    NonEmptyHostNoFragment,
    /// A non-empty host, no fragment, and no query (`ftp`, `gopher`).
    NonEmptyHostNoFragmentNoQuery,
}

/// A single rule of a [`SchemePolicy`] that the components broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyRule {
    /// An authority is present where none is allowed.
    AuthorityPresent,
    /// A user info is present where none is allowed.
    UserInfoPresent,
    /// A port is present where none is allowed.
    PortPresent,
    /// A query is present where none is allowed.
    QueryPresent,
    /// A fragment is present where none is allowed.
    FragmentPresent,
    /// The host is absent although the scheme requires one.
    HostAbsent,
    /// The host is the empty string although the scheme requires a name.
    HostEmpty,
}

struct SchemeEntry {
    name: &'static str,
    default_port: Option<u16>,
    policy: SchemePolicy,
}

const SCHEMES: &[SchemeEntry] = &[
    SchemeEntry {
        name: "data",
        default_port: None,
        policy: SchemePolicy::SchemeAndPathOnly,
    },
    SchemeEntry {
        name: "file",
        default_port: None,
        policy: SchemePolicy::SchemeHostAndPathOnly,
    },
    SchemeEntry {
        name: "ftp",
        default_port: Some(21),
        policy: SchemePolicy::NonEmptyHostNoFragmentNoQuery,
    },
    SchemeEntry {
        name: "gopher",
        default_port: Some(70),
        policy: SchemePolicy::NonEmptyHostNoFragmentNoQuery,
    },
    SchemeEntry {
        name: "http",
        default_port: Some(80),
        policy: SchemePolicy::NonEmptyHost,
    },
    SchemeEntry {
        name: "https",
        default_port: Some(443),
        policy: SchemePolicy::NonEmptyHost,
    },
    SchemeEntry {
        name: "ws",
        default_port: Some(80),
        policy: SchemePolicy::NonEmptyHostNoFragment,
    },
    SchemeEntry {
        name: "wss",
        default_port: Some(443),
        policy: SchemePolicy::NonEmptyHostNoFragment,
    },
];

fn lookup(scheme: &str) -> Option<&'static SchemeEntry> {
    SCHEMES.iter().find(|entry| entry.name == scheme)
}

/// Returns the well-known port of a (lowercase) scheme, if it has one.
///
/// # Examples
///
/// ```
/// use generic_uri::default_port;
///
/// assert_eq!(default_port("https"), Some(443));
/// assert_eq!(default_port("file"), None);
/// assert_eq!(default_port("mailto"), None);
/// ```
#[must_use]
pub fn default_port(scheme: &str) -> Option<u16> {
    lookup(scheme).and_then(|entry| entry.default_port)
}

impl SchemePolicy {
    /// Returns the policy registered for a (lowercase) scheme.
    #[must_use]
    pub fn for_scheme(scheme: &str) -> Option<Self> {
        lookup(scheme).map(|entry| entry.policy)
    }

    /// Returns the policy name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SchemeAndPathOnly => "scheme-and-path-only",
            Self::SchemeHostAndPathOnly => "scheme-host-and-path-only",
            Self::NonEmptyHost => "non-empty-host",
            Self::NonEmptyHostNoFragment => "non-empty-host-no-fragment",
            Self::NonEmptyHostNoFragmentNoQuery => "non-empty-host-no-fragment-no-query",
        }
    }

    /// Lists every rule of this policy the components break.
    pub(crate) fn violations(self, parts: &FormattedComponents) -> Vec<PolicyRule> {
        let mut found = Vec::new();

        match self {
            Self::SchemeAndPathOnly => {
                if parts.authority.is_some() {
                    found.push(PolicyRule::AuthorityPresent);
                }
                check_no_query(parts, &mut found);
                check_no_fragment(parts, &mut found);
            }
            Self::SchemeHostAndPathOnly => {
                if parts.user_info.is_some() {
                    found.push(PolicyRule::UserInfoPresent);
                }
                if parts.port.is_some() {
                    found.push(PolicyRule::PortPresent);
                }
                check_no_query(parts, &mut found);
                check_no_fragment(parts, &mut found);
                if parts.host.is_none() {
                    found.push(PolicyRule::HostAbsent);
                }
            }
            Self::NonEmptyHost => check_non_empty_host(parts, &mut found),
            Self::NonEmptyHostNoFragment => {
                check_non_empty_host(parts, &mut found);
                check_no_fragment(parts, &mut found);
            }
            Self::NonEmptyHostNoFragmentNoQuery => {
                check_non_empty_host(parts, &mut found);
                check_no_fragment(parts, &mut found);
                check_no_query(parts, &mut found);
            }
        }

        found
    }
}

fn check_non_empty_host(parts: &FormattedComponents, found: &mut Vec<PolicyRule>) {
    match parts.host.as_deref() {
        None => found.push(PolicyRule::HostAbsent),
        Some("") => found.push(PolicyRule::HostEmpty),
        Some(_) => {}
    }
}

fn check_no_query(parts: &FormattedComponents, found: &mut Vec<PolicyRule>) {
    if parts.query.is_some() {
        found.push(PolicyRule::QueryPresent);
    }
}

fn check_no_fragment(parts: &FormattedComponents, found: &mut Vec<PolicyRule>) {
    if parts.fragment.is_some() {
        found.push(PolicyRule::FragmentPresent);
    }
}

impl fmt::Display for SchemePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for PolicyRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::AuthorityPresent => "authority must be absent",
            Self::UserInfoPresent => "user info must be absent",
            Self::PortPresent => "port must be absent",
            Self::QueryPresent => "query must be absent",
            Self::FragmentPresent => "fragment must be absent",
            Self::HostAbsent => "host is required",
            Self::HostEmpty => "host cannot be empty",
        };
        f.write_str(text)
    }
}
