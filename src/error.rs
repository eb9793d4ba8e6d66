//! Error types for URI construction and mutation.

use std::fmt;

use crate::scheme::{PolicyRule, SchemePolicy};

/// Errors that can occur when building or mutating a URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriError {
    /// The input that was rejected: the raw component value, or the
    /// assembled URI when a structural rule failed
    pub input: String,
    /// The specific error that occurred
    pub kind: UriErrorKind,
}

/// Broad classification of a [`UriError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Components violate the URI grammar, a scheme policy, RFC 2397, or an
    /// IP literal rule.
    Syntax,
    /// A component could not be coerced into its expected form, or a
    /// required component was absent.
    Type,
}

/// Specific URI error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UriErrorKind {
    /// Scheme formatting failed
    InvalidScheme(SchemeError),
    /// Host formatting failed
    InvalidHost(HostError),
    /// Port formatting failed
    InvalidPort(PortError),
    /// `data` path validation failed
    InvalidDataPath(DataPathError),
    /// The formatted components break a structural rule
    InvalidStructure(StructureError),
    /// The path was not supplied
    MissingPath,
}

impl UriError {
    pub(crate) fn new(input: impl Into<String>, kind: UriErrorKind) -> Self {
        Self {
            input: input.into(),
            kind,
        }
    }

    /// Returns whether this is a syntax or a type error.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match &self.kind {
            UriErrorKind::MissingPath | UriErrorKind::InvalidPort(PortError::NotAnInteger { .. }) => {
                ErrorCategory::Type
            }
            _ => ErrorCategory::Syntax,
        }
    }

    /// Returns true for [`ErrorCategory::Syntax`].
    #[must_use]
    pub const fn is_syntax(&self) -> bool {
        matches!(self.category(), ErrorCategory::Syntax)
    }

    /// Returns true for [`ErrorCategory::Type`].
    #[must_use]
    pub const fn is_type(&self) -> bool {
        matches!(self.category(), ErrorCategory::Type)
    }
}

impl fmt::Display for UriError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid URI input '{}': ", self.input)?;
        match &self.kind {
            UriErrorKind::InvalidScheme(e) => write!(f, "invalid scheme: {e}"),
            UriErrorKind::InvalidHost(e) => write!(f, "invalid host: {e}"),
            UriErrorKind::InvalidPort(e) => write!(f, "invalid port: {e}"),
            UriErrorKind::InvalidDataPath(e) => write!(f, "invalid data path: {e}"),
            UriErrorKind::InvalidStructure(e) => write!(f, "{e}"),
            UriErrorKind::MissingPath => write!(f, "the path component is required"),
        }
    }
}

impl std::error::Error for UriError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            UriErrorKind::InvalidScheme(e) => Some(e),
            UriErrorKind::InvalidHost(e) => Some(e),
            UriErrorKind::InvalidPort(e) => Some(e),
            UriErrorKind::InvalidDataPath(e) => Some(e),
            UriErrorKind::InvalidStructure(e) => Some(e),
            UriErrorKind::MissingPath => None,
        }
    }
}

/// Errors for scheme formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemeError {
    /// Scheme is the empty string
    Empty,
    /// Scheme does not match `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`
    InvalidSyntax {
        /// The rejected scheme
        scheme: String,
    },
}

impl fmt::Display for SchemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "scheme cannot be empty; use no scheme instead"),
            Self::InvalidSyntax { scheme } => write!(
                f,
                "'{scheme}' must start with a letter followed by letters, digits, '+', '-' or '.'"
            ),
        }
    }
}

impl std::error::Error for SchemeError {}

/// Errors for host formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// Bracketed literal is neither IPv6, IPvFuture, nor a zoned IPv6 address
    InvalidIpLiteral {
        /// The literal, without brackets
        literal: String,
    },
    /// Zone identifier holds forbidden characters or is empty
    InvalidZoneId {
        /// The zone identifier as supplied
        zone: String,
    },
    /// Zone identifier attached to an address outside `fe80::/10`
    ZoneOutsideLinkLocal {
        /// The address part of the literal
        address: String,
    },
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidIpLiteral { literal } => {
                write!(f, "'[{literal}]' is not a valid IPv6 or IPvFuture literal")
            }
            Self::InvalidZoneId { zone } => {
                write!(f, "zone identifier '{zone}' is empty or contains forbidden characters")
            }
            Self::ZoneOutsideLinkLocal { address } => write!(
                f,
                "zone identifiers are only accepted on link-local (fe80::/10) addresses, found '{address}'"
            ),
        }
    }
}

impl std::error::Error for HostError {}

/// Errors for port formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortError {
    /// Port text is not an integer literal
    NotAnInteger {
        /// The rejected text
        value: String,
    },
    /// Port is negative
    Negative {
        /// The rejected text
        value: String,
    },
    /// Port exceeds 65535
    OutOfRange {
        /// The rejected text
        value: String,
        /// Maximum allowed port
        max: u16,
    },
}

impl fmt::Display for PortError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAnInteger { value } => write!(f, "'{value}' is not an integer"),
            Self::Negative { value } => write!(f, "port {value} cannot be negative"),
            Self::OutOfRange { value, max } => {
                write!(f, "port {value} exceeds maximum {max}")
            }
        }
    }
}

impl std::error::Error for PortError {}

/// Errors for RFC 2397 `data` path validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataPathError {
    /// Path contains non-ASCII characters
    NonAscii,
    /// No `,` separates the media type from the data
    MissingComma,
    /// Media type is not `type/subtype[+suffix]`
    InvalidMimeType {
        /// The rejected media type
        mimetype: String,
    },
    /// Parameter is not a `key=value` pair
    InvalidParameter {
        /// The rejected parameter
        parameter: String,
    },
    /// Payload flagged as base64 does not decode
    InvalidBase64 {
        /// Decoder message
        reason: String,
    },
    /// Payload decodes but is not canonical base64
    NonCanonicalBase64,
}

impl fmt::Display for DataPathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonAscii => write!(f, "data paths must be ASCII"),
            Self::MissingComma => {
                write!(f, "missing ',' between the media type and the data")
            }
            Self::InvalidMimeType { mimetype } => {
                write!(f, "media type '{mimetype}' is not of the form type/subtype[+suffix]")
            }
            Self::InvalidParameter { parameter } => {
                write!(f, "parameter '{parameter}' is not a key=value pair")
            }
            Self::InvalidBase64 { reason } => write!(f, "base64 payload does not decode: {reason}"),
            Self::NonCanonicalBase64 => {
                write!(f, "base64 payload is not canonically encoded")
            }
        }
    }
}

impl std::error::Error for DataPathError {}

/// Errors for structural rules checked on the fully formatted components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructureError {
    /// Authority present and path neither empty nor absolute
    RelativePathWithAuthority {
        /// The offending path
        path: String,
    },
    /// Authority absent and path starts with `//`
    DoubleSlashWithoutAuthority {
        /// The offending path
        path: String,
    },
    /// Scheme and authority absent and first path segment contains `:`
    ColonInFirstSegment {
        /// The offending segment
        segment: String,
    },
    /// User info or port present without a host
    AuthorityWithoutHost,
    /// A scheme policy is broken
    SchemePolicy {
        /// The scheme
        scheme: String,
        /// The policy registered for the scheme
        policy: SchemePolicy,
        /// Every broken rule, in evaluation order
        violations: Vec<PolicyRule>,
    },
}

impl fmt::Display for StructureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RelativePathWithAuthority { path } => write!(
                f,
                "path '{path}' must be empty or start with '/' when an authority is present"
            ),
            Self::DoubleSlashWithoutAuthority { path } => write!(
                f,
                "path '{path}' cannot start with '//' when no authority is present"
            ),
            Self::ColonInFirstSegment { segment } => write!(
                f,
                "first path segment '{segment}' cannot contain ':' without a scheme or authority"
            ),
            Self::AuthorityWithoutHost => {
                write!(f, "user info and port require a host")
            }
            Self::SchemePolicy {
                scheme,
                policy,
                violations,
            } => {
                write!(f, "'{scheme}' URIs follow the {policy} policy: ")?;
                for (i, rule) in violations.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{rule}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for StructureError {}
