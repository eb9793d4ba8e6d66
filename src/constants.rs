//! Constants for URI component validation.
//!
//! Character sets follow the ABNF of RFC 3986; regular expressions are
//! compiled once and shared read-only by every validator.

use lazy_static::lazy_static;
use regex::Regex;

use crate::encoding::CharSet;

/// Unreserved characters: `ALPHA / DIGIT / "-" / "." / "_" / "~"`.
pub const UNRESERVED: CharSet =
    CharSet::new(b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-._~");

/// Sub-delimiters: `"!" / "$" / "&" / "'" / "(" / ")" / "*" / "+" / "," / ";" / "="`.
pub const SUB_DELIMS: CharSet = CharSet::new(b"!$&'()*+,;=");

/// Literal characters allowed in the user part of the user info.
pub const USER_CHARS: CharSet = UNRESERVED.or(SUB_DELIMS);

/// Literal characters allowed in the password part of the user info.
pub const PASSWORD_CHARS: CharSet = USER_CHARS.or(CharSet::new(b":"));

/// Literal characters allowed in a registered name.
pub const REG_NAME_CHARS: CharSet = UNRESERVED.or(SUB_DELIMS);

/// Literal characters allowed in a path.
pub const PATH_CHARS: CharSet = UNRESERVED.or(SUB_DELIMS).or(CharSet::new(b":@/"));

/// Literal characters allowed in a query or a fragment.
pub const QUERY_OR_FRAGMENT_CHARS: CharSet = PATH_CHARS.or(CharSet::new(b"?"));

/// Literal characters allowed in an IPv6 zone identifier (RFC 6874:
/// `ZoneID = 1*( unreserved / pct-encoded )`).
pub const ZONE_ID_CHARS: CharSet = UNRESERVED;

/// Bytes that may not appear in a zone identifier even once decoded.
pub const ZONE_ID_FORBIDDEN: &[u8] = b":/?#[]@ ";

/// Media type used when a `data` path omits one.
pub const DEFAULT_DATA_MIMETYPE: &str = "text/plain";

/// Parameters used when a `data` path omits them.
pub const DEFAULT_DATA_PARAMETERS: &str = "charset=us-ascii";

/// Flag marking a `data` payload as base64 encoded.
pub const BASE64_FLAG: &str = "base64";

/// Largest valid port number.
pub const MAX_PORT: u16 = u16::MAX;

lazy_static! {
    /// `scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`, already lowercased.
    pub(crate) static ref SCHEME_RE: Regex =
        Regex::new(r"^[a-z][a-z0-9+.\-]*$").expect("scheme pattern compiles");

    /// `IPvFuture = "v" 1*HEXDIG "." 1*( unreserved / sub-delims / ":" )`.
    pub(crate) static ref IP_FUTURE_RE: Regex = Regex::new(
        r"(?i)^v(?P<version>[0-9a-f]+)\.[a-z0-9\-._~!$&'()*+,;=:]+$"
    )
    .expect("IPvFuture pattern compiles");

    /// `type "/" subtype [ "+" suffix ]` of an RFC 2397 media type.
    pub(crate) static ref MIMETYPE_RE: Regex =
        Regex::new(r"^[\w.\-]+/[\w.\-]+(?:\+[\w.\-]+)?$").expect("mimetype pattern compiles");

    /// Trailing `base64` flag of the `data` parameters.
    pub(crate) static ref BASE64_FLAG_RE: Regex =
        Regex::new(r"(?:^|;)base64$").expect("base64 flag pattern compiles");

    /// Drive letter followed by `|` (raw or encoded) at the start of a `file` path.
    pub(crate) static ref DRIVE_LETTER_RE: Regex = Regex::new(
        r"(?s)^(?P<root>/)?(?P<letter>[a-zA-Z])(?:\||%7[cC])(?P<rest>.*)$"
    )
    .expect("drive letter pattern compiles");

    /// RFC 3986 Appendix B.
    pub(crate) static ref URI_REFERENCE_RE: Regex = Regex::new(
        r"(?s)^(?:(?P<scheme>[^:/?#]+):)?(?://(?P<authority>[^/?#]*))?(?P<path>[^?#]*)(?:\?(?P<query>[^#]*))?(?:#(?P<fragment>.*))?$"
    )
    .expect("URI reference pattern compiles");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn character_sets_nest() {
        assert!(USER_CHARS.is_subset(PASSWORD_CHARS));
        assert!(PATH_CHARS.is_subset(QUERY_OR_FRAGMENT_CHARS));
        assert!(!USER_CHARS.contains(b':'));
        assert!(PASSWORD_CHARS.contains(b':'));
        assert!(!PATH_CHARS.contains(b'?'));
        assert!(QUERY_OR_FRAGMENT_CHARS.contains(b'?'));
    }

    #[test]
    fn scheme_pattern() {
        assert!(SCHEME_RE.is_match("svn+ssh"));
        assert!(SCHEME_RE.is_match("a1.b-c"));
        assert!(!SCHEME_RE.is_match("1http"));
        assert!(!SCHEME_RE.is_match(""));
    }

    #[test]
    fn mimetype_pattern() {
        assert!(MIMETYPE_RE.is_match("text/plain"));
        assert!(MIMETYPE_RE.is_match("image/svg+xml"));
        assert!(MIMETYPE_RE.is_match("application/vnd.api-v1.0+json"));
        assert!(!MIMETYPE_RE.is_match("text"));
        assert!(!MIMETYPE_RE.is_match("text/plain+a+b"));
    }

    #[test]
    fn uri_reference_pattern_always_matches() {
        for input in ["", "#", "?#", "a:b", "//", "http://h/p?q#f#g"] {
            assert!(URI_REFERENCE_RE.is_match(input), "{input}");
        }
    }
}
