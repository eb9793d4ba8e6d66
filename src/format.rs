//! Component formatting.
//!
//! Each function takes a raw component and returns its canonical form, or
//! fails if the component cannot be canonicalized. Host and path
//! formatting live in [`crate::host`] and [`crate::path`].

use crate::constants::{
    MAX_PORT, PASSWORD_CHARS, QUERY_OR_FRAGMENT_CHARS, SCHEME_RE, USER_CHARS,
};
use crate::encoding::encode;
use crate::error::{PortError, SchemeError};
use crate::scheme::default_port;

/// Lowercases and validates a raw scheme.
///
/// # Errors
///
/// Returns `SchemeError` if the scheme is empty or does not match
/// `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`.
pub fn format_scheme(raw: Option<&str>) -> Result<Option<String>, SchemeError> {
    let Some(scheme) = raw else {
        return Ok(None);
    };
    if scheme.is_empty() {
        return Err(SchemeError::Empty);
    }

    let lowered = scheme.to_ascii_lowercase();
    if SCHEME_RE.is_match(&lowered) {
        Ok(Some(lowered))
    } else {
        Err(SchemeError::InvalidSyntax {
            scheme: scheme.to_string(),
        })
    }
}

/// Encodes user and password independently and joins them with `:`.
///
/// Without a user there is no user info, whatever the password.
///
/// # Examples
///
/// ```
/// use generic_uri::format_user_info;
///
/// assert_eq!(format_user_info(Some("j:doe"), Some("p@ss:w")).as_deref(), Some("j%3Adoe:p%40ss:w"));
/// assert_eq!(format_user_info(None, Some("ignored")), None);
/// ```
#[must_use]
pub fn format_user_info(user: Option<&str>, password: Option<&str>) -> Option<String> {
    let user = encode(user?, USER_CHARS);
    Some(match password {
        Some(password) => format!("{user}:{}", encode(password, PASSWORD_CHARS)),
        None => user,
    })
}

/// Drops the port when it equals the scheme's default port.
///
/// # Examples
///
/// ```
/// use generic_uri::format_port;
///
/// assert_eq!(format_port(Some(443), Some("https")), None);
/// assert_eq!(format_port(Some(8443), Some("https")), Some(8443));
/// assert_eq!(format_port(Some(80), None), Some(80));
/// ```
#[must_use]
pub fn format_port(port: Option<u16>, scheme: Option<&str>) -> Option<u16> {
    let port = port?;
    match scheme.and_then(default_port) {
        Some(default) if default == port => None,
        _ => Some(port),
    }
}

/// Parses port text and drops it when it equals the scheme's default.
///
/// An empty string counts as no port.
///
/// # Errors
///
/// Returns `PortError::NotAnInteger` if the text is not an integer
/// literal, `PortError::Negative` for any `-` signed literal (`-0`
/// included), and `PortError::OutOfRange` above 65535.
pub fn format_port_text(raw: Option<&str>, scheme: Option<&str>) -> Result<Option<u16>, PortError> {
    let Some(text) = raw.filter(|t| !t.is_empty()) else {
        return Ok(None);
    };

    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PortError::NotAnInteger {
            value: text.to_string(),
        });
    }
    if negative {
        return Err(PortError::Negative {
            value: text.to_string(),
        });
    }

    let port = digits.parse::<u16>().map_err(|_| PortError::OutOfRange {
        value: text.to_string(),
        max: MAX_PORT,
    })?;
    Ok(format_port(Some(port), scheme))
}

/// Assembles `[user_info@]host[:port]`; absent when all three are absent.
#[must_use]
pub fn assemble_authority(
    user_info: Option<&str>,
    host: Option<&str>,
    port: Option<u16>,
) -> Option<String> {
    if user_info.is_none() && host.is_none() && port.is_none() {
        return None;
    }

    let mut authority = String::new();
    if let Some(user_info) = user_info {
        authority.push_str(user_info);
        authority.push('@');
    }
    authority.push_str(host.unwrap_or_default());
    if let Some(port) = port {
        authority.push(':');
        authority.push_str(&port.to_string());
    }
    Some(authority)
}

/// Encodes a query or a fragment.
#[must_use]
pub fn format_query_or_fragment(raw: Option<&str>) -> Option<String> {
    raw.map(|value| encode(value, QUERY_OR_FRAGMENT_CHARS))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheme_is_lowercased() {
        assert_eq!(format_scheme(Some("HTTP")), Ok(Some("http".to_string())));
        assert_eq!(format_scheme(Some("Svn+SSH")), Ok(Some("svn+ssh".to_string())));
        assert_eq!(format_scheme(None), Ok(None));
    }

    #[test]
    fn invalid_schemes_fail() {
        assert_eq!(format_scheme(Some("")), Err(SchemeError::Empty));
        assert!(matches!(
            format_scheme(Some("1http")),
            Err(SchemeError::InvalidSyntax { .. })
        ));
        assert!(matches!(
            format_scheme(Some("ht tp")),
            Err(SchemeError::InvalidSyntax { .. })
        ));
        assert!(matches!(
            format_scheme(Some("héllo")),
            Err(SchemeError::InvalidSyntax { .. })
        ));
    }

    #[test]
    fn user_info_without_password() {
        assert_eq!(format_user_info(Some("user"), None).as_deref(), Some("user"));
        assert_eq!(format_user_info(Some(""), Some("")).as_deref(), Some(":"));
    }

    #[test]
    fn port_text() {
        assert_eq!(format_port_text(Some("8080"), Some("http")), Ok(Some(8080)));
        assert_eq!(format_port_text(Some("80"), Some("http")), Ok(None));
        assert_eq!(format_port_text(Some("0080"), Some("http")), Ok(None));
        assert_eq!(format_port_text(Some(""), Some("http")), Ok(None));
        assert_eq!(format_port_text(None, None), Ok(None));
        assert_eq!(format_port_text(Some("0"), None), Ok(Some(0)));
    }

    #[test]
    fn bad_port_text() {
        assert!(matches!(
            format_port_text(Some("http"), None),
            Err(PortError::NotAnInteger { .. })
        ));
        assert!(matches!(
            format_port_text(Some("8o"), None),
            Err(PortError::NotAnInteger { .. })
        ));
        for negative in ["-1", "-0", "-000"] {
            assert_eq!(
                format_port_text(Some(negative), None),
                Err(PortError::Negative {
                    value: negative.to_string()
                })
            );
        }
        assert!(matches!(
            format_port_text(Some("65536"), None),
            Err(PortError::OutOfRange { .. })
        ));
        assert!(matches!(
            format_port_text(Some("99999999999999999999"), None),
            Err(PortError::OutOfRange { .. })
        ));
    }

    #[test]
    fn authority_assembly() {
        assert_eq!(assemble_authority(None, None, None), None);
        assert_eq!(assemble_authority(None, Some(""), None).as_deref(), Some(""));
        assert_eq!(
            assemble_authority(Some("u:p"), Some("h"), Some(1)).as_deref(),
            Some("u:p@h:1")
        );
    }

    #[test]
    fn query_and_fragment_share_a_character_set() {
        assert_eq!(
            format_query_or_fragment(Some("a=1&b=/?:@ x#")).as_deref(),
            Some("a=1&b=/?:@%20x%23")
        );
        assert_eq!(format_query_or_fragment(Some("")).as_deref(), Some(""));
        assert_eq!(format_query_or_fragment(None), None);
    }
}
