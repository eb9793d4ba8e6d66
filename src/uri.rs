//! Main URI type.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::OnceLock;

use crate::builder::UriBuilder;
use crate::components::{FormattedComponents, UriComponents};
use crate::error::{UriError, UriErrorKind};
use crate::format::{
    format_port, format_port_text, format_query_or_fragment, format_scheme, format_user_info,
};
use crate::host::{HostKind, format_host};
use crate::parse::tokenize;
use crate::path::format_path;
use crate::scheme::default_port;
use crate::validate::assert_valid_state;

/// A validated, immutable URI reference.
///
/// Every instance satisfies the RFC 3986 structural rules and the policy
/// of its scheme. Components are stored in canonical form: the scheme and
/// registered names are lowercased, default ports are dropped, and every
/// component is percent-encoded against its own character set.
///
/// # Structure
///
/// ```text
/// [scheme:][//[user_info@]host[:port]]path[?query][#fragment]
/// ```
///
/// # Examples
///
/// ```
/// use generic_uri::Uri;
///
/// let uri = Uri::parse("HTTP://WWW.Example.COM:80/a b?q#top").unwrap();
/// assert_eq!(uri.scheme(), Some("http"));
/// assert_eq!(uri.host(), Some("www.example.com"));
/// assert_eq!(uri.port(), None);
/// assert_eq!(uri.path(), "/a%20b");
/// assert_eq!(uri.to_string(), "http://www.example.com/a%20b?q#top");
///
/// // Mutators return new values
/// let secure = uri.with_scheme(Some("https")).unwrap();
/// assert_eq!(secure.to_string(), "https://www.example.com/a%20b?q#top");
/// ```
#[derive(Debug, Clone)]
pub struct Uri {
    parts: FormattedComponents,
    /// Memoized serialization
    serialized: OnceLock<String>,
}

impl Uri {
    /// Parses a URI reference from a string.
    ///
    /// # Errors
    ///
    /// Returns `UriError` if any component fails to format or the
    /// components break a structural rule.
    pub fn parse(input: &str) -> Result<Self, UriError> {
        Self::from_components(tokenize(input))
    }

    /// Creates a URI from raw components.
    ///
    /// This is the single validated entry point: every other constructor
    /// goes through it.
    ///
    /// # Errors
    ///
    /// Returns `UriError` if:
    /// - The path is absent
    /// - The scheme is not `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`
    /// - The host is a malformed IP literal
    /// - The port is not an integer in `0..=65535`
    /// - A `data` path is not valid RFC 2397
    /// - The formatted components break a structural or scheme rule
    pub fn from_components(components: UriComponents) -> Result<Self, UriError> {
        Self::build(components).inspect_err(log_rejection)
    }

    /// Returns a builder for raw components.
    #[must_use]
    pub fn builder() -> UriBuilder {
        UriBuilder::new()
    }

    fn build(components: UriComponents) -> Result<Self, UriError> {
        let UriComponents {
            scheme,
            user,
            password,
            host,
            port,
            path,
            query,
            fragment,
        } = components;

        let scheme = format_scheme(scheme.as_deref())
            .map_err(|e| invalid(scheme.as_deref(), UriErrorKind::InvalidScheme(e)))?;
        let user_info = format_user_info(user.as_deref(), password.as_deref());
        let host = format_host(host.as_deref())
            .map_err(|e| invalid(host.as_deref(), UriErrorKind::InvalidHost(e)))?;
        let port = format_port_text(port.as_deref(), scheme.as_deref())
            .map_err(|e| invalid(port.as_deref(), UriErrorKind::InvalidPort(e)))?;
        let path = path.ok_or_else(|| UriError::new("", UriErrorKind::MissingPath))?;
        let path = format_path(&path, scheme.as_deref())
            .map_err(|e| UriError::new(path.as_str(), UriErrorKind::InvalidDataPath(e)))?;

        let mut parts = FormattedComponents {
            scheme,
            user_info,
            host,
            port,
            authority: None,
            path,
            query: format_query_or_fragment(query.as_deref()),
            fragment: format_query_or_fragment(fragment.as_deref()),
        };
        parts.refresh_authority();

        Self::validated(parts)
    }

    fn validated(parts: FormattedComponents) -> Result<Self, UriError> {
        match assert_valid_state(&parts) {
            Ok(()) => Ok(Self {
                parts,
                serialized: OnceLock::new(),
            }),
            Err(e) => Err(UriError::new(
                parts.serialize(),
                UriErrorKind::InvalidStructure(e),
            )),
        }
    }

    /// Validates `parts` as a replacement for `self`, or returns `self`
    /// unchanged when nothing differs.
    fn replace(&self, parts: FormattedComponents) -> Result<Self, UriError> {
        if parts == self.parts {
            tracing::trace!(uri = %self, "mutation left the URI unchanged");
            return Ok(self.clone());
        }
        Self::validated(parts)
    }

    /// Returns the scheme, lowercased.
    #[must_use]
    pub fn scheme(&self) -> Option<&str> {
        self.parts.scheme.as_deref()
    }

    /// Returns the authority, `[user_info@]host[:port]`.
    #[must_use]
    pub fn authority(&self) -> Option<&str> {
        self.parts.authority.as_deref()
    }

    /// Returns the encoded user info, `user[:password]`.
    #[must_use]
    pub fn user_info(&self) -> Option<&str> {
        self.parts.user_info.as_deref()
    }

    /// Returns the encoded user part of the user info.
    #[must_use]
    pub fn user(&self) -> Option<&str> {
        self.user_info()
            .map(|info| info.split_once(':').map_or(info, |(user, _)| user))
    }

    /// Returns the encoded password part of the user info.
    #[must_use]
    pub fn password(&self) -> Option<&str> {
        self.user_info()
            .and_then(|info| info.split_once(':').map(|(_, password)| password))
    }

    /// Returns the host; IP literals keep their brackets.
    #[must_use]
    pub fn host(&self) -> Option<&str> {
        self.parts.host.as_deref()
    }

    /// Returns what kind of host this URI has.
    #[must_use]
    pub fn host_kind(&self) -> Option<HostKind> {
        self.host().map(HostKind::of)
    }

    /// Returns the port, or `None` when absent or equal to the scheme's
    /// default port.
    #[must_use]
    pub const fn port(&self) -> Option<u16> {
        self.parts.port
    }

    /// Returns the default port of the scheme, if it has one.
    #[must_use]
    pub fn default_port(&self) -> Option<u16> {
        self.scheme().and_then(default_port)
    }

    /// Returns the encoded path; never absent, possibly empty.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.parts.path
    }

    /// Returns the encoded query.
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.parts.query.as_deref()
    }

    /// Returns the encoded fragment.
    #[must_use]
    pub fn fragment(&self) -> Option<&str> {
        self.parts.fragment.as_deref()
    }

    /// Returns the serialized URI, computing it on first use.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.serialized.get_or_init(|| self.parts.serialize())
    }

    /// Returns the canonical components as raw components.
    ///
    /// Feeding them back to [`Uri::from_components`] yields an equal URI.
    #[must_use]
    pub fn components(&self) -> UriComponents {
        self.parts.to_raw()
    }

    /// Returns a new URI with the given scheme.
    ///
    /// The port is re-checked against the new scheme's default port and the
    /// path is re-formatted under the new scheme's rules.
    ///
    /// # Errors
    ///
    /// Returns `UriError` if the scheme is invalid or the result breaks a
    /// structural or scheme rule.
    ///
    /// # Examples
    ///
    /// ```
    /// use generic_uri::Uri;
    ///
    /// let uri = Uri::parse("http://example.com:443/").unwrap();
    /// let secure = uri.with_scheme(Some("HTTPS")).unwrap();
    /// assert_eq!(secure.to_string(), "https://example.com/");
    /// assert!(uri.with_scheme(Some("data")).is_err());
    /// ```
    pub fn with_scheme(&self, scheme: Option<&str>) -> Result<Self, UriError> {
        self.try_with_scheme(scheme).inspect_err(log_rejection)
    }

    fn try_with_scheme(&self, scheme: Option<&str>) -> Result<Self, UriError> {
        let scheme =
            format_scheme(scheme).map_err(|e| invalid(scheme, UriErrorKind::InvalidScheme(e)))?;
        if scheme == self.parts.scheme {
            return self.replace(self.parts.clone());
        }

        let path = format_path(&self.parts.path, scheme.as_deref()).map_err(|e| {
            UriError::new(self.parts.path.as_str(), UriErrorKind::InvalidDataPath(e))
        })?;
        let mut parts = FormattedComponents {
            port: format_port(self.parts.port, scheme.as_deref()),
            scheme,
            path,
            ..self.parts.clone()
        };
        parts.refresh_authority();
        self.replace(parts)
    }

    /// Returns a new URI with the given user info.
    ///
    /// `None` for the user removes the user info; the password is ignored
    /// without a user.
    ///
    /// # Errors
    ///
    /// Returns `UriError` if the result breaks a structural or scheme rule.
    ///
    /// # Examples
    ///
    /// ```
    /// use generic_uri::Uri;
    ///
    /// let uri = Uri::parse("https://example.com").unwrap();
    /// let with_user = uri.with_user_info(Some("me"), Some("s3cr:t")).unwrap();
    /// assert_eq!(with_user.to_string(), "https://me:s3cr:t@example.com");
    /// ```
    pub fn with_user_info(
        &self,
        user: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self, UriError> {
        let mut parts = FormattedComponents {
            user_info: format_user_info(user, password),
            ..self.parts.clone()
        };
        parts.refresh_authority();
        self.replace(parts).inspect_err(log_rejection)
    }

    /// Returns a new URI with the given host.
    ///
    /// # Errors
    ///
    /// Returns `UriError` if the host is a malformed IP literal or the
    /// result breaks a structural or scheme rule.
    ///
    /// # Examples
    ///
    /// ```
    /// use generic_uri::Uri;
    ///
    /// let uri = Uri::parse("https://example.com/a").unwrap();
    /// assert_eq!(uri.with_host(Some("[::1]")).unwrap().to_string(), "https://[::1]/a");
    /// assert!(uri.with_host(None).is_err());
    /// ```
    pub fn with_host(&self, host: Option<&str>) -> Result<Self, UriError> {
        self.try_with_host(host).inspect_err(log_rejection)
    }

    fn try_with_host(&self, host: Option<&str>) -> Result<Self, UriError> {
        let formatted =
            format_host(host).map_err(|e| invalid(host, UriErrorKind::InvalidHost(e)))?;
        let mut parts = FormattedComponents {
            host: formatted,
            ..self.parts.clone()
        };
        parts.refresh_authority();
        self.replace(parts)
    }

    /// Returns a new URI with the given port.
    ///
    /// A port equal to the scheme's default port is dropped.
    ///
    /// # Errors
    ///
    /// Returns `UriError` if the result breaks a structural or scheme rule.
    ///
    /// # Examples
    ///
    /// ```
    /// use generic_uri::Uri;
    ///
    /// let uri = Uri::parse("https://example.com").unwrap();
    /// assert_eq!(uri.with_port(Some(8443)).unwrap().to_string(), "https://example.com:8443");
    /// assert_eq!(uri.with_port(Some(443)).unwrap(), uri);
    /// ```
    pub fn with_port(&self, port: Option<u16>) -> Result<Self, UriError> {
        let mut parts = FormattedComponents {
            port: format_port(port, self.scheme()),
            ..self.parts.clone()
        };
        parts.refresh_authority();
        self.replace(parts).inspect_err(log_rejection)
    }

    /// Returns a new URI with the given path.
    ///
    /// # Errors
    ///
    /// Returns `UriError` if a `data` path is not valid RFC 2397 or the
    /// result breaks a structural or scheme rule.
    ///
    /// # Examples
    ///
    /// ```
    /// use generic_uri::Uri;
    ///
    /// let uri = Uri::parse("https://example.com").unwrap();
    /// assert_eq!(uri.with_path("/a b").unwrap().path(), "/a%20b");
    /// assert!(uri.with_path("relative").is_err());
    /// ```
    pub fn with_path(&self, path: &str) -> Result<Self, UriError> {
        self.try_with_path(path).inspect_err(log_rejection)
    }

    fn try_with_path(&self, path: &str) -> Result<Self, UriError> {
        let path = format_path(path, self.scheme())
            .map_err(|e| UriError::new(path, UriErrorKind::InvalidDataPath(e)))?;
        self.replace(FormattedComponents {
            path,
            ..self.parts.clone()
        })
    }

    /// Returns a new URI with the given query; `None` removes it.
    ///
    /// # Errors
    ///
    /// Returns `UriError` if the scheme forbids a query.
    ///
    /// # Examples
    ///
    /// ```
    /// use generic_uri::Uri;
    ///
    /// let uri = Uri::parse("https://example.com/").unwrap();
    /// assert_eq!(uri.with_query(Some("q=a b")).unwrap().to_string(), "https://example.com/?q=a%20b");
    /// ```
    pub fn with_query(&self, query: Option<&str>) -> Result<Self, UriError> {
        self.replace(FormattedComponents {
            query: format_query_or_fragment(query),
            ..self.parts.clone()
        })
        .inspect_err(log_rejection)
    }

    /// Returns a new URI with the given fragment; `None` removes it.
    ///
    /// # Errors
    ///
    /// Returns `UriError` if the scheme forbids a fragment.
    ///
    /// # Examples
    ///
    /// ```
    /// use generic_uri::Uri;
    ///
    /// let uri = Uri::parse("https://example.com/").unwrap();
    /// assert_eq!(uri.with_fragment(Some("top")).unwrap().fragment(), Some("top"));
    /// assert!(Uri::parse("ws://example.com/").unwrap().with_fragment(Some("top")).is_err());
    /// ```
    pub fn with_fragment(&self, fragment: Option<&str>) -> Result<Self, UriError> {
        self.replace(FormattedComponents {
            fragment: format_query_or_fragment(fragment),
            ..self.parts.clone()
        })
        .inspect_err(log_rejection)
    }
}

fn invalid(input: Option<&str>, kind: UriErrorKind) -> UriError {
    UriError::new(input.unwrap_or_default(), kind)
}

fn log_rejection(err: &UriError) {
    tracing::debug!(input = %err.input, error = %err, "rejected URI components");
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Uri {
    type Err = UriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Uri {
    type Error = UriError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl TryFrom<UriComponents> for Uri {
    type Error = UriError;

    fn try_from(components: UriComponents) -> Result<Self, Self::Error> {
        Self::from_components(components)
    }
}

impl AsRef<str> for Uri {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq for Uri {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Uri {}

impl Hash for Uri {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl PartialOrd for Uri {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Uri {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Uri {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Uri {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
