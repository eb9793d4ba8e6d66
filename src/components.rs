//! Raw and formatted component records.

use crate::format::assemble_authority;

/// The raw, unvalidated components of a URI.
///
/// This is what the tokenizer produces and what the validated constructor
/// [`Uri::from_components`](crate::Uri::from_components) consumes. Every
/// field is optional; the constructor rejects a missing `path`.
///
/// # Examples
///
/// ```
/// use generic_uri::{Uri, UriComponents};
///
/// let components = UriComponents {
///     scheme: Some("HTTP".into()),
///     host: Some("WWW.Example.COM".into()),
///     port: Some("80".into()),
///     path: Some(String::new()),
///     ..UriComponents::default()
/// };
/// let uri = Uri::from_components(components).unwrap();
/// assert_eq!(uri.to_string(), "http://www.example.com");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct UriComponents {
    /// Scheme, without the trailing `:`.
    pub scheme: Option<String>,
    /// User part of the user info.
    pub user: Option<String>,
    /// Password part of the user info; ignored without a user.
    pub password: Option<String>,
    /// Host, with brackets for IP literals.
    pub host: Option<String>,
    /// Port as text; an empty string counts as absent.
    pub port: Option<String>,
    /// Path; required.
    pub path: Option<String>,
    /// Query, without the leading `?`.
    pub query: Option<String>,
    /// Fragment, without the leading `#`.
    pub fragment: Option<String>,
}

/// The canonical components held by a [`Uri`](crate::Uri).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct FormattedComponents {
    pub(crate) scheme: Option<String>,
    pub(crate) user_info: Option<String>,
    pub(crate) host: Option<String>,
    pub(crate) port: Option<u16>,
    pub(crate) authority: Option<String>,
    pub(crate) path: String,
    pub(crate) query: Option<String>,
    pub(crate) fragment: Option<String>,
}

impl FormattedComponents {
    /// Rebuilds the derived authority from user info, host and port.
    pub(crate) fn refresh_authority(&mut self) {
        self.authority =
            assemble_authority(self.user_info.as_deref(), self.host.as_deref(), self.port);
    }

    pub(crate) fn serialize(&self) -> String {
        let mut out = String::with_capacity(
            self.path.len()
                + self.scheme.as_ref().map_or(0, |s| s.len() + 1)
                + self.authority.as_ref().map_or(0, |a| a.len() + 2)
                + self.query.as_ref().map_or(0, |q| q.len() + 1)
                + self.fragment.as_ref().map_or(0, |f| f.len() + 1),
        );

        if let Some(scheme) = &self.scheme {
            out.push_str(scheme);
            out.push(':');
        }
        if let Some(authority) = &self.authority {
            out.push_str("//");
            out.push_str(authority);
        }
        out.push_str(&self.path);
        if let Some(query) = &self.query {
            out.push('?');
            out.push_str(query);
        }
        if let Some(fragment) = &self.fragment {
            out.push('#');
            out.push_str(fragment);
        }

        out
    }

    /// Splits the formatted user info back into user and password.
    pub(crate) fn to_raw(&self) -> UriComponents {
        let (user, password) = match self.user_info.as_deref() {
            Some(info) => match info.split_once(':') {
                Some((user, password)) => (Some(user.to_string()), Some(password.to_string())),
                None => (Some(info.to_string()), None),
            },
            None => (None, None),
        };

        UriComponents {
            scheme: self.scheme.clone(),
            user,
            password,
            host: self.host.clone(),
            port: self.port.map(|p| p.to_string()),
            path: Some(self.path.clone()),
            query: self.query.clone(),
            fragment: self.fragment.clone(),
        }
    }
}
