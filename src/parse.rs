//! Tokenizer splitting a URI reference into raw components.
//!
//! Splitting never fails: every string is a syntactically possible URI
//! reference under RFC 3986 Appendix B. Whether the pieces are valid is
//! decided by [`Uri::from_components`](crate::Uri::from_components).

use crate::components::UriComponents;
use crate::constants::URI_REFERENCE_RE;

/// Splits `input` into raw components; the path is always present.
pub(crate) fn tokenize(input: &str) -> UriComponents {
    let Some(caps) = URI_REFERENCE_RE.captures(input) else {
        return UriComponents {
            path: Some(input.to_string()),
            ..UriComponents::default()
        };
    };
    let group = |name: &str| caps.name(name).map(|m| m.as_str().to_string());

    let mut components = UriComponents {
        scheme: group("scheme"),
        path: Some(group("path").unwrap_or_default()),
        query: group("query"),
        fragment: group("fragment"),
        ..UriComponents::default()
    };
    if let Some(authority) = caps.name("authority") {
        split_authority(authority.as_str(), &mut components);
    }
    components
}

/// Splits `[user[:password]@]host[:port]`.
fn split_authority(authority: &str, components: &mut UriComponents) {
    let host_port = match authority.rsplit_once('@') {
        Some((user_info, host_port)) => {
            let (user, password) = match user_info.split_once(':') {
                Some((user, password)) => (user, Some(password)),
                None => (user_info, None),
            };
            components.user = Some(user.to_string());
            components.password = password.map(str::to_string);
            host_port
        }
        None => authority,
    };

    let (host, port) = split_host_port(host_port);
    components.host = Some(host.to_string());
    components.port = port.map(str::to_string);
}

fn split_host_port(host_port: &str) -> (&str, Option<&str>) {
    if host_port.starts_with('[') {
        if let Some(end) = host_port.find(']') {
            let (literal, rest) = host_port.split_at(end + 1);
            return match rest.strip_prefix(':') {
                Some(port) => (literal, Some(port)),
                None if rest.is_empty() => (literal, None),
                // Not a literal after all; the host is escaped as a registered name
                None => (host_port, None),
            };
        }
        return (host_port, None);
    }

    match host_port.rsplit_once(':') {
        Some((host, port)) => (host, Some(port)),
        None => (host_port, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn some(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    #[test]
    fn full_reference() {
        let c = tokenize("https://me:p:w@Example.com:8443/a/b?x=1&y#frag");
        assert_eq!(c.scheme, some("https"));
        assert_eq!(c.user, some("me"));
        assert_eq!(c.password, some("p:w"));
        assert_eq!(c.host, some("Example.com"));
        assert_eq!(c.port, some("8443"));
        assert_eq!(c.path, some("/a/b"));
        assert_eq!(c.query, some("x=1&y"));
        assert_eq!(c.fragment, some("frag"));
    }

    #[test]
    fn absent_versus_empty() {
        let c = tokenize("");
        assert_eq!(c, UriComponents {
            path: some(""),
            ..UriComponents::default()
        });

        let c = tokenize("//?#");
        assert_eq!(c.host, some(""));
        assert_eq!(c.path, some(""));
        assert_eq!(c.query, some(""));
        assert_eq!(c.fragment, some(""));
    }

    #[test]
    fn user_info_splits_on_last_at() {
        let c = tokenize("//a@b@host");
        assert_eq!(c.user, some("a@b"));
        assert_eq!(c.host, some("host"));
    }

    #[test]
    fn ip_literals_keep_their_colons() {
        let c = tokenize("http://[fe80::1%eth0]:8080/");
        assert_eq!(c.host, some("[fe80::1%eth0]"));
        assert_eq!(c.port, some("8080"));

        let c = tokenize("http://[::1]");
        assert_eq!(c.host, some("[::1]"));
        assert_eq!(c.port, None);

        let c = tokenize("http://[::1]x");
        assert_eq!(c.host, some("[::1]x"));
    }

    #[test]
    fn empty_port_is_kept_as_text() {
        let c = tokenize("http://host:/");
        assert_eq!(c.host, some("host"));
        assert_eq!(c.port, some(""));
    }

    #[test]
    fn rootless_paths() {
        let c = tokenize("mailto:me@example.com");
        assert_eq!(c.scheme, some("mailto"));
        assert_eq!(c.host, None);
        assert_eq!(c.path, some("me@example.com"));

        let c = tokenize("data:text/plain;base64,SGVsbG8=");
        assert_eq!(c.path, some("text/plain;base64,SGVsbG8="));
    }
}
