//! Property-based tests for URI formatting and validation.
//!
//! Inputs are generated from the RFC 3986 grammar (and from arbitrary
//! printable text) and the canonicalization laws are checked on them.

use proptest::prelude::*;

use generic_uri::{
    PASSWORD_CHARS, PATH_CHARS, QUERY_OR_FRAGMENT_CHARS, REG_NAME_CHARS, USER_CHARS, Uri,
    UriBuilder, UriComponents, decode, default_port, encode,
};

/// Strategies for generating grammar-conformant inputs.
mod strategies {
    use super::*;

    /// Valid alphanumeric characters for DNS labels
    const ALPHANUMERIC: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

    /// Schemes with a host-based policy
    const HOST_SCHEMES: &[&str] = &["http", "https", "ws", "wss", "ftp", "gopher"];

    /// Generate a DNS label of mixed case
    pub fn dns_label() -> impl Strategy<Value = String> {
        prop::collection::vec(prop::sample::select(ALPHANUMERIC.to_vec()), 1..=12)
            .prop_map(|bytes| bytes.into_iter().map(char::from).collect())
    }

    /// Generate a domain name (1-4 labels)
    pub fn domain() -> impl Strategy<Value = String> {
        prop::collection::vec(dns_label(), 1..=4).prop_map(|labels| labels.join("."))
    }

    /// Generate a valid IPv4 address
    pub fn ipv4() -> impl Strategy<Value = String> {
        (0u8..=255, 0u8..=255, 0u8..=255, 0u8..=255)
            .prop_map(|(a, b, c, d)| format!("{a}.{b}.{c}.{d}"))
    }

    /// Generate a bracketed IPv6 literal
    pub fn ipv6() -> impl Strategy<Value = String> {
        any::<[u16; 8]>().prop_map(|segments| {
            format!("[{}]", std::net::Ipv6Addr::from(segments))
        })
    }

    /// Generate any kind of non-empty host
    pub fn host() -> impl Strategy<Value = String> {
        prop_oneof![3 => domain(), 1 => ipv4(), 1 => ipv6()]
    }

    /// Generate a scheme with a host-based policy
    pub fn host_scheme() -> impl Strategy<Value = &'static str> {
        prop::sample::select(HOST_SCHEMES.to_vec())
    }

    /// Generate an absolute path of printable text, possibly empty
    pub fn absolute_path() -> impl Strategy<Value = String> {
        prop::collection::vec("[ -~&&[^/]]{0,8}", 0..=4).prop_map(|segments| {
            segments.iter().map(|s| format!("/{s}")).collect::<String>()
        })
    }

    /// Generate printable text, possibly with stray `%`
    pub fn printable() -> impl Strategy<Value = String> {
        "[ -~]{0,24}"
    }

    /// Generate text containing non-ASCII characters
    pub fn unicode_text() -> impl Strategy<Value = String> {
        "\\PC{0,16}"
    }
}

mod encoding_tests {
    use super::strategies::*;
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(1000))]

        #[test]
        fn encoding_is_idempotent(raw in unicode_text()) {
            for set in [USER_CHARS, PASSWORD_CHARS, REG_NAME_CHARS, PATH_CHARS, QUERY_OR_FRAGMENT_CHARS] {
                let once = encode(&raw, set);
                prop_assert_eq!(encode(&once, set), once);
            }
        }

        #[test]
        fn encoded_text_is_ascii(raw in unicode_text()) {
            prop_assert!(encode(&raw, PATH_CHARS).is_ascii());
        }

        #[test]
        fn decoding_reverses_fresh_encoding(raw in "[^%]{0,16}") {
            prop_assert_eq!(decode(&encode(&raw, USER_CHARS)), raw.as_bytes().to_vec());
        }
    }
}

mod uri_tests {
    use super::strategies::*;
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        #[test]
        fn hosts_with_paths_build(scheme in host_scheme(), host in host(), path in absolute_path()) {
            let uri = UriBuilder::new().scheme(scheme).host(host.as_str()).path(path).build();
            prop_assert!(uri.is_ok(), "rejected {}://{}", scheme, host);
        }

        #[test]
        fn registered_names_are_lowercased(scheme in host_scheme(), host in domain()) {
            let uri = UriBuilder::new().scheme(scheme).host(host.as_str()).build().unwrap();
            let lowered = host.to_ascii_lowercase();
            prop_assert_eq!(uri.host(), Some(lowered.as_str()));
        }

        #[test]
        fn default_port_is_elided(scheme in host_scheme(), host in host()) {
            let port = default_port(scheme).unwrap();
            let uri = UriBuilder::new().scheme(scheme).host(host).port(port).build().unwrap();
            prop_assert_eq!(uri.port(), None);
            let expected = format!(":{port}");
            prop_assert!(!uri.as_str().ends_with(&expected));
        }

        #[test]
        fn other_ports_are_kept(scheme in host_scheme(), host in host(), port in any::<u16>()) {
            prop_assume!(Some(port) != default_port(scheme));
            let uri = UriBuilder::new().scheme(scheme).host(host).port(port).build().unwrap();
            prop_assert_eq!(uri.port(), Some(port));
        }

        #[test]
        fn serialization_reparses_to_equal_value(input in printable()) {
            if let Ok(uri) = Uri::parse(&input) {
                let reparsed = Uri::parse(uri.as_str());
                prop_assert!(reparsed.is_ok(), "{} does not reparse", uri);
                let reparsed = reparsed.unwrap();
                prop_assert_eq!(reparsed.as_str(), uri.as_str());
                prop_assert_eq!(reparsed, uri);
            }
        }

        #[test]
        fn components_feed_back_unchanged(scheme in host_scheme(), host in host(), path in absolute_path(), user in "[a-z]{1,6}") {
            let uri = UriBuilder::new().scheme(scheme).user(user).host(host).path(path).build().unwrap();
            let components: UriComponents = uri.components();
            prop_assert_eq!(Uri::from_components(components).unwrap(), uri);
        }

        #[test]
        fn setting_current_values_is_a_noop(scheme in host_scheme(), host in host(), path in absolute_path()) {
            let uri = UriBuilder::new().scheme(scheme).host(host).path(path).build().unwrap();
            prop_assert_eq!(uri.with_scheme(uri.scheme()).unwrap(), uri.clone());
            prop_assert_eq!(uri.with_host(uri.host()).unwrap(), uri.clone());
            prop_assert_eq!(uri.with_port(uri.port()).unwrap(), uri.clone());
            prop_assert_eq!(uri.with_path(uri.path()).unwrap(), uri.clone());
        }

        #[test]
        fn relative_paths_never_follow_an_authority(host in domain(), segment in "[a-z]{1,8}") {
            prop_assert!(UriBuilder::new().host(host).path(segment).build().is_err());
        }
    }
}
