//! Kani proof harnesses for the component formatters.
//!
//! Kani is not a Cargo dependency. Install and run with:
//!
//! ```bash
//! cargo install --locked kani-verifier
//! cargo kani setup
//! cargo kani --features kani
//! ```
//!
//! This module is only compiled when using Kani (`#[cfg(kani)]`).

use crate::{
    CharSet, PATH_CHARS, QUERY_OR_FRAGMENT_CHARS, USER_CHARS, default_port, encode, format_port,
};

const SCHEMES: [&str; 9] = [
    "data", "file", "ftp", "gopher", "http", "https", "ws", "wss", "urn",
];

/// Bounded ASCII string for tractable string proofs.
fn arbitrary_ascii(max_len: usize) -> String {
    let len: usize = kani::any();
    kani::assume(len <= max_len);
    let mut s = String::with_capacity(len);
    for _ in 0..len {
        let byte: u8 = kani::any();
        kani::assume(byte.is_ascii());
        s.push(char::from(byte));
    }
    s
}

fn arbitrary_scheme() -> &'static str {
    let idx: usize = kani::any();
    SCHEMES[idx % SCHEMES.len()]
}

fn assert_encode_idempotent(allowed: CharSet) {
    let raw = arbitrary_ascii(3);
    let once = encode(&raw, allowed);
    assert_eq!(encode(&once, allowed), once);
}

/// Proof: encoding an already encoded path is a no-op
#[kani::proof]
#[kani::unwind(12)]
fn proof_path_encoding_idempotent() {
    assert_encode_idempotent(PATH_CHARS);
}

/// Proof: encoding an already encoded user is a no-op
#[kani::proof]
#[kani::unwind(12)]
fn proof_user_encoding_idempotent() {
    assert_encode_idempotent(USER_CHARS);
}

/// Proof: encoding an already encoded query is a no-op
#[kani::proof]
#[kani::unwind(12)]
fn proof_query_encoding_idempotent() {
    assert_encode_idempotent(QUERY_OR_FRAGMENT_CHARS);
}

/// Proof: the formatted port never equals the scheme's default port
#[kani::proof]
#[kani::unwind(10)]
fn proof_default_port_elided() {
    let scheme = arbitrary_scheme();
    let port: u16 = kani::any();
    let formatted = format_port(Some(port), Some(scheme));

    match default_port(scheme) {
        Some(default) if default == port => assert_eq!(formatted, None),
        _ => assert_eq!(formatted, Some(port)),
    }
}

/// Proof: port formatting is idempotent
#[kani::proof]
#[kani::unwind(10)]
fn proof_port_formatting_idempotent() {
    let scheme = arbitrary_scheme();
    let port: Option<u16> = kani::any();
    let once = format_port(port, Some(scheme));
    assert_eq!(format_port(once, Some(scheme)), once);
}
