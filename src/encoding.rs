//! Percent-encoding of URI components.
//!
//! [`encode`] canonicalizes raw text against the literal character set of
//! a component: well-formed `%XX` triplets are kept, every other byte that
//! the set does not allow is escaped as an uppercase triplet. A `%` that
//! does not start a triplet is itself escaped, which makes the function
//! total and idempotent.

const HEX_UPPER: &[u8; 16] = b"0123456789ABCDEF";

/// A set of ASCII bytes allowed to appear unencoded in a component.
///
/// The set never contains `%` or non-ASCII bytes.
///
/// # Examples
///
/// ```
/// use generic_uri::CharSet;
///
/// let digits = CharSet::new(b"0123456789");
/// assert!(digits.contains(b'7'));
/// assert!(!digits.contains(b'a'));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CharSet(u128);

impl CharSet {
    /// Creates a set from the given literal bytes.
    ///
    /// # Panics
    ///
    /// Panics (at compile time when used in a constant) if a byte is not
    /// ASCII or is `%`.
    #[must_use]
    pub const fn new(mut bytes: &[u8]) -> Self {
        let mut mask = 0u128;
        while let [cur, rest @ ..] = bytes {
            assert!(
                cur.is_ascii() && *cur != b'%',
                "character sets only hold ASCII bytes other than %"
            );
            mask |= 1u128 << *cur;
            bytes = rest;
        }
        Self(mask)
    }

    /// Returns the union of two sets.
    #[must_use]
    pub const fn or(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Returns true if every byte of `self` is also in `other`.
    #[must_use]
    pub const fn is_subset(self, other: Self) -> bool {
        self.0 & other.0 == self.0
    }

    /// Returns true if the byte may appear unencoded.
    #[must_use]
    pub const fn contains(self, byte: u8) -> bool {
        byte.is_ascii() && self.0 & (1u128 << byte) != 0
    }
}

/// Percent-encodes `raw` so that it only holds bytes from `allowed` and
/// well-formed percent triplets.
///
/// # Examples
///
/// ```
/// use generic_uri::{encode, PATH_CHARS};
///
/// assert_eq!(encode("a b/%7e%zz", PATH_CHARS), "a%20b/%7e%25zz");
/// assert_eq!(encode("a%20b/%7e%25zz", PATH_CHARS), "a%20b/%7e%25zz");
/// ```
#[must_use]
pub fn encode(raw: &str, allowed: CharSet) -> String {
    let bytes = raw.as_bytes();
    let mut out = String::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        let byte = bytes[i];
        if byte == b'%' && is_triplet_at(bytes, i) {
            out.push_str(&raw[i..i + 3]);
            i += 3;
            continue;
        }
        if allowed.contains(byte) {
            out.push(char::from(byte));
        } else {
            push_triplet(&mut out, byte);
        }
        i += 1;
    }

    out
}

/// Decodes every well-formed percent triplet; malformed `%` sequences are
/// kept literally.
#[must_use]
pub fn decode(raw: &str) -> Vec<u8> {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' {
            if let (Some(hi), Some(lo)) = (
                bytes.get(i + 1).copied().and_then(hex_value),
                bytes.get(i + 2).copied().and_then(hex_value),
            ) {
                out.push((hi << 4) | lo);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }

    out
}

/// ASCII-lowercases already encoded (pure ASCII) `input`, leaving percent
/// triplets untouched.
pub(crate) fn lowercase_outside_triplets(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = String::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' && is_triplet_at(bytes, i) {
            out.push_str(&input[i..i + 3]);
            i += 3;
            continue;
        }
        out.push(char::from(bytes[i].to_ascii_lowercase()));
        i += 1;
    }

    out
}

/// Returns true if `raw` only holds bytes from `allowed` and well-formed
/// percent triplets, i.e. if encoding it would change nothing.
pub(crate) fn is_encoded(raw: &str, allowed: CharSet) -> bool {
    let bytes = raw.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' && is_triplet_at(bytes, i) {
            i += 3;
        } else if allowed.contains(bytes[i]) {
            i += 1;
        } else {
            return false;
        }
    }

    true
}

fn is_triplet_at(bytes: &[u8], i: usize) -> bool {
    matches!(
        (bytes.get(i + 1), bytes.get(i + 2)),
        (Some(hi), Some(lo)) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit()
    )
}

fn push_triplet(out: &mut String, byte: u8) {
    out.push('%');
    out.push(char::from(HEX_UPPER[usize::from(byte >> 4)]));
    out.push(char::from(HEX_UPPER[usize::from(byte & 0x0f)]));
}

const fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}
