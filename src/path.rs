//! Path normalization.

use crate::constants::{DRIVE_LETTER_RE, PATH_CHARS};
use crate::data_path::format_data_path;
use crate::encoding::encode;
use crate::error::DataPathError;

/// Formats a raw path for the given (already formatted) scheme.
///
/// The path is percent-encoded first; `data` paths are then validated
/// against RFC 2397 and `file` paths get their drive letter separator
/// normalized.
///
/// # Errors
///
/// Returns `DataPathError` if the scheme is `data` and the path is not a
/// valid RFC 2397 payload.
///
/// # Examples
///
/// ```
/// use generic_uri::format_path;
///
/// assert_eq!(format_path("/a b", Some("http")).unwrap(), "/a%20b");
/// assert_eq!(format_path("/c|/windows", Some("file")).unwrap(), "/c:/windows");
/// assert_eq!(format_path("", Some("data")).unwrap(), "text/plain;charset=us-ascii,");
/// ```
pub fn format_path(raw: &str, scheme: Option<&str>) -> Result<String, DataPathError> {
    let path = encode(raw, PATH_CHARS);
    match scheme {
        Some("data") => format_data_path(&path),
        Some("file") => Ok(normalize_drive_letter(&path)),
        _ => Ok(path),
    }
}

/// Replaces a `|` (or `%7C`) drive letter separator with `:`.
#[must_use]
pub fn normalize_drive_letter(path: &str) -> String {
    DRIVE_LETTER_RE
        .replace(path, "${root}${letter}:${rest}")
        .into_owned()
}
