//! RFC 2397 `data` path validation.
//!
//! ```abnf
//! dataurl    = "data:" [ mediatype ] [ ";base64" ] "," data
//! mediatype  = [ type "/" subtype ] *( ";" parameter )
//! parameter  = attribute "=" value
//! ```

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::constants::{
    BASE64_FLAG, BASE64_FLAG_RE, DEFAULT_DATA_MIMETYPE, DEFAULT_DATA_PARAMETERS, MIMETYPE_RE,
};
use crate::error::DataPathError;

/// Validates and canonicalizes the path of a `data` URI.
///
/// The result is always `mimetype;parameters,data`; a missing media type
/// defaults to `text/plain` and missing parameters to `charset=us-ascii`.
///
/// # Errors
///
/// Returns `DataPathError` if the path is not ASCII, has no `,`, carries a
/// malformed media type or parameter, or is flagged `base64` with a
/// payload that is not canonical base64.
///
/// # Examples
///
/// ```
/// use generic_uri::format_data_path;
///
/// assert_eq!(format_data_path("").unwrap(), "text/plain;charset=us-ascii,");
/// assert_eq!(format_data_path(",A%20brief%20note").unwrap(), "text/plain;charset=us-ascii,A%20brief%20note");
/// assert!(format_data_path("text/plain;base64,SGVsbG8").is_err());
/// ```
pub fn format_data_path(path: &str) -> Result<String, DataPathError> {
    if path.is_empty() {
        return Ok(format!("{DEFAULT_DATA_MIMETYPE};{DEFAULT_DATA_PARAMETERS},"));
    }
    if !path.is_ascii() {
        return Err(DataPathError::NonAscii);
    }

    let (media_type, data) = path.split_once(',').ok_or(DataPathError::MissingComma)?;
    let (mimetype, parameters) = match media_type.split_once(';') {
        Some((mimetype, parameters)) => (mimetype, parameters),
        None => (media_type, ""),
    };
    let mimetype = if mimetype.is_empty() {
        DEFAULT_DATA_MIMETYPE
    } else {
        mimetype
    };
    let parameters = if parameters.is_empty() {
        DEFAULT_DATA_PARAMETERS
    } else {
        parameters
    };

    if !MIMETYPE_RE.is_match(mimetype) {
        return Err(DataPathError::InvalidMimeType {
            mimetype: mimetype.to_string(),
        });
    }

    let flag = BASE64_FLAG_RE.find(parameters);
    let plain_parameters = flag.map_or(parameters, |m| &parameters[..m.start()]);
    validate_parameters(plain_parameters)?;

    if flag.is_some() {
        validate_base64(data)?;
    }

    Ok(format!("{mimetype};{parameters},{data}"))
}

fn validate_parameters(parameters: &str) -> Result<(), DataPathError> {
    for parameter in parameters.split(';').filter(|p| !p.is_empty()) {
        let well_formed = match parameter.split_once('=') {
            Some((key, value)) => !value.contains('=') && !key.eq_ignore_ascii_case(BASE64_FLAG),
            None => false,
        };
        if !well_formed {
            return Err(DataPathError::InvalidParameter {
                parameter: parameter.to_string(),
            });
        }
    }
    Ok(())
}

fn validate_base64(data: &str) -> Result<(), DataPathError> {
    let decoded = STANDARD
        .decode(data)
        .map_err(|e| DataPathError::InvalidBase64 {
            reason: e.to_string(),
        })?;
    if STANDARD.encode(decoded) != data {
        return Err(DataPathError::NonCanonicalBase64);
    }
    Ok(())
}
