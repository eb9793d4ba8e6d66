//! Immutable, always-valid generic URIs.
//!
//! This crate builds, validates, and canonicalizes URI references as
//! defined by RFC 3986, with scheme-specific rules for a handful of
//! well-known schemes and RFC 2397 checking for `data` URIs.
//!
//! # Overview
//!
//! A [`Uri`] can only be obtained through validation, and every mutator
//! returns a new validated value, so a `Uri` in hand always satisfies:
//!
//! - the generic structural rules of RFC 3986 (an authority requires an
//!   absolute or empty path, a path starting with `//` requires an
//!   authority, a relative reference cannot have a colon in its first
//!   segment);
//! - the policy of its scheme, for the schemes in the table below;
//! - canonical component forms: lowercase scheme and registered name,
//!   no default port, and percent-encoding against each component's
//!   character set.
//!
//! ```text
//! [scheme:][//[user_info@]host[:port]]path[?query][#fragment]
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use generic_uri::Uri;
//!
//! let uri = Uri::parse("HTTP://WWW.Example.COM:80/docs?page=1").unwrap();
//! assert_eq!(uri.to_string(), "http://www.example.com/docs?page=1");
//!
//! let moved = uri.with_path("/about us").unwrap();
//! assert_eq!(moved.path(), "/about%20us");
//!
//! // Invalid combinations are rejected rather than repaired
//! assert!(uri.with_host(None).is_err());
//! ```
//!
//! # Builder
//!
//! ```rust
//! use generic_uri::Uri;
//!
//! let uri = Uri::builder()
//!     .scheme("data")
//!     .path("image/png;base64,iVBORw0KGgo=")
//!     .build()
//!     .unwrap();
//! assert_eq!(uri.path(), "image/png;base64,iVBORw0KGgo=");
//! ```
//!
//! # Scheme Policies
//!
//! | Scheme | Default port | Policy |
//! |--------|--------------|--------|
//! | `data` | | no authority, query, or fragment |
//! | `file` | | host (possibly empty) and path only |
//! | `http`, `https` | 80, 443 | non-empty host |
//! | `ws`, `wss` | 80, 443 | non-empty host, no fragment |
//! | `ftp`, `gopher` | 21, 70 | non-empty host, no fragment, no query |
//!
//! Any other scheme gets only the generic rules.
//!
//! # Logging
//!
//! Rejected components are reported through [`tracing`] at `debug` level;
//! mutations that change nothing are reported at `trace` level.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod builder;
mod components;
mod constants;
mod data_path;
mod encoding;
mod error;
mod format;
mod host;
#[cfg(kani)]
mod kani_impls;
mod parse;
mod path;
pub mod prelude;
mod scheme;
mod uri;
mod validate;

pub use builder::UriBuilder;
pub use components::UriComponents;
pub use constants::{
    BASE64_FLAG, DEFAULT_DATA_MIMETYPE, DEFAULT_DATA_PARAMETERS, MAX_PORT, PASSWORD_CHARS,
    PATH_CHARS, QUERY_OR_FRAGMENT_CHARS, REG_NAME_CHARS, SUB_DELIMS, UNRESERVED, USER_CHARS,
    ZONE_ID_CHARS, ZONE_ID_FORBIDDEN,
};
pub use data_path::format_data_path;
pub use encoding::{CharSet, decode, encode};
pub use error::{
    DataPathError, ErrorCategory, HostError, PortError, SchemeError, StructureError, UriError,
    UriErrorKind,
};
pub use format::{
    assemble_authority, format_port, format_port_text, format_query_or_fragment, format_scheme,
    format_user_info,
};
pub use host::{HostKind, format_host};
pub use path::{format_path, normalize_drive_letter};
pub use scheme::{PolicyRule, SchemePolicy, default_port};
pub use uri::Uri;
