//! Convenient re-exports for glob imports.
//!
//! ```rust
//! use generic_uri::prelude::*;
//!
//! let uri = Uri::parse("https://example.com/").unwrap();
//! assert_eq!(uri.host_kind(), Some(HostKind::RegisteredName));
//! ```
//!
//! The free formatting functions and character sets are left out; import
//! them from the crate root.

pub use crate::{
    // Core types
    HostKind, PolicyRule, SchemePolicy, Uri, UriComponents,
    // Builder
    UriBuilder,
    // Errors
    DataPathError, ErrorCategory, HostError, PortError, SchemeError, StructureError, UriError,
    UriErrorKind,
};
