//! Cross-component invariant checks.
//!
//! Every constructor and every mutator of [`Uri`](crate::Uri) passes its
//! formatted components through [`assert_valid_state`] before a value is
//! handed out; a freshly validated value starts with an empty string cache.

use crate::components::FormattedComponents;
use crate::error::StructureError;
use crate::scheme::SchemePolicy;

/// Checks the generic RFC 3986 rules, then the scheme's policy.
pub(crate) fn assert_valid_state(parts: &FormattedComponents) -> Result<(), StructureError> {
    let path = parts.path.as_str();

    if parts.authority.is_some() && !path.is_empty() && !path.starts_with('/') {
        return Err(StructureError::RelativePathWithAuthority {
            path: path.to_string(),
        });
    }

    if parts.authority.is_none() && path.starts_with("//") {
        return Err(StructureError::DoubleSlashWithoutAuthority {
            path: path.to_string(),
        });
    }

    if parts.scheme.is_none() && parts.authority.is_none() {
        let segment = path.split('/').next().unwrap_or_default();
        if segment.contains(':') {
            return Err(StructureError::ColonInFirstSegment {
                segment: segment.to_string(),
            });
        }
    }

    if parts.host.is_none() && (parts.user_info.is_some() || parts.port.is_some()) {
        return Err(StructureError::AuthorityWithoutHost);
    }

    let Some(scheme) = parts.scheme.as_deref() else {
        return Ok(());
    };
    let Some(policy) = SchemePolicy::for_scheme(scheme) else {
        return Ok(());
    };

    let violations = policy.violations(parts);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(StructureError::SchemePolicy {
            scheme: scheme.to_string(),
            policy,
            violations,
        })
    }
}
