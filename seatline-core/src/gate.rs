use std::fmt;

use crate::{Capability, Claims, CoreError, CoreResult};

/// Why a token failed verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    MissingToken,
    Malformed,
    InvalidSignature,
    Expired,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::MissingToken => write!(f, "Authorization token is not provided"),
            RejectReason::Malformed => write!(f, "Authorization token is malformed"),
            RejectReason::InvalidSignature => write!(f, "Authorization token signature is invalid"),
            RejectReason::Expired => write!(f, "Token expired"),
        }
    }
}

/// Outcome of `TokenIssuer::verify`, handed explicitly to each operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    Authenticated(Claims),
    Rejected(RejectReason),
}

impl Verification {
    pub fn into_claims(self) -> CoreResult<Claims> {
        match self {
            Verification::Authenticated(claims) => Ok(claims),
            Verification::Rejected(reason) => Err(CoreError::Unauthenticated(reason)),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Verification::Authenticated(_))
    }
}

/// Whose data an operation touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target<'a> {
    Identity(&'a str),
    /// Wildcard: any caller is accepted.
    Any,
    /// Data not owned by any single user (a whole section); only
    /// capabilities grant access.
    Unowned,
}

/// Grants access when the claims hold any of `required`, belong to the
/// target identity, or the target is `Any`.
pub fn authorize(claims: &Claims, required: &[Capability], target: Target<'_>) -> CoreResult<()> {
    if claims.has_any(required) {
        return Ok(());
    }
    match target {
        Target::Any => Ok(()),
        Target::Identity(identity) if claims.sub == identity => Ok(()),
        Target::Identity(_) | Target::Unowned => {
            tracing::debug!(required = ?required, "capability check failed");
            Err(CoreError::PermissionDenied)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(sub: &str, capabilities: Vec<Capability>) -> Claims {
        Claims {
            sub: sub.to_string(),
            capabilities,
            iat: 0,
            exp: i64::MAX,
        }
    }

    #[test]
    fn test_capability_match_ignores_order() {
        let admin = claims("a@a.com", vec![Capability::Write, Capability::Read, Capability::Admin]);
        let target = Target::Identity("other@example.com");
        assert!(authorize(&admin, &[Capability::Admin, Capability::Read], target).is_ok());
        assert!(authorize(&admin, &[Capability::Write], target).is_ok());

        // Read sits at position 0 of its set here; a positional check would miss it.
        let reader = claims("b@b.com", vec![Capability::Read]);
        assert!(authorize(&reader, &[Capability::Admin, Capability::Read], target).is_ok());
    }

    #[test]
    fn test_read_only_cannot_write_other_identity() {
        let reader = claims("b@b.com", vec![Capability::Read]);
        let err = authorize(&reader, &[Capability::Admin, Capability::Write], Target::Identity("user1@example.com"));
        assert_eq!(err, Err(CoreError::PermissionDenied));
    }

    #[test]
    fn test_self_access_without_capabilities() {
        let user = claims("user1@example.com", vec![]);
        assert!(authorize(&user, &[Capability::Admin, Capability::Write], Target::Identity("user1@example.com")).is_ok());
        assert_eq!(
            authorize(&user, &[Capability::Admin], Target::Identity("user2@example.com")),
            Err(CoreError::PermissionDenied)
        );
    }

    #[test]
    fn test_wildcard_target() {
        let user = claims("user1@example.com", vec![]);
        assert!(authorize(&user, &[Capability::Admin, Capability::Read], Target::Any).is_ok());
    }

    #[test]
    fn test_unowned_target_needs_capability() {
        let user = claims("user1@example.com", vec![]);
        assert_eq!(
            authorize(&user, &[Capability::Admin, Capability::Read], Target::Unowned),
            Err(CoreError::PermissionDenied)
        );
        let reader = claims("b@b.com", vec![Capability::Read]);
        assert!(authorize(&reader, &[Capability::Admin, Capability::Read], Target::Unowned).is_ok());
    }

    #[test]
    fn test_rejected_verification_is_unauthenticated() {
        let result = Verification::Rejected(RejectReason::Expired).into_claims();
        assert_eq!(result, Err(CoreError::Unauthenticated(RejectReason::Expired)));
    }
}
