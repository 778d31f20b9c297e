//! Signed, time-limited bearer tokens.

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use seatline_shared::Masked;

use crate::gate::{RejectReason, Verification};
use crate::{Capability, CoreError, CoreResult, RoleTable};

const BEARER_SCHEME: &str = "Bearer";

/// JWT payload: who the caller is and what they may do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the caller's email.
    pub sub: String,
    #[serde(default)]
    pub capabilities: Vec<Capability>,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    /// Value-based intersection with `required`.
    pub fn has_any(&self, required: &[Capability]) -> bool {
        self.capabilities.iter().any(|cap| required.contains(cap))
    }
}

/// Mints and checks tokens. Holds no per-token state.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    lifetime_seconds: i64,
    roles: RoleTable,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("lifetime_seconds", &self.lifetime_seconds)
            .field("roles", &self.roles.len())
            .finish()
    }
}

impl TokenIssuer {
    pub fn new(secret: &str, lifetime_seconds: u64, roles: RoleTable) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            lifetime_seconds: i64::try_from(lifetime_seconds).unwrap_or(i64::MAX),
            roles,
        }
    }

    /// Issues a `Bearer `-prefixed token for `identity`. Identities missing
    /// from the role table get a token with no capabilities.
    pub fn issue(&self, identity: &str) -> CoreResult<String> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: identity.to_string(),
            capabilities: self.roles.capabilities_for(identity),
            iat: now,
            exp: now.saturating_add(self.lifetime_seconds),
        };

        let token = self.sign(&claims)?;
        tracing::info!(identity = %Masked(identity), capabilities = ?claims.capabilities, "Token issued");
        Ok(format!("{} {}", BEARER_SCHEME, token))
    }

    /// Signs arbitrary claims without the bearer prefix.
    pub fn sign(&self, claims: &Claims) -> CoreResult<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| CoreError::Internal(format!("Token encoding failed: {}", e)))
    }

    /// Checks signature and expiry. A leading `Bearer ` is optional.
    pub fn verify(&self, token: Option<&str>) -> Verification {
        let raw = match token.map(str::trim) {
            None | Some("") => return Verification::Rejected(RejectReason::MissingToken),
            Some(value) => value.strip_prefix(BEARER_SCHEME).map(str::trim_start).unwrap_or(value),
        };
        if raw.is_empty() {
            return Verification::Rejected(RejectReason::MissingToken);
        }

        match decode::<Claims>(raw, &self.decoding_key, &self.validation) {
            Ok(data) => Verification::Authenticated(data.claims),
            Err(e) => {
                let reason = match e.kind() {
                    ErrorKind::ExpiredSignature => RejectReason::Expired,
                    ErrorKind::InvalidSignature => RejectReason::InvalidSignature,
                    _ => RejectReason::Malformed,
                };
                tracing::debug!(error = %e, "Token rejected");
                Verification::Rejected(reason)
            }
        }
    }
}
