use axum::{extract::FromRequestParts, http::header::AUTHORIZATION, http::request::Parts};
use seatline_core::Claims;

use crate::error::AppError;
use crate::state::AppState;

/// Verified claims of the calling identity.
///
/// Extraction fails with 401 when the `Authorization` header is missing or
/// the token does not verify.
#[derive(Debug, Clone)]
pub struct Caller(pub Claims);

impl FromRequestParts<AppState> for Caller {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        let claims = state.tokens.verify(header).into_claims().map_err(|e| {
            tracing::debug!(error = %e, "Rejected bearer token");
            AppError::from(e)
        })?;

        Ok(Caller(claims))
    }
}
