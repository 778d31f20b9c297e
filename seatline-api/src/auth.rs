use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::{error::AppError, state::AppState};

#[derive(Debug, Deserialize)]
struct TokenRequest {
    email: String,
}

#[derive(Debug, Serialize)]
struct TokenResponse {
    token: String,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/auth/token", post(issue_token))
}

async fn issue_token(
    State(state): State<AppState>,
    Json(req): Json<TokenRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    if req.email.trim().is_empty() {
        return Err(AppError::ValidationError("email must not be empty".to_string()));
    }
    let token = state.tokens.issue(&req.email)?;
    Ok(Json(TokenResponse { token }))
}
