use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use seatline_core::CoreError;
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    AuthenticationError(String),
    AuthorizationError(String),
    ValidationError(String),
    NotFoundError(String),
    PaymentRequired(String),
    ConflictError(String),
    Timeout(String),
    InternalServerError(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            AppError::AuthorizationError(_) => StatusCode::FORBIDDEN,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFoundError(_) => StatusCode::NOT_FOUND,
            AppError::PaymentRequired(_) => StatusCode::PAYMENT_REQUIRED,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = match self {
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                "Internal Server Error".to_string()
            }
            AppError::AuthenticationError(msg)
            | AppError::AuthorizationError(msg)
            | AppError::ValidationError(msg)
            | AppError::NotFoundError(msg)
            | AppError::PaymentRequired(msg)
            | AppError::ConflictError(msg)
            | AppError::Timeout(msg) => msg,
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        let msg = err.to_string();
        match err {
            CoreError::Unauthenticated(_) => AppError::AuthenticationError(msg),
            CoreError::PermissionDenied => AppError::AuthorizationError(msg),
            CoreError::InvalidUser { .. } | CoreError::SeatOutOfRange { .. } => AppError::ValidationError(msg),
            CoreError::RouteNotFound | CoreError::SectionNotFound(_) | CoreError::NoReservation(_) => {
                AppError::NotFoundError(msg)
            }
            CoreError::InsufficientPayment { .. } => AppError::PaymentRequired(msg),
            CoreError::NoSeatsAvailable | CoreError::AlreadyReserved | CoreError::SeatOccupied => {
                AppError::ConflictError(msg)
            }
            CoreError::DeadlineExceeded => AppError::Timeout(msg),
            CoreError::Internal(_) => AppError::InternalServerError(msg),
        }
    }
}
