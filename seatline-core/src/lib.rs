pub mod capability;
pub mod context;
pub mod gate;
pub mod roles;
pub mod token;

pub use capability::Capability;
pub use context::CallContext;
pub use gate::{authorize, RejectReason, Target, Verification};
pub use roles::{RoleEntry, RoleTable};
pub use token::{Claims, TokenIssuer};

use std::fmt;

/// The passenger field a validation failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserField {
    FirstName,
    LastName,
    Email,
}

impl fmt::Display for UserField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserField::FirstName => write!(f, "first name"),
            UserField::LastName => write!(f, "last name"),
            UserField::Email => write!(f, "email"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    #[error("Unauthenticated: {0}")]
    Unauthenticated(RejectReason),
    #[error("Cannot access this api because the token does not have permission")]
    PermissionDenied,
    #[error("{field} {reason}")]
    InvalidUser { field: UserField, reason: String },
    #[error("cannot find route")]
    RouteNotFound,
    #[error("invalid section: {0}")]
    SectionNotFound(String),
    #[error("you must pay more money: fare is {price}, offered {offered}")]
    InsufficientPayment { price: u32, offered: u32 },
    #[error("cannot find empty seat")]
    NoSeatsAvailable,
    #[error("already purchased")]
    AlreadyReserved,
    #[error("no user found for email: {0}")]
    NoReservation(String),
    #[error("new seat is already occupied")]
    SeatOccupied,
    #[error("seat {seat} is out of range, section has {seat_count} seats")]
    SeatOutOfRange { seat: u32, seat_count: u32 },
    #[error("request deadline exceeded")]
    DeadlineExceeded,
    #[error("Internal service error: {0}")]
    Internal(String),
}

impl CoreError {
    pub fn invalid_user(field: UserField, reason: impl Into<String>) -> Self {
        CoreError::InvalidUser {
            field,
            reason: reason.into(),
        }
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
