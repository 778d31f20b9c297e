use seatline_core::{CoreError, CoreResult, UserField};
use seatline_shared::Passenger;
use validator::ValidateEmail;

/// Checks the passenger record before any inventory is consulted.
///
/// Order matters: first name, then last name, then email.
pub fn validate_passenger(passenger: &Passenger) -> CoreResult<()> {
    if passenger.first_name.trim().is_empty() {
        return Err(CoreError::invalid_user(UserField::FirstName, "must not be empty"));
    }
    if passenger.last_name.trim().is_empty() {
        return Err(CoreError::invalid_user(UserField::LastName, "must not be empty"));
    }
    if !passenger.email.validate_email() {
        return Err(CoreError::invalid_user(UserField::Email, "is not a valid address"));
    }
    Ok(())
}
