use serde::{Deserialize, Serialize};

/// The occupant record stored in a seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passenger {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl Passenger {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
        }
    }

    /// A record without an email does not hold its seat.
    pub fn is_placeholder(&self) -> bool {
        self.email.is_empty()
    }
}
