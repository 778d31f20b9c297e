use serde::{Deserialize, Serialize};

/// A priced origin-destination pair from the fare table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    #[serde(rename = "from")]
    pub origin: String,
    #[serde(rename = "to")]
    pub destination: String,
    pub price: u32,
}

impl Route {
    pub fn new(origin: impl Into<String>, destination: impl Into<String>, price: u32) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            price,
        }
    }

    pub fn connects(&self, origin: &str, destination: &str) -> bool {
        self.origin == origin && self.destination == destination
    }

    /// The only pricing rule: the offer must cover the fare.
    pub fn is_covered_by(&self, offered: u32) -> bool {
        offered >= self.price
    }
}
