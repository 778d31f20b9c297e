use chrono::{DateTime, Utc};
use seatline_shared::{Passenger, Route};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A request to buy one seat on the route from `origin` to `destination`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseRequest {
    pub passenger: Passenger,
    pub origin: String,
    pub destination: String,
    /// Amount the buyer is willing to pay.
    pub offered_price: u32,
}

/// Result of a successful purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ticket {
    pub ticket_id: Uuid,
    pub route_index: usize,
    pub section: String,
    pub seat: u32,
}

/// Where a removed reservation used to sit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Removal {
    pub route_index: usize,
    pub section: String,
    pub seat: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Receipt {
    pub ticket_id: Uuid,
    pub passenger: Passenger,
    pub route: Route,
    pub section: String,
    pub seat: u32,
    pub purchased_at: DateTime<Utc>,
}

/// One occupied seat in a section listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatAssignment {
    pub seat: u32,
    pub passenger: Passenger,
}
