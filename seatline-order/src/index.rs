use chrono::{DateTime, Utc};
use seatline_catalog::SeatRef;
use std::collections::HashMap;
use uuid::Uuid;

/// A user's binding to one seat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    pub ticket_id: Uuid,
    pub seat: SeatRef,
    pub purchased_at: DateTime<Utc>,
}

impl Reservation {
    pub fn new(seat: SeatRef) -> Self {
        Self {
            ticket_id: Uuid::new_v4(),
            seat,
            purchased_at: Utc::now(),
        }
    }
}

/// Email to reservation lookup kept in step with the seat inventory.
#[derive(Debug, Clone, Default)]
pub struct ReservationIndex {
    entries: HashMap<String, Reservation>,
}

impl ReservationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, email: &str) -> Option<&Reservation> {
        self.entries.get(email)
    }

    pub fn contains(&self, email: &str) -> bool {
        self.entries.contains_key(email)
    }

    pub fn insert(&mut self, email: String, reservation: Reservation) -> Option<Reservation> {
        self.entries.insert(email, reservation)
    }

    pub fn remove(&mut self, email: &str) -> Option<Reservation> {
        self.entries.remove(email)
    }

    /// Moves an existing reservation to another seat number.
    pub fn set_seat(&mut self, email: &str, seat: u32) -> bool {
        match self.entries.get_mut(email) {
            Some(reservation) => {
                reservation.seat.seat = seat;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Reservation)> {
        self.entries.iter()
    }
}
