pub mod models;
pub mod index;
pub mod validation;
pub mod engine;

pub use models::{PurchaseRequest, Receipt, Removal, SeatAssignment, Ticket};
pub use index::{Reservation, ReservationIndex};
pub use engine::AllocationEngine;
