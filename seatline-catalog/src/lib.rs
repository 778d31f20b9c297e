pub mod routes;
pub mod inventory;

pub use routes::{RouteTable, TableError};
pub use inventory::{SeatInventory, SeatRef};
