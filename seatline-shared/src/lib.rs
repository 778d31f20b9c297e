pub mod models;
pub mod pii;

pub use models::{Passenger, Route};
pub use pii::Masked;
