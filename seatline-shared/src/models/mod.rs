pub mod passenger;
pub mod route;

pub use passenger::Passenger;
pub use route::Route;
