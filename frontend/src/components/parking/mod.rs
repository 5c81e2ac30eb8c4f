pub mod parking;
pub mod parking_place_add;

pub use parking::Parking;
