//! Value Objects - Immutable, identity-less domain primitives

mod address_key;
mod geo_location;
mod house_number;

pub use address_key::AddressKey;
pub use geo_location::{GeoLocation, InvalidCoordinates, METERS_PER_DEGREE};
pub use house_number::HouseNumber;
