//! Domain entities
//!
//! Records produced by the address and position pipelines.

mod geocode_result;
mod parsed_address;
mod position;

pub use geocode_result::{AccuracyLabel, GeocodeResult, GeocodeStrategy, HouseNumberReduction};
pub use parsed_address::ParsedAddress;
pub use position::{FilteredPosition, PositionSample};
