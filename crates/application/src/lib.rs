//! Application layer - Use cases and orchestration
//!
//! Contains the address parser, the geocoding resolver with its strategy
//! chain, batch resolution, and the live position filter. External systems
//! (geocoding providers, cache, location source) are reached through ports.

pub mod address_parser;
pub mod error;
pub mod ports;
pub mod services;

pub use address_parser::{
    ParseMethod, normalize_street_name, parse_address, parse_address_detailed,
};
pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
