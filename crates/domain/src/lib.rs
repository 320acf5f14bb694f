//! Domain layer for Zustellkarte
//!
//! Contains the address and position model shared by the geocoding and
//! tracking pipelines: value objects, entities, and domain errors.
//! This layer performs no I/O and defines the ubiquitous language.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
