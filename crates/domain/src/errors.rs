//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Coordinates outside the valid latitude/longitude range
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    /// Position fix with impossible values
    #[error("Invalid position sample: {0}")]
    InvalidPositionSample(String),
}

impl From<crate::value_objects::InvalidCoordinates> for DomainError {
    fn from(err: crate::value_objects::InvalidCoordinates) -> Self {
        Self::InvalidCoordinates(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::GeoLocation;

    #[test]
    fn invalid_position_sample_message() {
        let err = DomainError::InvalidPositionSample("accuracy".to_string());
        assert_eq!(err.to_string(), "Invalid position sample: accuracy");
    }

    #[test]
    fn converts_from_invalid_coordinates() {
        let err: DomainError = GeoLocation::new(100.0, 0.0).unwrap_err().into();
        assert!(matches!(err, DomainError::InvalidCoordinates(_)));
        assert!(err.to_string().contains("latitude must be -90 to 90"));
    }
}
