//! Live position entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::value_objects::GeoLocation;

/// One raw fix from the device's positioning subsystem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionSample {
    /// Reported coordinates
    pub location: GeoLocation,

    /// Horizontal accuracy radius in meters
    pub accuracy_m: f64,

    /// Time the fix was taken
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,

    /// Direction of travel in degrees clockwise from north, if known
    #[serde(default)]
    pub heading_deg: Option<f64>,

    /// Ground speed in meters per second, if known
    #[serde(default)]
    pub speed_mps: Option<f64>,
}

impl PositionSample {
    /// Create a sample with validation
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPositionSample` when the accuracy is
    /// negative or not finite, or when heading/speed are not finite.
    pub fn new(
        location: GeoLocation,
        accuracy_m: f64,
        timestamp: DateTime<Utc>,
        heading_deg: Option<f64>,
        speed_mps: Option<f64>,
    ) -> Result<Self, DomainError> {
        if !accuracy_m.is_finite() || accuracy_m < 0.0 {
            return Err(DomainError::InvalidPositionSample(format!(
                "accuracy must be a non-negative number, got {accuracy_m}"
            )));
        }
        if heading_deg.is_some_and(|h| !h.is_finite()) {
            return Err(DomainError::InvalidPositionSample(
                "heading must be finite".to_string(),
            ));
        }
        if speed_mps.is_some_and(|s| !s.is_finite()) {
            return Err(DomainError::InvalidPositionSample(
                "speed must be finite".to_string(),
            ));
        }
        Ok(Self {
            location,
            accuracy_m,
            timestamp,
            heading_deg,
            speed_mps,
        })
    }
}

/// Smoothed, display-ready position estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilteredPosition {
    /// Smoothed coordinates
    pub location: GeoLocation,
    /// Reported accuracy radius in meters
    pub accuracy_m: f64,
    /// Smoothed heading in degrees [0, 360), if known
    pub heading_deg: Option<f64>,
    /// Speed of the latest fix in meters per second, if known
    pub speed_mps: Option<f64>,
}

impl FilteredPosition {
    /// Unsmoothed estimate taken directly from a sample
    #[must_use]
    pub const fn from_sample(sample: &PositionSample) -> Self {
        Self {
            location: sample.location,
            accuracy_m: sample.accuracy_m,
            heading_deg: sample.heading_deg,
            speed_mps: sample.speed_mps,
        }
    }

    /// Speed in km/h, rounded, for status displays
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn speed_kmh(&self) -> Option<i64> {
        self.speed_mps.map(|s| (s * 3.6).round() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(lat: f64, lon: f64) -> GeoLocation {
        GeoLocation::new_unchecked(lat, lon)
    }

    #[test]
    fn valid_sample() {
        let sample = PositionSample::new(at(49.5, 7.0), 12.0, Utc::now(), Some(90.0), None);
        assert!(sample.is_ok());
    }

    #[test]
    fn negative_accuracy_rejected() {
        let err = PositionSample::new(at(49.5, 7.0), -1.0, Utc::now(), None, None).unwrap_err();
        assert!(err.to_string().contains("accuracy"));
    }

    #[test]
    fn nan_values_rejected() {
        assert!(PositionSample::new(at(49.5, 7.0), f64::NAN, Utc::now(), None, None).is_err());
        assert!(
            PositionSample::new(at(49.5, 7.0), 5.0, Utc::now(), Some(f64::NAN), None).is_err()
        );
        assert!(
            PositionSample::new(at(49.5, 7.0), 5.0, Utc::now(), None, Some(f64::INFINITY))
                .is_err()
        );
    }

    #[test]
    fn filtered_from_sample_copies_values() {
        let sample =
            PositionSample::new(at(49.5, 7.0), 8.0, Utc::now(), Some(45.0), Some(2.5)).unwrap();
        let filtered = FilteredPosition::from_sample(&sample);
        assert_eq!(filtered.location, sample.location);
        assert!((filtered.accuracy_m - 8.0).abs() < f64::EPSILON);
        assert_eq!(filtered.heading_deg, Some(45.0));
        assert_eq!(filtered.speed_kmh(), Some(9));
    }

    #[test]
    fn sample_timestamp_serializes_as_millis() {
        let ts = DateTime::from_timestamp_millis(1_700_000_000_123).unwrap();
        let sample = PositionSample::new(at(49.5, 7.0), 8.0, ts, None, None).unwrap();
        let json = serde_json::to_string(&sample).unwrap();
        assert!(json.contains("1700000000123"));
    }
}
