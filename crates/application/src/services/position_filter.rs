//! Position filter - Gating and smoothing of live position fixes
//!
//! Drops fixes that are too inaccurate or jump too far from the previous
//! accepted fix, then smooths the remaining stream over a short history.
//! While moving, recent fixes dominate; while stationary, accurate fixes do.
//! Headings are averaged on the circle so 350° and 10° blend to 0°.

use std::collections::VecDeque;
use std::fmt;

use domain::{FilteredPosition, GeoLocation, PositionSample};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Thresholds of the position filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionFilterConfig {
    /// Fixes with a larger accuracy radius are rejected (default: 100 m)
    #[serde(default = "default_max_accuracy_m")]
    pub max_accuracy_m: f64,

    /// Fixes farther from the previous accepted fix are rejected (default: 100 m)
    #[serde(default = "default_max_jump_m")]
    pub max_jump_m: f64,

    /// Number of accepted fixes kept for smoothing (default: 8)
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,

    /// Smoothing starts once this many fixes are in the history (default: 3)
    #[serde(default = "default_min_smoothing_samples")]
    pub min_smoothing_samples: usize,

    /// Speeds above this count as moving (default: 0.8 m/s)
    #[serde(default = "default_moving_speed_mps")]
    pub moving_speed_mps: f64,
}

const fn default_max_accuracy_m() -> f64 {
    100.0
}

const fn default_max_jump_m() -> f64 {
    100.0
}

const fn default_history_capacity() -> usize {
    8
}

const fn default_min_smoothing_samples() -> usize {
    3
}

const fn default_moving_speed_mps() -> f64 {
    0.8
}

impl Default for PositionFilterConfig {
    fn default() -> Self {
        Self {
            max_accuracy_m: default_max_accuracy_m(),
            max_jump_m: default_max_jump_m(),
            history_capacity: default_history_capacity(),
            min_smoothing_samples: default_min_smoothing_samples(),
            moving_speed_mps: default_moving_speed_mps(),
        }
    }
}

impl PositionFilterConfig {
    /// Validate the thresholds
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid value.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.max_accuracy_m.is_finite() && self.max_accuracy_m > 0.0) {
            return Err("max_accuracy_m must be a positive number".to_string());
        }
        if !(self.max_jump_m.is_finite() && self.max_jump_m > 0.0) {
            return Err("max_jump_m must be a positive number".to_string());
        }
        if self.history_capacity == 0 {
            return Err("history_capacity must be at least 1".to_string());
        }
        if self.min_smoothing_samples == 0 {
            return Err("min_smoothing_samples must be at least 1".to_string());
        }
        if !(self.moving_speed_mps.is_finite() && self.moving_speed_mps >= 0.0) {
            return Err("moving_speed_mps must be a non-negative number".to_string());
        }
        Ok(())
    }
}

/// Why a fix was dropped
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RejectionReason {
    /// Accuracy radius above the limit
    Inaccurate {
        /// Reported accuracy in meters
        accuracy_m: f64,
    },
    /// Too far from the previous accepted fix
    Outlier {
        /// Distance to the previous fix in meters
        distance_m: f64,
    },
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inaccurate { accuracy_m } => write!(f, "accuracy {accuracy_m:.1} m too low"),
            Self::Outlier { distance_m } => write!(f, "jump of {distance_m:.1} m"),
        }
    }
}

/// Result of feeding one fix into the filter
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterOutcome {
    /// Fix accepted; the new smoothed position
    Accepted(FilteredPosition),
    /// Fix dropped; filter state unchanged
    Rejected(RejectionReason),
}

impl FilterOutcome {
    /// The smoothed position, if the fix was accepted
    #[must_use]
    pub const fn accepted(self) -> Option<FilteredPosition> {
        match self {
            Self::Accepted(position) => Some(position),
            Self::Rejected(_) => None,
        }
    }
}

/// Stateful smoother for one live position stream
#[derive(Debug, Clone)]
pub struct PositionFilter {
    config: PositionFilterConfig,
    history: VecDeque<PositionSample>,
    current: Option<FilteredPosition>,
}

impl Default for PositionFilter {
    fn default() -> Self {
        Self::new(PositionFilterConfig::default())
    }
}

impl PositionFilter {
    /// Create an empty filter
    #[must_use]
    pub fn new(config: PositionFilterConfig) -> Self {
        let capacity = config.history_capacity;
        Self {
            config,
            history: VecDeque::with_capacity(capacity),
            current: None,
        }
    }

    /// Feed one fix
    pub fn ingest(&mut self, sample: PositionSample) -> FilterOutcome {
        if sample.accuracy_m > self.config.max_accuracy_m {
            warn!(accuracy_m = sample.accuracy_m, "Fix rejected, accuracy too low");
            return FilterOutcome::Rejected(RejectionReason::Inaccurate {
                accuracy_m: sample.accuracy_m,
            });
        }

        if let Some(previous) = self.history.back() {
            let distance_m = sample.location.planar_distance_m(&previous.location);
            if distance_m > self.config.max_jump_m {
                warn!(distance_m, "Fix rejected as outlier");
                return FilterOutcome::Rejected(RejectionReason::Outlier { distance_m });
            }
        }

        let speed_mps = sample.speed_mps;
        let raw_heading = sample.heading_deg;
        let (raw_location, raw_accuracy) = (sample.location, sample.accuracy_m);

        self.history.push_back(sample);
        while self.history.len() > self.config.history_capacity {
            self.history.pop_front();
        }

        let (location, accuracy_m) = if self.history.len() >= self.config.min_smoothing_samples {
            self.smoothed_location(speed_mps, raw_accuracy)
        } else {
            (raw_location, raw_accuracy)
        };

        let heading_deg = raw_heading.map(|raw| self.smoothed_heading().unwrap_or(raw));

        let filtered = FilteredPosition {
            location,
            accuracy_m,
            heading_deg,
            speed_mps,
        };
        debug!(
            location = %filtered.location,
            accuracy_m = filtered.accuracy_m,
            history = self.history.len(),
            "Fix accepted"
        );
        self.current = Some(filtered);
        FilterOutcome::Accepted(filtered)
    }

    /// Latest smoothed position
    #[must_use]
    pub const fn current(&self) -> Option<FilteredPosition> {
        self.current
    }

    /// Number of fixes in the smoothing history
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Forget all fixes
    pub fn reset(&mut self) {
        self.history.clear();
        self.current = None;
    }

    /// Filter thresholds
    #[must_use]
    pub const fn config(&self) -> &PositionFilterConfig {
        &self.config
    }

    fn smoothed_location(&self, speed_mps: Option<f64>, raw_accuracy: f64) -> (GeoLocation, f64) {
        let moving = speed_mps.is_some_and(|s| s > self.config.moving_speed_mps);

        if moving {
            #[allow(clippy::cast_precision_loss)]
            let n = self.history.len() as f64;
            let weights: Vec<f64> = (1..=self.history.len())
                .map(|rank| {
                    #[allow(clippy::cast_precision_loss)]
                    let rank = rank as f64;
                    0.8f64.mul_add(rank / n, 0.2)
                })
                .collect();
            (self.weighted_location(&weights), raw_accuracy)
        } else {
            let weights: Vec<f64> = self
                .history
                .iter()
                .map(|s| 1.0 / s.accuracy_m.max(0.1))
                .collect();
            let weight_sum: f64 = weights.iter().sum();
            let accuracy = self
                .history
                .iter()
                .zip(&weights)
                .map(|(s, w)| s.accuracy_m * w)
                .sum::<f64>()
                / weight_sum;
            (self.weighted_location(&weights), accuracy)
        }
    }

    fn weighted_location(&self, weights: &[f64]) -> GeoLocation {
        let (mut lat, mut lon, mut total) = (0.0, 0.0, 0.0);
        for (sample, weight) in self.history.iter().zip(weights) {
            lat += sample.location.latitude() * weight;
            lon += sample.location.longitude() * weight;
            total += weight;
        }
        GeoLocation::new_unchecked(lat / total, lon / total)
    }

    /// Circular mean of the headings in the history, if there are enough
    fn smoothed_heading(&self) -> Option<f64> {
        let headings: Vec<f64> = self.history.iter().filter_map(|s| s.heading_deg).collect();
        (headings.len() >= 2).then(|| circular_mean_deg(&headings))
    }
}

/// Mean of angles in degrees, in [0, 360)
#[must_use]
pub fn circular_mean_deg(angles: &[f64]) -> f64 {
    let (sin_sum, cos_sum) = angles.iter().fold((0.0, 0.0), |(s, c), deg| {
        let rad = deg.to_radians();
        (s + rad.sin(), c + rad.cos())
    });
    let mean = sin_sum.atan2(cos_sum).to_degrees().rem_euclid(360.0);
    // Round-off can leave values a hair below 360 for a true 0
    if 360.0 - mean < 1e-9 { 0.0 } else { mean }
}
