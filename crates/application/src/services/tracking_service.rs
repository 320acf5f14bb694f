//! Tracking service - Live position updates
//!
//! Pulls fixes from a location source through the position filter and
//! remembers whether the map should follow the user.

use std::fmt;

use domain::FilteredPosition;
use tracing::{debug, instrument};

use crate::{
    ports::{LocationError, LocationSourcePort},
    services::position_filter::{FilterOutcome, PositionFilter},
};

/// Counters for one tracking session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackingStats {
    /// Fixes that passed the filter
    pub accepted: u64,
    /// Fixes dropped by the filter
    pub rejected: u64,
}

/// Drives a location source through a [`PositionFilter`]
pub struct TrackingService {
    source: Box<dyn LocationSourcePort>,
    filter: PositionFilter,
    following: bool,
    stats: TrackingStats,
}

impl fmt::Debug for TrackingService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackingService")
            .field("filter", &self.filter)
            .field("following", &self.following)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl TrackingService {
    /// Start a session; following is on by default
    pub fn new(source: Box<dyn LocationSourcePort>, filter: PositionFilter) -> Self {
        Self {
            source,
            filter,
            following: true,
            stats: TrackingStats::default(),
        }
    }

    /// Wait for the next accepted position
    ///
    /// Rejected fixes are skipped. Returns `Ok(None)` when the source is
    /// exhausted.
    ///
    /// # Errors
    ///
    /// Returns the source's [`LocationError`]; the session stays usable and
    /// the caller decides whether to stop (see [`LocationError::is_fatal`]).
    #[instrument(skip(self))]
    pub async fn next_position(&mut self) -> Result<Option<FilteredPosition>, LocationError> {
        loop {
            let Some(sample) = self.source.next_fix().await? else {
                return Ok(None);
            };

            match self.filter.ingest(sample) {
                FilterOutcome::Accepted(position) => {
                    self.stats.accepted += 1;
                    return Ok(Some(position));
                },
                FilterOutcome::Rejected(reason) => {
                    self.stats.rejected += 1;
                    debug!(%reason, "Skipping fix");
                },
            }
        }
    }

    /// Latest accepted position
    #[must_use]
    pub const fn current(&self) -> Option<FilteredPosition> {
        self.filter.current()
    }

    /// Whether the map follows the user
    #[must_use]
    pub const fn is_following(&self) -> bool {
        self.following
    }

    /// Flip follow mode and return the new state
    pub fn toggle_follow(&mut self) -> bool {
        self.following = !self.following;
        self.following
    }

    /// Session counters
    #[must_use]
    pub const fn stats(&self) -> TrackingStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use chrono::Utc;
    use domain::{GeoLocation, PositionSample};

    use super::*;
    use crate::ports::MockLocationSourcePort;

    fn sample(lat: f64, accuracy_m: f64) -> PositionSample {
        PositionSample::new(
            GeoLocation::new_unchecked(lat, 7.0),
            accuracy_m,
            Utc::now(),
            None,
            None,
        )
        .unwrap()
    }

    fn source(
        fixes: Vec<Result<Option<PositionSample>, LocationError>>,
    ) -> Box<dyn LocationSourcePort> {
        let mut fixes = VecDeque::from(fixes);
        let mut mock = MockLocationSourcePort::new();
        mock.expect_next_fix()
            .returning(move || fixes.pop_front().unwrap_or(Ok(None)));
        Box::new(mock)
    }

    #[tokio::test]
    async fn skips_rejected_fixes() {
        let mut svc = TrackingService::new(
            source(vec![Ok(Some(sample(49.5, 500.0))), Ok(Some(sample(49.5, 8.0)))]),
            PositionFilter::default(),
        );

        let position = svc.next_position().await.unwrap().unwrap();
        assert!((position.accuracy_m - 8.0).abs() < f64::EPSILON);
        assert_eq!(
            svc.stats(),
            TrackingStats {
                accepted: 1,
                rejected: 1
            }
        );
        assert_eq!(svc.current(), Some(position));
    }

    #[tokio::test]
    async fn exhausted_source_ends_session() {
        let mut svc = TrackingService::new(source(vec![]), PositionFilter::default());
        assert_eq!(svc.next_position().await, Ok(None));
        assert!(svc.current().is_none());
    }

    #[tokio::test]
    async fn source_errors_surface_and_session_continues() {
        let mut svc = TrackingService::new(
            source(vec![
                Err(LocationError::Timeout),
                Ok(Some(sample(49.5, 8.0))),
            ]),
            PositionFilter::default(),
        );

        assert_eq!(svc.next_position().await, Err(LocationError::Timeout));
        assert!(svc.next_position().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn permission_denied_is_fatal() {
        let mut svc = TrackingService::new(
            source(vec![Err(LocationError::PermissionDenied)]),
            PositionFilter::default(),
        );
        let err = svc.next_position().await.unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn follow_toggle() {
        let mut svc = TrackingService::new(source(vec![]), PositionFilter::default());
        assert!(svc.is_following());
        assert!(!svc.toggle_follow());
        assert!(!svc.is_following());
        assert!(svc.toggle_follow());
    }
}
