//! Application services - Use case implementations

mod batch_geocode_service;
mod geocode_service;
mod position_filter;
mod tracking_service;

pub use batch_geocode_service::{
    AddressRow, BatchEntry, BatchGeocodeService, BatchOutcome, BatchReport,
};
pub use geocode_service::GeocodeService;
pub use position_filter::{
    FilterOutcome, PositionFilter, PositionFilterConfig, RejectionReason, circular_mean_deg,
};
pub use tracking_service::{TrackingService, TrackingStats};
