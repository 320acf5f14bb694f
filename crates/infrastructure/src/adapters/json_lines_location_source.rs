//! JSON-lines location source
//!
//! Reads position fixes from any async line stream (a recorded track file,
//! stdin piped from `gpspipe`, ...). One JSON object per line:
//!
//! ```text
//! {"lat": 49.5123, "lon": 7.0834, "accuracy": 8.0, "heading": 90.0, "speed": 1.4, "timestamp_ms": 1700000000000}
//! {"error": "timeout"}
//! ```
//!
//! `heading`, `speed` and `timestamp_ms` are optional; a missing timestamp
//! is replaced by the time the line was read. Blank lines are skipped.

use application::ports::{LocationError, LocationSourcePort};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::{GeoLocation, PositionSample};
use serde::Deserialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tracing::{debug, warn};

/// One line of input
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FixLine {
    Error {
        error: String,
    },
    Fix {
        lat: f64,
        lon: f64,
        accuracy: f64,
        #[serde(default)]
        heading: Option<f64>,
        #[serde(default)]
        speed: Option<f64>,
        #[serde(default)]
        timestamp_ms: Option<i64>,
    },
}

/// [`LocationSourcePort`] over a stream of JSON lines
pub struct JsonLinesLocationSource<R> {
    lines: Lines<R>,
    line_no: usize,
}

impl<R> std::fmt::Debug for JsonLinesLocationSource<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonLinesLocationSource")
            .field("line_no", &self.line_no)
            .finish_non_exhaustive()
    }
}

impl<R: AsyncBufRead + Unpin> JsonLinesLocationSource<R> {
    /// Read fixes from `reader`
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
        }
    }

    fn parse_line(&self, line: &str) -> Result<PositionSample, LocationError> {
        let parsed: FixLine = serde_json::from_str(line)
            .map_err(|e| LocationError::Malformed(format!("line {}: {e}", self.line_no)))?;

        match parsed {
            FixLine::Error { error } => Err(source_error(&error)),
            FixLine::Fix {
                lat,
                lon,
                accuracy,
                heading,
                speed,
                timestamp_ms,
            } => {
                let location = GeoLocation::new(lat, lon)
                    .map_err(|e| LocationError::Malformed(format!("line {}: {e}", self.line_no)))?;
                let timestamp = match timestamp_ms {
                    Some(ms) => DateTime::from_timestamp_millis(ms).ok_or_else(|| {
                        LocationError::Malformed(format!(
                            "line {}: timestamp {ms} out of range",
                            self.line_no
                        ))
                    })?,
                    None => Utc::now(),
                };
                PositionSample::new(location, accuracy, timestamp, heading, speed)
                    .map_err(|e| LocationError::Malformed(format!("line {}: {e}", self.line_no)))
            },
        }
    }
}

fn source_error(code: &str) -> LocationError {
    match code.trim().to_ascii_lowercase().as_str() {
        "permission_denied" | "denied" => LocationError::PermissionDenied,
        "timeout" => LocationError::Timeout,
        _ => LocationError::Unavailable(code.to_string()),
    }
}

#[async_trait]
impl<R: AsyncBufRead + Unpin + Send> LocationSourcePort for JsonLinesLocationSource<R> {
    async fn next_fix(&mut self) -> Result<Option<PositionSample>, LocationError> {
        loop {
            let line = self
                .lines
                .next_line()
                .await
                .map_err(|e| LocationError::Unavailable(e.to_string()))?;
            let Some(line) = line else {
                debug!(lines = self.line_no, "Location stream ended");
                return Ok(None);
            };
            self.line_no += 1;

            if line.trim().is_empty() {
                continue;
            }

            return match self.parse_line(&line) {
                Ok(sample) => Ok(Some(sample)),
                Err(e) => {
                    warn!(line = self.line_no, error = %e, "Location source reported a problem");
                    Err(e)
                },
            };
        }
    }
}
