//! Batch geocode service - Resolve many delivery addresses in one run
//!
//! Rows are resolved one after another through the [`GeocodeService`], so
//! repeated addresses in a list hit the cache. Rows without street or house
//! number are skipped before any provider is asked.

use std::sync::Arc;

use domain::GeocodeResult;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::{address_parser::parse_address, services::geocode_service::GeocodeService};

/// One delivery address of a bulk import
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressRow {
    /// Street name
    pub street: String,
    /// House number
    pub house_number: String,
    /// Town or municipality
    #[serde(default)]
    pub locality: String,
    /// Free-form remark shown with the result
    #[serde(default)]
    pub note: String,
}

impl AddressRow {
    /// Create a row from its parts
    #[must_use]
    pub fn new(
        street: impl Into<String>,
        house_number: impl Into<String>,
        locality: impl Into<String>,
    ) -> Self {
        Self {
            street: street.into(),
            house_number: house_number.into(),
            locality: locality.into(),
            note: String::new(),
        }
    }

    /// Build a row from a combined address such as `"Hauptstraße 9A, Oberthal"`
    #[must_use]
    pub fn from_free_text(combined: &str) -> Self {
        let parsed = parse_address(combined);
        Self::new(parsed.street, parsed.house_number, parsed.locality)
    }

    /// Attach a note
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    /// Whether the row carries enough to be geocoded
    #[must_use]
    pub fn is_resolvable(&self) -> bool {
        !self.street.trim().is_empty() && !self.house_number.trim().is_empty()
    }
}

/// What happened to one row
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BatchOutcome {
    /// Coordinates were found
    Resolved {
        /// The resolution
        result: GeocodeResult,
    },
    /// Every strategy failed
    Unresolved,
    /// Street or house number missing
    Skipped,
}

/// Result row of a batch run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchEntry {
    /// The input row
    pub row: AddressRow,
    /// Outcome for the row
    #[serde(flatten)]
    pub outcome: BatchOutcome,
    /// Set when the delivery needs attention: the house number was reduced
    /// or the row carries a note
    pub has_hint: bool,
}

/// Outcome of a batch run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchReport {
    /// Per-row results in input order
    pub entries: Vec<BatchEntry>,
    /// Rows with coordinates
    pub resolved: usize,
    /// Rows no strategy could resolve
    pub failed: usize,
    /// Rows skipped for missing street or house number
    pub skipped: usize,
}

impl BatchReport {
    /// Resolved results in input order
    pub fn results(&self) -> impl Iterator<Item = &GeocodeResult> {
        self.entries.iter().filter_map(|entry| match &entry.outcome {
            BatchOutcome::Resolved { result } => Some(result),
            BatchOutcome::Unresolved | BatchOutcome::Skipped => None,
        })
    }

    /// Entries flagged with a hint
    pub fn hinted(&self) -> impl Iterator<Item = &BatchEntry> {
        self.entries.iter().filter(|entry| entry.has_hint)
    }

    fn push(&mut self, row: AddressRow, outcome: BatchOutcome) {
        match &outcome {
            BatchOutcome::Resolved { .. } => self.resolved += 1,
            BatchOutcome::Unresolved => self.failed += 1,
            BatchOutcome::Skipped => self.skipped += 1,
        }
        let reduced = matches!(
            &outcome,
            BatchOutcome::Resolved { result } if result.is_house_number_reduced()
        );
        let has_hint = reduced || !row.note.trim().is_empty();
        self.entries.push(BatchEntry {
            row,
            outcome,
            has_hint,
        });
    }
}

/// Resolves address lists
#[derive(Debug, Clone)]
pub struct BatchGeocodeService {
    geocoder: Arc<GeocodeService>,
}

impl BatchGeocodeService {
    /// Create a batch service on top of a resolver
    pub const fn new(geocoder: Arc<GeocodeService>) -> Self {
        Self { geocoder }
    }

    /// Resolve all rows sequentially
    #[instrument(skip(self, rows), fields(rows = rows.len()))]
    pub async fn resolve_all(&self, rows: Vec<AddressRow>) -> BatchReport {
        let mut report = BatchReport::default();

        for row in rows {
            if !row.is_resolvable() {
                warn!(street = %row.street, house_number = %row.house_number, "Skipping incomplete address");
                report.push(row, BatchOutcome::Skipped);
                continue;
            }

            let outcome = match self
                .geocoder
                .resolve(&row.street, &row.house_number, &row.locality)
                .await
            {
                Some(result) => BatchOutcome::Resolved { result },
                None => BatchOutcome::Unresolved,
            };
            report.push(row, outcome);
        }

        info!(
            resolved = report.resolved,
            failed = report.failed,
            skipped = report.skipped,
            "Batch geocoding finished"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use domain::GeoLocation;

    use super::*;
    use crate::ports::{
        GeocodeCandidate, GeocodingProviderPort, MockGeocodeCachePort, MockGeocodingProviderPort,
        QueryForm,
    };

    fn batch_service(calls: Option<usize>) -> BatchGeocodeService {
        let mut provider = MockGeocodingProviderPort::new();
        provider.expect_provider_id().return_const("nominatim");
        let search = provider.expect_search();
        if let Some(n) = calls {
            search.times(n);
        }
        search.returning(|q| {
            let hit = match &q.form {
                QueryForm::Structured { street, .. } => {
                    street == "hauptstraße 9" || street == "lindenweg 4"
                },
                QueryForm::FreeText(_) => false,
            };
            Ok(if hit {
                vec![GeocodeCandidate {
                    location: GeoLocation::new_unchecked(49.51, 7.08),
                    display_name: "Oberthal".to_string(),
                }]
            } else {
                vec![]
            })
        });

        let mut cache = MockGeocodeCachePort::new();
        cache.expect_get().returning(|_| None);
        cache.expect_insert().returning(|_, _| ());

        let providers: Vec<Arc<dyn GeocodingProviderPort>> = vec![Arc::new(provider)];
        let geocoder = GeocodeService::new(providers, Arc::new(cache));
        BatchGeocodeService::new(Arc::new(geocoder))
    }

    #[test]
    fn row_from_free_text() {
        let row = AddressRow::from_free_text("Hauptstraße 9A, Oberthal");
        assert_eq!(row, AddressRow::new("Hauptstraße", "9A", "Oberthal"));
        assert!(row.is_resolvable());
        assert!(!AddressRow::from_free_text("Marktplatz").is_resolvable());
    }

    #[tokio::test]
    async fn incomplete_rows_never_reach_resolver() {
        let svc = batch_service(Some(0));
        let report = svc
            .resolve_all(vec![
                AddressRow::new("", "9", "Oberthal"),
                AddressRow::new("Hauptstraße", "  ", "Oberthal"),
            ])
            .await;
        assert_eq!(report.skipped, 2);
        assert_eq!(report.resolved + report.failed, 0);
        assert!(report.entries.iter().all(|e| e.outcome == BatchOutcome::Skipped));
    }

    #[tokio::test]
    async fn counts_and_hints() {
        let svc = batch_service(None);
        let report = svc
            .resolve_all(vec![
                AddressRow::new("Hauptstraße", "9", "Oberthal"),
                AddressRow::new("Hauptstraße", "9A", "Oberthal"),
                AddressRow::new("Lindenweg", "4", "Oberthal").with_note("Hinterhaus"),
                AddressRow::new("Nirgendweg", "1", ""),
                AddressRow::new("", "", ""),
            ])
            .await;

        assert_eq!(report.resolved, 3);
        assert_eq!(report.failed, 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.results().count(), 3);

        let hints: Vec<&str> = report
            .hinted()
            .map(|e| e.row.house_number.as_str())
            .collect();
        assert_eq!(hints, vec!["9A", "4"]);
    }

    #[test]
    fn entry_serializes_with_status_tag() {
        let mut report = BatchReport::default();
        report.push(AddressRow::new("", "", ""), BatchOutcome::Skipped);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["skipped"], 1);
        assert_eq!(json["entries"][0]["status"], "skipped");
        assert_eq!(json["entries"][0]["has_hint"], false);
    }
}
