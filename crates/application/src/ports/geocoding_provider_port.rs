//! Geocoding provider port
//!
//! Defines the interface to an upstream geocoding service. Each provider
//! answers structured and free-text queries; the resolver decides which
//! formulation to send and in which order providers are asked.

use async_trait::async_trait;
use domain::GeoLocation;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// ISO 3166-1 alpha-2 code all queries are restricted to
pub const COUNTRY_CODE: &str = "de";

/// Country name appended to free-text queries
pub const COUNTRY_NAME: &str = "Deutschland";

/// How a query is formulated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryForm {
    /// Separate fields: street line (name and house number) plus city
    Structured {
        /// Street name followed by the house number
        street: String,
        /// City, town or municipality
        locality: String,
    },
    /// One free-text line
    FreeText(String),
}

/// A single provider request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeocodeQuery {
    /// Query formulation
    pub form: QueryForm,
    /// Maximum number of candidates to return
    pub limit: u32,
    /// Restrict matches to [`COUNTRY_CODE`]
    pub restrict_country: bool,
}

impl GeocodeQuery {
    /// Structured query for one street address, limit 1, country restricted
    #[must_use]
    pub fn structured(street_line: impl Into<String>, locality: impl Into<String>) -> Self {
        Self {
            form: QueryForm::Structured {
                street: street_line.into(),
                locality: locality.into(),
            },
            limit: 1,
            restrict_country: true,
        }
    }

    /// Free-text query, limit 1, country restricted
    #[must_use]
    pub fn free_text(text: impl Into<String>) -> Self {
        Self {
            form: QueryForm::FreeText(text.into()),
            limit: 1,
            restrict_country: true,
        }
    }

    /// Set the maximum number of candidates
    #[must_use]
    pub const fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Short description for logs
    #[must_use]
    pub fn describe(&self) -> String {
        match &self.form {
            QueryForm::Structured { street, locality } => {
                format!("street={street:?} city={locality:?}")
            },
            QueryForm::FreeText(text) => format!("q={text:?}"),
        }
    }
}

/// A place returned by a provider
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeCandidate {
    /// Coordinates of the place
    pub location: GeoLocation,
    /// Human-readable label
    pub display_name: String,
}

/// Port for geocoding providers
///
/// An empty result list means the provider understood the query but found
/// nothing; errors are reserved for transport and payload failures.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeocodingProviderPort: Send + Sync {
    /// Stable identifier recorded on results (e.g., "nominatim")
    fn provider_id(&self) -> &'static str;

    /// Run one query against the provider
    async fn search(
        &self,
        query: &GeocodeQuery,
    ) -> Result<Vec<GeocodeCandidate>, ApplicationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structured_defaults() {
        let query = GeocodeQuery::structured("hauptstraße 9", "Oberthal");
        assert_eq!(query.limit, 1);
        assert!(query.restrict_country);
        assert_eq!(
            query.form,
            QueryForm::Structured {
                street: "hauptstraße 9".to_string(),
                locality: "Oberthal".to_string(),
            }
        );
    }

    #[test]
    fn free_text_with_limit() {
        let query = GeocodeQuery::free_text("Mainz, Deutschland").with_limit(5);
        assert_eq!(query.limit, 5);
        assert_eq!(query.describe(), "q=\"Mainz, Deutschland\"");
    }

    #[tokio::test]
    async fn mock_provider_is_usable_as_trait_object() {
        let mut mock = MockGeocodingProviderPort::new();
        mock.expect_provider_id().return_const("test");
        mock.expect_search().returning(|_| Ok(vec![]));

        let provider: &dyn GeocodingProviderPort = &mock;
        assert_eq!(provider.provider_id(), "test");
        let found = provider.search(&GeocodeQuery::free_text("x")).await.unwrap();
        assert!(found.is_empty());
    }
}
