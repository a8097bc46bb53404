//! Geocoder adapter - Implements GeocoderPort using integration_bikeshare

use std::sync::Arc;

use application::ports::{GeocodeError, GeocodeResult, GeocoderPort};
use async_trait::async_trait;
use integration_bikeshare::{
    GeocodingClient, GeocodingError, NominatimConfig, NominatimGeocodingClient,
};
use tracing::{debug, instrument, warn};

/// Adapter for address resolution through a geocoding client
pub struct GeocoderAdapter {
    client: Arc<dyn GeocodingClient>,
}

impl std::fmt::Debug for GeocoderAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeocoderAdapter")
            .field("client", &"dyn GeocodingClient")
            .finish()
    }
}

impl GeocoderAdapter {
    /// Create an adapter around an existing client
    pub fn new(client: Arc<dyn GeocodingClient>) -> Self {
        Self { client }
    }

    /// Create an adapter backed by Nominatim
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn nominatim(config: &NominatimConfig) -> Result<Self, GeocodingError> {
        Ok(Self::new(Arc::new(NominatimGeocodingClient::new(config)?)))
    }

    /// Map a client error onto the port's two failure kinds
    fn map_error(error: GeocodingError) -> GeocodeError {
        match error {
            GeocodingError::AddressNotFound(address) => GeocodeError::AddressNotFound(address),
            other => GeocodeError::ServiceUnavailable(other.to_string()),
        }
    }
}

#[async_trait]
impl GeocoderPort for GeocoderAdapter {
    #[instrument(skip(self))]
    async fn resolve(&self, address: &str) -> Result<GeocodeResult, GeocodeError> {
        debug!(%address, "Resolving address");

        let place = self.client.geocode(address).await.map_err(|e| {
            warn!(%address, error = %e, "Failed to geocode address");
            Self::map_error(e)
        })?;

        Ok(GeocodeResult {
            coordinate: place.location,
            formatted_address: place.display_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::value_objects::Coordinate;
    use integration_bikeshare::GeocodedPlace;

    struct StaticClient(fn() -> Result<GeocodedPlace, GeocodingError>);

    #[async_trait]
    impl GeocodingClient for StaticClient {
        async fn geocode(&self, _address: &str) -> Result<GeocodedPlace, GeocodingError> {
            (self.0)()
        }
    }

    fn adapter(f: fn() -> Result<GeocodedPlace, GeocodingError>) -> GeocoderAdapter {
        GeocoderAdapter::new(Arc::new(StaticClient(f)))
    }

    #[tokio::test]
    async fn resolves_place() {
        let adapter = adapter(|| {
            Ok(GeocodedPlace {
                location: Coordinate::new(41.8786, -87.6403).unwrap(),
                display_name: "Union Station".to_string(),
            })
        });

        let result = adapter.resolve("union station").await.unwrap();
        assert_eq!(result.formatted_address, "Union Station");
        assert!((result.coordinate.latitude() - 41.8786).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn not_found_maps_to_address_not_found() {
        let adapter = adapter(|| Err(GeocodingError::AddressNotFound("nowhere".to_string())));
        let err = adapter.resolve("nowhere").await.unwrap_err();
        assert_eq!(err, GeocodeError::AddressNotFound("nowhere".to_string()));
    }

    #[tokio::test]
    async fn transport_failures_map_to_service_unavailable() {
        for make in [
            (|| Err(GeocodingError::Timeout)) as fn() -> Result<GeocodedPlace, GeocodingError>,
            || Err(GeocodingError::RateLimitExceeded),
            || Err(GeocodingError::ConnectionFailed("refused".to_string())),
            || Err(GeocodingError::RequestFailed("HTTP 500".to_string())),
            || Err(GeocodingError::ParseError("bad json".to_string())),
        ] {
            let err = adapter(make).resolve("Chicago").await.unwrap_err();
            assert!(matches!(err, GeocodeError::ServiceUnavailable(_)), "{err:?}");
        }
    }

    #[test]
    fn debug_output() {
        let adapter = GeocoderAdapter::nominatim(&NominatimConfig::for_testing()).unwrap();
        assert!(format!("{adapter:?}").contains("GeocoderAdapter"));
    }
}
