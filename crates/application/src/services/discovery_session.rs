//! Last-writer-wins guard for overlapping searches
//!
//! A new search does not cancel one still in flight. Each search takes a
//! ticket; when it finishes after a newer ticket was issued its result is
//! reported as superseded so the caller never renders a stale state.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use domain::value_objects::SearchRequest;
use tracing::debug;

use super::discovery_service::{DiscoveryOutcome, DiscoveryService};
use crate::error::DiscoveryError;

/// Sequence number identifying one search
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SearchTicket(u64);

impl SearchTicket {
    /// Raw sequence number
    #[must_use]
    pub const fn sequence(self) -> u64 {
        self.0
    }
}

/// Issues monotonically increasing tickets
#[derive(Debug, Default)]
pub struct SearchSequencer {
    latest: AtomicU64,
}

impl SearchSequencer {
    /// Create a sequencer; the first ticket is 1
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next ticket, superseding all earlier ones
    pub fn next_ticket(&self) -> SearchTicket {
        SearchTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether no newer ticket has been issued
    pub fn is_current(&self, ticket: SearchTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}

/// What a session search produced
#[derive(Debug)]
pub enum SessionOutcome {
    /// The newest search finished; apply its result
    Completed {
        /// Ticket of this search
        ticket: SearchTicket,
        /// Discovery result
        result: Result<DiscoveryOutcome, DiscoveryError>,
    },
    /// A newer search was issued while this one ran; discard
    Superseded {
        /// Ticket of the discarded search
        ticket: SearchTicket,
    },
}

/// Discovery service paired with a sequencer
#[derive(Debug)]
pub struct DiscoverySession {
    service: Arc<DiscoveryService>,
    sequencer: SearchSequencer,
}

impl DiscoverySession {
    /// Create a session around a service
    #[must_use]
    pub fn new(service: Arc<DiscoveryService>) -> Self {
        Self {
            service,
            sequencer: SearchSequencer::new(),
        }
    }

    /// The wrapped service
    #[must_use]
    pub fn service(&self) -> &DiscoveryService {
        &self.service
    }

    /// Run a search, reporting it as superseded if a newer one started meanwhile
    pub async fn search(&self, request: SearchRequest) -> SessionOutcome {
        let ticket = self.sequencer.next_ticket();
        let result = self.service.discover(request).await;

        if self.sequencer.is_current(ticket) {
            SessionOutcome::Completed { ticket, result }
        } else {
            debug!(ticket = ticket.sequence(), "Discarding superseded search result");
            SessionOutcome::Superseded { ticket }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use domain::entities::Station;
    use domain::value_objects::Coordinate;

    use super::*;
    use crate::ports::{GeocodeError, GeocodeResult, GeocoderPort, StationDataError, StationRepositoryPort};

    /// Resolves everything; addresses starting with "slow" take longer
    struct SlowGeocoder;

    #[async_trait]
    impl GeocoderPort for SlowGeocoder {
        async fn resolve(&self, address: &str) -> Result<GeocodeResult, GeocodeError> {
            if address.starts_with("slow") {
                tokio::time::sleep(Duration::from_millis(50)).await;
            }
            Ok(GeocodeResult {
                coordinate: Coordinate::new_unchecked(10.0, 10.0),
                formatted_address: address.to_string(),
            })
        }
    }

    struct NoStations;

    #[async_trait]
    impl StationRepositoryPort for NoStations {
        async fn find_within_radius(
            &self,
            _center: Coordinate,
            _radius_meters: f64,
        ) -> Result<Vec<Station>, StationDataError> {
            Ok(Vec::new())
        }

        async fn all_stations(&self) -> Result<Vec<Station>, StationDataError> {
            Ok(Vec::new())
        }
    }

    fn session() -> DiscoverySession {
        let service = DiscoveryService::new(Arc::new(SlowGeocoder), Arc::new(NoStations));
        DiscoverySession::new(Arc::new(service))
    }

    #[test]
    fn tickets_increase() {
        let sequencer = SearchSequencer::new();
        let first = sequencer.next_ticket();
        let second = sequencer.next_ticket();
        assert_eq!(first.sequence(), 1);
        assert!(second > first);
        assert!(!sequencer.is_current(first));
        assert!(sequencer.is_current(second));
    }

    #[tokio::test]
    async fn single_search_completes() {
        let session = session();
        let outcome = session.search(SearchRequest::new("a", "b", 100.0)).await;
        match outcome {
            SessionOutcome::Completed { ticket, result } => {
                assert_eq!(ticket.sequence(), 1);
                assert!(result.is_ok());
            },
            SessionOutcome::Superseded { .. } => unreachable!("only search must complete"),
        }
    }

    #[tokio::test]
    async fn older_search_finishing_late_is_superseded() {
        let session = session();

        let (older, newer) = tokio::join!(
            session.search(SearchRequest::new("slow a", "slow b", 100.0)),
            async {
                tokio::time::sleep(Duration::from_millis(10)).await;
                session.search(SearchRequest::new("fast a", "fast b", 100.0)).await
            },
        );

        assert!(matches!(older, SessionOutcome::Superseded { .. }));
        assert!(matches!(newer, SessionOutcome::Completed { .. }));
    }

    #[tokio::test]
    async fn invalid_request_still_completes_with_error() {
        let session = session();
        let outcome = session.search(SearchRequest::new("", "b", 100.0)).await;
        match outcome {
            SessionOutcome::Completed { result, .. } => {
                assert!(matches!(result, Err(DiscoveryError::InvalidInput(_))));
            },
            SessionOutcome::Superseded { .. } => unreachable!("only search must complete"),
        }
    }
}
