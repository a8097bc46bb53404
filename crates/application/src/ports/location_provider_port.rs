//! Device location port

use async_trait::async_trait;
use domain::value_objects::Coordinate;
#[cfg(test)]
use mockall::automock;

/// Port for the device's last known position
#[cfg_attr(test, automock)]
#[async_trait]
pub trait LocationProviderPort: Send + Sync {
    /// Last known position, `None` when unknown or not permitted
    async fn current_location(&self) -> Option<Coordinate>;
}
