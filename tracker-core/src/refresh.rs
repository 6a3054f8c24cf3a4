use chrono::Utc;
use futures::future::join_all;
use std::sync::Arc;
use tokio::sync::watch;

use crate::{client::WeatherSource, error::WeatherError, location::TrackedLocation};

/// Pulls current weather into tracked locations.
///
/// Each location is written only after its own fetch succeeds, so a failed
/// or abandoned refresh leaves the previous reading in place.
#[derive(Debug)]
pub struct RefreshOrchestrator {
    source: Arc<dyn WeatherSource>,
    /// Number of `refresh_all` batches in flight.
    in_flight: watch::Sender<usize>,
}

/// Observes whether any refresh batch is running.
#[derive(Debug, Clone)]
pub struct RefreshWatch(watch::Receiver<usize>);

impl RefreshWatch {
    pub fn is_refreshing(&self) -> bool {
        *self.0.borrow() > 0
    }

    /// Waits for the batch count to change. Errors once the orchestrator is dropped.
    pub async fn changed(&mut self) -> Result<(), watch::error::RecvError> {
        self.0.changed().await
    }
}

impl RefreshOrchestrator {
    pub fn new(source: Arc<dyn WeatherSource>) -> Self {
        let (in_flight, _) = watch::channel(0);
        Self { source, in_flight }
    }

    /// True while at least one `refresh_all` batch is in flight.
    pub fn is_refreshing(&self) -> bool {
        *self.in_flight.borrow() > 0
    }

    pub fn subscribe(&self) -> RefreshWatch {
        RefreshWatch(self.in_flight.subscribe())
    }

    /// Fetches weather for one location and replaces its reading.
    pub async fn refresh_one(&self, location: &mut TrackedLocation) -> Result<(), WeatherError> {
        match self.source.fetch_weather_at(location.latitude(), location.longitude()).await {
            Ok(observation) => {
                location.apply_observation(&observation, Utc::now());
                tracing::debug!(
                    "Refreshed {}: {:.1}°C, code {}",
                    location.city_name(),
                    observation.temperature_c,
                    observation.weather_code
                );
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Failed to refresh {}: {}", location.city_name(), e);
                Err(e)
            }
        }
    }

    /// Refreshes every location concurrently and waits for all of them.
    ///
    /// Individual failures are logged and skipped; they never stop the rest of the batch.
    pub async fn refresh_all(&self, locations: &mut [TrackedLocation]) {
        if locations.is_empty() {
            return;
        }

        let _guard = BatchGuard::start(&self.in_flight);

        let total = locations.len();
        let results = join_all(locations.iter_mut().map(|loc| self.refresh_one(loc))).await;
        let failed = results.iter().filter(|r| r.is_err()).count();

        tracing::info!("Refreshed {} of {} locations", total - failed, total);
    }
}

/// Counts one batch as in flight until dropped, including on cancellation.
struct BatchGuard<'a>(&'a watch::Sender<usize>);

impl<'a> BatchGuard<'a> {
    fn start(in_flight: &'a watch::Sender<usize>) -> Self {
        in_flight.send_modify(|n| *n += 1);
        Self(in_flight)
    }
}

impl Drop for BatchGuard<'_> {
    fn drop(&mut self) {
        self.0.send_modify(|n| *n -= 1);
    }
}
