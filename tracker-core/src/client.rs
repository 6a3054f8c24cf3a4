use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

use crate::{
    Config,
    error::WeatherError,
    model::{CurrentObservation, GeocodeResult},
};

pub mod open_meteo;

pub use open_meteo::OpenMeteoClient;

pub const DEFAULT_SEARCH_LIMIT: usize = 5;

/// Remote lookups for places and their current weather.
///
/// Implementations hold no mutable state and can be shared across tasks.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    /// Geocodes a free-text city name. Zero matches is an empty vec, not an error.
    async fn search_cities(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<GeocodeResult>, WeatherError>;

    async fn fetch_weather_at(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<CurrentObservation, WeatherError>;

    /// Geocodes `city` and then fetches weather for the best match.
    ///
    /// The forecast request is only issued once geocoding has produced a result.
    async fn fetch_weather_for_city(
        &self,
        city: &str,
    ) -> Result<(GeocodeResult, CurrentObservation), WeatherError> {
        let place = self
            .search_cities(city, 1)
            .await?
            .into_iter()
            .next()
            .ok_or(WeatherError::NoResults)?;

        let observation = self.fetch_weather_at(place.latitude, place.longitude).await?;
        Ok((place, observation))
    }
}

/// Construct the weather source described by `config`.
pub fn source_from_config(config: &Config) -> anyhow::Result<Arc<dyn WeatherSource>> {
    let client = OpenMeteoClient::from_config(config)?;
    Ok(Arc::new(client))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Default)]
    struct ScriptedSource {
        places: Vec<GeocodeResult>,
        search_limits: std::sync::Mutex<Vec<usize>>,
        forecast_calls: AtomicUsize,
    }

    #[async_trait]
    impl WeatherSource for ScriptedSource {
        async fn search_cities(
            &self,
            _query: &str,
            limit: usize,
        ) -> Result<Vec<GeocodeResult>, WeatherError> {
            self.search_limits.lock().unwrap().push(limit);
            Ok(self.places.iter().take(limit).cloned().collect())
        }

        async fn fetch_weather_at(
            &self,
            latitude: f64,
            _longitude: f64,
        ) -> Result<CurrentObservation, WeatherError> {
            self.forecast_calls.fetch_add(1, Ordering::SeqCst);
            Ok(CurrentObservation {
                temperature_c: latitude,
                wind_speed_kmh: 0.0,
                weather_code: 0,
                observed_at: "2026-01-15T12:00".into(),
                is_daytime: true,
            })
        }
    }

    fn place(name: &str, latitude: f64) -> GeocodeResult {
        GeocodeResult {
            name: name.into(),
            latitude,
            longitude: 0.0,
            country: None,
            admin_region: None,
        }
    }

    #[tokio::test]
    async fn fetch_for_city_without_matches_skips_forecast() {
        let source = ScriptedSource::default();

        let err = source.fetch_weather_for_city("Nowhere123").await.unwrap_err();

        assert!(matches!(err, WeatherError::NoResults));
        assert_eq!(source.forecast_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn fetch_for_city_uses_first_match_only() {
        let source = ScriptedSource {
            places: vec![place("Springfield", 39.8), place("Springfield", 42.1)],
            ..Default::default()
        };

        let (found, observation) =
            source.fetch_weather_for_city("Springfield").await.expect("lookup succeeds");

        assert_eq!(found.latitude, 39.8);
        assert_eq!(observation.temperature_c, 39.8);
        assert_eq!(*source.search_limits.lock().unwrap(), vec![1]);
        assert_eq!(source.forecast_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn source_from_default_config_builds() {
        assert!(source_from_config(&Config::default()).is_ok());
    }
}
