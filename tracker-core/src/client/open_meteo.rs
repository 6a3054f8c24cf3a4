use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, de::DeserializeOwned};
use std::time::Duration;

use crate::{
    Config,
    error::WeatherError,
    model::{CurrentObservation, GeocodeResult},
};

use super::WeatherSource;

/// Open-Meteo geocoding and forecast client. No API key required.
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    geocoding_url: String,
    forecast_url: String,
    http: Client,
}

impl OpenMeteoClient {
    pub fn new(
        geocoding_url: impl Into<String>,
        forecast_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, WeatherError> {
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            geocoding_url: geocoding_url.into(),
            forecast_url: forecast_url.into(),
            http,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, WeatherError> {
        Self::new(&config.geocoding_url, &config.forecast_url, config.request_timeout())
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        base: &str,
        query: &[(&str, String)],
    ) -> Result<T, WeatherError> {
        let url = Url::parse_with_params(base, query)
            .map_err(|e| WeatherError::InvalidRequest(format!("{base}: {e}")))?;

        tracing::debug!("GET {}", url);

        let res = self.http.get(url).send().await?;
        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            tracing::debug!("{} returned status {}: {}", base, status, truncate_body(&body));
            return Err(WeatherError::BadStatus(status.as_u16()));
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    results: Option<Vec<GeocodeResult>>,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current_weather: OmCurrentWeather,
}

#[derive(Debug, Deserialize)]
struct OmCurrentWeather {
    temperature: f64,
    windspeed: f64,
    weathercode: i32,
    time: String,
    is_day: u8,
}

impl From<OmCurrentWeather> for CurrentObservation {
    fn from(cw: OmCurrentWeather) -> Self {
        Self {
            temperature_c: cw.temperature,
            wind_speed_kmh: cw.windspeed,
            weather_code: cw.weathercode,
            observed_at: cw.time,
            is_daytime: cw.is_day == 1,
        }
    }
}

#[async_trait]
impl WeatherSource for OpenMeteoClient {
    async fn search_cities(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<GeocodeResult>, WeatherError> {
        let parsed: GeocodingResponse = self
            .get_json(
                &self.geocoding_url,
                &[
                    ("name", query.to_string()),
                    ("count", limit.to_string()),
                    ("language", "en".to_string()),
                    ("format", "json".to_string()),
                ],
            )
            .await?;

        Ok(parsed.results.unwrap_or_default())
    }

    async fn fetch_weather_at(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<CurrentObservation, WeatherError> {
        let parsed: ForecastResponse = self
            .get_json(
                &self.forecast_url,
                &[
                    ("latitude", latitude.to_string()),
                    ("longitude", longitude.to_string()),
                    ("current_weather", "true".to_string()),
                    ("timezone", "auto".to_string()),
                ],
            )
            .await?;

        Ok(parsed.current_weather.into())
    }
}

fn truncate_body(body: &str) -> &str {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body;
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}
