use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{baseline, model::CurrentObservation};

/// Stable identity of a tracked location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationId(Uuid);

impl LocationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for LocationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for LocationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The latest successfully fetched conditions for a location.
///
/// Stored as a single value so the fields can only change together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub temperature_c: f64,
    pub wind_speed_kmh: f64,
    pub weather_code: i32,
    pub updated_at: DateTime<Utc>,
}

impl Reading {
    pub fn from_observation(observation: &CurrentObservation, updated_at: DateTime<Utc>) -> Self {
        Self {
            temperature_c: observation.temperature_c,
            wind_speed_kmh: observation.wind_speed_kmh,
            weather_code: observation.weather_code,
            updated_at,
        }
    }
}

/// A user-chosen place whose weather is kept in sync.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedLocation {
    id: LocationId,
    city_name: String,
    latitude: f64,
    longitude: f64,
    note: Option<String>,
    baseline_temp_c: Option<f64>,
    reading: Option<Reading>,
    created_at: DateTime<Utc>,
}

impl TrackedLocation {
    pub fn new(city_name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            id: LocationId::new(),
            city_name: city_name.into(),
            latitude,
            longitude,
            note: None,
            baseline_temp_c: None,
            reading: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_note(mut self, note: Option<&str>) -> Self {
        self.update_note(note);
        self
    }

    pub fn with_baseline(mut self, baseline_temp_c: Option<f64>) -> Self {
        self.update_baseline(baseline_temp_c);
        self
    }

    #[cfg(test)]
    pub(crate) fn created(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn id(&self) -> LocationId {
        self.id
    }

    pub fn city_name(&self) -> &str {
        &self.city_name
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    pub fn baseline_temp_c(&self) -> Option<f64> {
        self.baseline_temp_c
    }

    pub fn reading(&self) -> Option<&Reading> {
        self.reading.as_ref()
    }

    pub fn current_temp_c(&self) -> Option<f64> {
        self.reading.as_ref().map(|r| r.temperature_c)
    }

    pub fn wind_speed_kmh(&self) -> Option<f64> {
        self.reading.as_ref().map(|r| r.wind_speed_kmh)
    }

    pub fn weather_code(&self) -> Option<i32> {
        self.reading.as_ref().map(|r| r.weather_code)
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.reading.as_ref().map(|r| r.updated_at)
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn temp_delta(&self) -> Option<f64> {
        baseline::delta(self.current_temp_c(), self.baseline_temp_c)
    }

    pub fn temp_percent_change(&self) -> Option<f64> {
        baseline::percent(self.current_temp_c(), self.baseline_temp_c)
    }

    pub fn formatted_delta(&self) -> Option<String> {
        baseline::format_delta(self.temp_delta())
    }

    pub fn formatted_percent_change(&self) -> Option<String> {
        baseline::format_percent(self.temp_percent_change())
    }

    /// Replaces the whole reading with a fresh observation.
    pub fn apply_observation(&mut self, observation: &CurrentObservation, at: DateTime<Utc>) {
        self.reading = Some(Reading::from_observation(observation, at));
    }

    /// Copies the current temperature into the baseline. Does nothing without a reading.
    pub fn set_current_as_baseline(&mut self) {
        if let Some(current) = self.current_temp_c() {
            self.baseline_temp_c = Some(current);
        }
    }

    /// Blank notes are stored as no note at all.
    pub fn update_note(&mut self, note: Option<&str>) {
        self.note = note.map(str::trim).filter(|n| !n.is_empty()).map(str::to_owned);
    }

    pub fn update_baseline(&mut self, baseline_temp_c: Option<f64>) {
        self.baseline_temp_c = baseline_temp_c;
    }
}
