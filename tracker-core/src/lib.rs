//! Core library for the `weather-tracker` CLI.
//!
//! This crate defines:
//! - A weather client for geocoding and current conditions (Open-Meteo)
//! - Tracked locations with baseline temperature comparison
//! - Concurrent refresh of every tracked location
//! - The bounded location registry and its storage
//! - Configuration handling
//!
//! It is used by `tracker-cli`, but can also be reused by other front ends.

pub mod baseline;
pub mod client;
pub mod condition;
pub mod config;
pub mod error;
pub mod location;
pub mod model;
pub mod refresh;
pub mod registry;

pub use client::{DEFAULT_SEARCH_LIMIT, OpenMeteoClient, WeatherSource, source_from_config};
pub use condition::{WeatherCondition, describe};
pub use config::Config;
pub use error::{RegistryError, WeatherError};
pub use location::{LocationId, Reading, TrackedLocation};
pub use model::{CurrentObservation, GeocodeResult};
pub use refresh::{RefreshOrchestrator, RefreshWatch};
pub use registry::{JsonFileStore, LocationRegistry, LocationStore, MAX_LOCATIONS, MemoryStore};
