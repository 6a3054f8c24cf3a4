use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

pub const DEFAULT_GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// request_timeout_secs = 5
/// search_limit = 8
/// data_file = "/home/me/weather/locations.json"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub geocoding_url: String,
    pub forecast_url: String,
    pub request_timeout_secs: u64,
    /// Number of matches requested from the geocoding service.
    pub search_limit: usize,
    /// Overrides the default location store path.
    pub data_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            geocoding_url: DEFAULT_GEOCODING_URL.to_string(),
            forecast_url: DEFAULT_FORECAST_URL.to_string(),
            request_timeout_secs: 10,
            search_limit: crate::client::DEFAULT_SEARCH_LIMIT,
            data_file: None,
        }
    }
}

impl Config {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Load config from `path`, or return defaults if the file is missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")
    }

    /// Save config to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        fs::write(path, self.to_toml()?)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(project_dirs()?.config_dir().join("config.toml"))
    }

    /// Where tracked locations are persisted.
    pub fn data_file_path(&self) -> Result<PathBuf> {
        match &self.data_file {
            Some(path) => Ok(path.clone()),
            None => Ok(project_dirs()?.data_dir().join("locations.json")),
        }
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("dev", "weather-tracker", "weather-tracker")
        .ok_or_else(|| anyhow!("Could not determine platform config directory"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_open_meteo() {
        let cfg = Config::default();

        assert_eq!(cfg.geocoding_url, DEFAULT_GEOCODING_URL);
        assert_eq!(cfg.forecast_url, DEFAULT_FORECAST_URL);
        assert_eq!(cfg.search_limit, 5);
        assert_eq!(cfg.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn partial_toml_keeps_remaining_defaults() {
        let cfg = Config::from_toml("request_timeout_secs = 3\n").expect("valid toml");

        assert_eq!(cfg.request_timeout_secs, 3);
        assert_eq!(cfg.forecast_url, DEFAULT_FORECAST_URL);
        assert_eq!(cfg.data_file, None);
    }

    #[test]
    fn data_file_override_wins() {
        let cfg = Config { data_file: Some(PathBuf::from("/tmp/locs.json")), ..Config::default() };
        let path = cfg.data_file_path().expect("explicit path");

        assert_eq!(path, PathBuf::from("/tmp/locs.json"));
    }

    #[test]
    fn toml_roundtrip_preserves_values() {
        let cfg = Config { search_limit: 8, ..Config::default() };
        let text = cfg.to_toml().expect("serialize");

        assert_eq!(Config::from_toml(&text).expect("parse"), cfg);
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(Config::from_toml("search_limit = \"many\"").is_err());
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = Config::load_from(&dir.path().join("config.toml")).expect("defaults");

        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn save_creates_directories_and_loads_back() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.toml");
        let cfg = Config {
            request_timeout_secs: 4,
            data_file: Some(dir.path().join("locs.json")),
            ..Config::default()
        };

        cfg.save_to(&path).expect("save");

        assert_eq!(Config::load_from(&path).expect("load"), cfg);
    }

    #[test]
    fn unreadable_config_names_the_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "search_limit = [").expect("write");

        let err = Config::load_from(&path).unwrap_err();

        assert!(format!("{err:#}").contains("Failed to parse config file"));
    }
}
