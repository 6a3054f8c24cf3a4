use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::{error::RegistryError, location::TrackedLocation};

/// Backing storage for the registry.
pub trait LocationStore {
    fn load(&self) -> Result<Vec<TrackedLocation>, RegistryError>;
    fn save(&mut self, locations: &[TrackedLocation]) -> Result<(), RegistryError>;
}

/// Keeps locations in memory only.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    locations: Vec<TrackedLocation>,
}

impl MemoryStore {
    pub fn with_locations(locations: Vec<TrackedLocation>) -> Self {
        Self { locations }
    }

    /// What the last `save` wrote.
    pub fn saved(&self) -> &[TrackedLocation] {
        &self.locations
    }
}

impl LocationStore for MemoryStore {
    fn load(&self) -> Result<Vec<TrackedLocation>, RegistryError> {
        Ok(self.locations.clone())
    }

    fn save(&mut self, locations: &[TrackedLocation]) -> Result<(), RegistryError> {
        self.locations = locations.to_vec();
        Ok(())
    }
}

/// Stores locations as a pretty-printed JSON array.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> RegistryError {
        RegistryError::Io { path: self.path.clone(), source }
    }

    fn corrupt(&self, source: serde_json::Error) -> RegistryError {
        RegistryError::Corrupt { path: self.path.clone(), source }
    }
}

impl LocationStore for JsonFileStore {
    /// A missing file is an empty registry.
    fn load(&self) -> Result<Vec<TrackedLocation>, RegistryError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.io_error(e)),
        };

        serde_json::from_str(&contents).map_err(|e| self.corrupt(e))
    }

    fn save(&mut self, locations: &[TrackedLocation]) -> Result<(), RegistryError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let json = serde_json::to_string_pretty(locations).map_err(|e| self.corrupt(e))?;
        fs::write(&self.path, json).map_err(|e| self.io_error(e))?;

        tracing::debug!("Saved {} locations to {}", locations.len(), self.path.display());
        Ok(())
    }
}
