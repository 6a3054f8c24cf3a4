use crate::{
    error::RegistryError,
    location::{LocationId, TrackedLocation},
    model::GeocodeResult,
};

pub mod store;

pub use store::{JsonFileStore, LocationStore, MemoryStore};

/// Upper bound on how many locations can be tracked at once.
pub const MAX_LOCATIONS: usize = 4;

/// The bounded, persisted collection of tracked locations.
///
/// Locations are kept ordered by creation time, oldest first.
#[derive(Debug)]
pub struct LocationRegistry<S> {
    store: S,
    locations: Vec<TrackedLocation>,
}

impl<S: LocationStore> LocationRegistry<S> {
    pub fn open(store: S) -> Result<Self, RegistryError> {
        let mut locations = store.load()?;
        locations.sort_by_key(TrackedLocation::created_at);

        Ok(Self { store, locations })
    }

    pub fn count(&self) -> usize {
        self.locations.len()
    }

    pub fn remaining(&self) -> usize {
        MAX_LOCATIONS.saturating_sub(self.count())
    }

    pub fn is_full(&self) -> bool {
        self.remaining() == 0
    }

    pub fn all(&self) -> &[TrackedLocation] {
        &self.locations
    }

    /// Mutable view for in-place updates such as refreshes. Call [`save`](Self::save) afterwards.
    pub fn all_mut(&mut self) -> &mut [TrackedLocation] {
        &mut self.locations
    }

    pub fn get(&self, id: LocationId) -> Option<&TrackedLocation> {
        self.locations.iter().find(|l| l.id() == id)
    }

    pub fn get_mut(&mut self, id: LocationId) -> Option<&mut TrackedLocation> {
        self.locations.iter_mut().find(|l| l.id() == id)
    }

    /// Looks up a location by 1-based position or case-insensitive city name.
    pub fn find(&self, target: &str) -> Option<&TrackedLocation> {
        let target = target.trim();
        if let Ok(position) = target.parse::<usize>() {
            return position.checked_sub(1).and_then(|idx| self.locations.get(idx));
        }
        self.locations.iter().find(|l| l.city_name().eq_ignore_ascii_case(target))
    }

    /// Adds a location, rejecting it once the registry is full.
    pub fn insert(&mut self, location: TrackedLocation) -> Result<LocationId, RegistryError> {
        if self.is_full() {
            return Err(RegistryError::Full { max: MAX_LOCATIONS });
        }

        let id = location.id();
        let city = location.city_name().to_owned();
        let snapshot = self.locations.clone();

        self.locations.push(location);
        self.locations.sort_by_key(TrackedLocation::created_at);

        if let Err(e) = self.store.save(&self.locations) {
            self.locations = snapshot;
            return Err(e);
        }

        tracing::info!("Tracking {} ({} of {})", city, self.count(), MAX_LOCATIONS);
        Ok(id)
    }

    /// Creates a location from a confirmed search result and inserts it.
    pub fn add(
        &mut self,
        result: &GeocodeResult,
        note: Option<&str>,
        baseline_temp_c: Option<f64>,
    ) -> Result<LocationId, RegistryError> {
        let location = TrackedLocation::new(&result.name, result.latitude, result.longitude)
            .with_note(note)
            .with_baseline(baseline_temp_c);

        self.insert(location)
    }

    pub fn delete(&mut self, id: LocationId) -> Result<TrackedLocation, RegistryError> {
        let idx = self
            .locations
            .iter()
            .position(|l| l.id() == id)
            .ok_or(RegistryError::NotFound(id))?;

        let removed = self.locations.remove(idx);
        if let Err(e) = self.store.save(&self.locations) {
            self.locations.insert(idx, removed);
            return Err(e);
        }

        tracing::info!("Stopped tracking {}", removed.city_name());
        Ok(removed)
    }

    /// Persists in-place changes made through [`all_mut`](Self::all_mut) or
    /// [`get_mut`](Self::get_mut).
    pub fn save(&mut self) -> Result<(), RegistryError> {
        self.store.save(&self.locations)
    }
}
