use serde::{Deserialize, Serialize};

/// A place returned by the geocoding lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeResult {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub country: Option<String>,
    /// State or province.
    #[serde(default, rename = "admin1")]
    pub admin_region: Option<String>,
}

impl GeocodeResult {
    /// Identity within a result list, e.g. `"48.8566,2.3522"`.
    pub fn id(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }

    /// Name followed by region and country when known,
    /// e.g. "San Francisco, California, United States".
    pub fn display_name(&self) -> String {
        let mut parts = vec![self.name.as_str()];
        parts.extend(self.admin_region.as_deref());
        parts.extend(self.country.as_deref());
        parts.join(", ")
    }
}

/// Current conditions at a pair of coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentObservation {
    pub temperature_c: f64,
    pub wind_speed_kmh: f64,
    pub weather_code: i32,
    /// Local time as reported by the forecast service, e.g. `2026-01-15T14:00`.
    pub observed_at: String,
    pub is_daytime: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paris() -> GeocodeResult {
        GeocodeResult {
            name: "Paris".into(),
            latitude: 48.8566,
            longitude: 2.3522,
            country: Some("France".into()),
            admin_region: None,
        }
    }

    #[test]
    fn display_name_skips_missing_parts() {
        assert_eq!(paris().display_name(), "Paris, France");

        let bare = GeocodeResult { country: None, ..paris() };
        assert_eq!(bare.display_name(), "Paris");
    }

    #[test]
    fn display_name_orders_region_before_country() {
        let sf = GeocodeResult {
            name: "San Francisco".into(),
            latitude: 37.7749,
            longitude: -122.4194,
            country: Some("United States".into()),
            admin_region: Some("California".into()),
        };
        assert_eq!(sf.display_name(), "San Francisco, California, United States");
    }

    #[test]
    fn id_is_coordinate_pair() {
        assert_eq!(paris().id(), "48.8566,2.3522");
    }

    #[test]
    fn decodes_admin1_as_region() {
        let json = r#"{"name":"Austin","latitude":30.27,"longitude":-97.74,"admin1":"Texas"}"#;
        let parsed: GeocodeResult = serde_json::from_str(json).expect("valid geocode json");

        assert_eq!(parsed.admin_region.as_deref(), Some("Texas"));
        assert_eq!(parsed.country, None);
    }
}
