use chrono::Local;
use tracker_core::{CurrentObservation, GeocodeResult, TrackedLocation, describe};

/// Multi-line card for one tracked location.
pub fn location_card(position: usize, location: &TrackedLocation) -> String {
    let mut lines = vec![format!("{position}. {}", location.city_name())];

    match location.reading() {
        Some(reading) => {
            let (condition, icon) = describe(reading.weather_code, true);
            lines.push(format!(
                "   {:.1}°C  {condition} [{icon}]  wind {:.1} km/h",
                reading.temperature_c, reading.wind_speed_kmh
            ));
        }
        None => lines.push("   No weather data yet".to_string()),
    }

    if let Some(baseline) = location.baseline_temp_c() {
        let mut comparison = format!("   Baseline {baseline:.1}°C");
        if let (Some(raw), Some(delta)) = (location.temp_delta(), location.formatted_delta()) {
            comparison.push_str(&format!("  Δ {} {delta}", direction_marker(raw)));
        }
        if let Some(percent) = location.formatted_percent_change() {
            comparison.push_str(&format!(" ({percent})"));
        }
        lines.push(comparison);
    }

    if let Some(note) = location.note() {
        lines.push(format!("   Note: {note}"));
    }

    if let Some(updated) = location.last_updated() {
        lines.push(format!(
            "   Updated {}",
            updated.with_timezone(&Local).format("%Y-%m-%d %H:%M")
        ));
    }

    lines.join("\n")
}

/// Arrow for warmer or colder than the baseline, `=` when unchanged.
fn direction_marker(delta: f64) -> &'static str {
    if delta > 0.0 {
        "↑"
    } else if delta < 0.0 {
        "↓"
    } else {
        "="
    }
}

pub fn search_result_line(position: usize, result: &GeocodeResult) -> String {
    format!(
        "{position}. {}  ({:.4}, {:.4})",
        result.display_name(),
        result.latitude,
        result.longitude
    )
}

pub fn observation_summary(place: &GeocodeResult, observation: &CurrentObservation) -> String {
    let (condition, icon) = describe(observation.weather_code, observation.is_daytime);
    format!(
        "{}\n   {:.1}°C  {condition} [{icon}]\n   Wind: {:.1} km/h\n   Last updated: {}",
        place.display_name(),
        observation.temperature_c,
        observation.wind_speed_kmh,
        observation.observed_at
    )
}
