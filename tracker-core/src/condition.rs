//! WMO weather code classification.
//!
//! See: https://open-meteo.com/en/docs#weathervariables

/// Condition buckets for the WMO codes Open-Meteo reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherCondition {
    Clear,
    PartlyCloudy,
    Fog,
    Drizzle,
    Rain,
    FreezingRain,
    Snow,
    SnowGrains,
    RainShowers,
    SnowShowers,
    Thunderstorm,
    ThunderstormWithHail,
    Unknown,
}

impl WeatherCondition {
    pub fn from_wmo_code(code: i32) -> Self {
        match code {
            0 => Self::Clear,
            1..=3 => Self::PartlyCloudy,
            45 | 48 => Self::Fog,
            51 | 53 | 55 => Self::Drizzle,
            61 | 63 | 65 => Self::Rain,
            66 | 67 => Self::FreezingRain,
            71 | 73 | 75 => Self::Snow,
            77 => Self::SnowGrains,
            80..=82 => Self::RainShowers,
            85 | 86 => Self::SnowShowers,
            95 => Self::Thunderstorm,
            96 | 99 => Self::ThunderstormWithHail,
            _ => Self::Unknown,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Clear => "Clear sky",
            Self::PartlyCloudy => "Partly cloudy",
            Self::Fog => "Foggy",
            Self::Drizzle => "Drizzle",
            Self::Rain => "Rain",
            Self::FreezingRain => "Freezing rain",
            Self::Snow => "Snow",
            Self::SnowGrains => "Snow grains",
            Self::RainShowers => "Rain showers",
            Self::SnowShowers => "Snow showers",
            Self::Thunderstorm => "Thunderstorm",
            Self::ThunderstormWithHail => "Thunderstorm with hail",
            Self::Unknown => "Unknown",
        }
    }

    /// Icon identifier; only clear and partly cloudy have night variants.
    pub fn icon_name(&self, is_day: bool) -> &'static str {
        match self {
            Self::Clear if is_day => "sun",
            Self::Clear => "moon",
            Self::PartlyCloudy if is_day => "cloud_sun",
            Self::PartlyCloudy => "cloud_moon",
            Self::Fog => "cloud_fog",
            Self::Drizzle | Self::Rain => "cloud_rain",
            Self::FreezingRain => "cloud_sleet",
            Self::Snow | Self::SnowGrains | Self::SnowShowers => "cloud_snow",
            Self::RainShowers => "cloud_heavy_rain",
            Self::Thunderstorm | Self::ThunderstormWithHail => "cloud_lightning",
            Self::Unknown => "question",
        }
    }
}

/// `(description, icon)` for a weather code.
pub fn describe(code: i32, is_day: bool) -> (&'static str, &'static str) {
    let condition = WeatherCondition::from_wmo_code(code);
    (condition.description(), condition.icon_name(is_day))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wmo_code_buckets() {
        assert_eq!(WeatherCondition::from_wmo_code(0), WeatherCondition::Clear);
        for code in [1, 2, 3] {
            assert_eq!(WeatherCondition::from_wmo_code(code), WeatherCondition::PartlyCloudy);
        }
        assert_eq!(WeatherCondition::from_wmo_code(48), WeatherCondition::Fog);
        assert_eq!(WeatherCondition::from_wmo_code(55), WeatherCondition::Drizzle);
        assert_eq!(WeatherCondition::from_wmo_code(65), WeatherCondition::Rain);
        assert_eq!(WeatherCondition::from_wmo_code(67), WeatherCondition::FreezingRain);
        assert_eq!(WeatherCondition::from_wmo_code(77), WeatherCondition::SnowGrains);
        assert_eq!(WeatherCondition::from_wmo_code(81), WeatherCondition::RainShowers);
        assert_eq!(WeatherCondition::from_wmo_code(86), WeatherCondition::SnowShowers);
        assert_eq!(WeatherCondition::from_wmo_code(95), WeatherCondition::Thunderstorm);
        assert_eq!(WeatherCondition::from_wmo_code(99), WeatherCondition::ThunderstormWithHail);
    }

    #[test]
    fn test_unmapped_codes_are_unknown() {
        for code in [-1, 4, 56, 57, 100, 999] {
            assert_eq!(describe(code, true), ("Unknown", "question"));
        }
    }

    #[test]
    fn test_day_night_only_for_clear_and_partly_cloudy() {
        assert_eq!(describe(0, true), ("Clear sky", "sun"));
        assert_eq!(describe(0, false), ("Clear sky", "moon"));
        assert_eq!(describe(2, false), ("Partly cloudy", "cloud_moon"));
        assert_eq!(describe(61, true).1, describe(61, false).1);
        assert_eq!(describe(95, false), ("Thunderstorm", "cloud_lightning"));
    }
}
