use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Display text used when the backend leaves an optional field out.
pub const NOT_AVAILABLE: &str = "N/A";

const ICON_URL_BASE: &str = "https://openweathermap.org/img/wn";

/// Weather snapshot for one city, exactly as the backend formatted it.
///
/// Values are display strings with units already applied. A record is never
/// patched after it arrives; the dashboard replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherRecord {
    pub city: String,
    pub temperature: String,
    pub description: String,
    pub condition: String,
    pub humidity: String,
    pub wind_speed: String,
    pub icon_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feels_like: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
}

impl WeatherRecord {
    pub fn feels_like_or_fallback(&self) -> &str {
        self.feels_like.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    pub fn visibility_or_fallback(&self) -> &str {
        self.visibility.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    /// Image URL for the record's icon code.
    pub fn icon_url(&self) -> String {
        format!("{ICON_URL_BASE}/{}@2x.png", self.icon_code)
    }

    pub fn condition_kind(&self) -> ConditionKind {
        ConditionKind::from_condition(&self.condition)
    }
}

/// A validated latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ValidationError> {
        // NaN fails both range checks.
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(ValidationError::LatitudeOutOfRange(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(ValidationError::LongitudeOutOfRange(longitude));
        }

        Ok(Self { latitude, longitude })
    }

    /// Re-check ranges on values that did not come through [`Coordinates::new`],
    /// e.g. ones deserialized from a config file.
    pub fn validate(self) -> Result<Self, ValidationError> {
        Self::new(self.latitude, self.longitude)
    }
}

/// Body of `POST /weather/city`.
#[derive(Debug, Clone, Serialize)]
pub struct CityQuery<'a> {
    pub city: &'a str,
}

/// Body of `DELETE /weather/{city}` on success.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteConfirmation {
    #[serde(default)]
    pub message: String,
}

/// Coarse weather category derived from a record's `condition` string.
///
/// Condition names follow the OpenWeatherMap "main" groups; atmosphere
/// phenomena (mist, haze, fog, ...) collapse into one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionKind {
    Clear,
    Clouds,
    Rain,
    Drizzle,
    Thunderstorm,
    Snow,
    Atmosphere,
    Unknown,
}

impl ConditionKind {
    pub fn from_condition(condition: &str) -> Self {
        match condition.trim().to_lowercase().as_str() {
            "clear" => Self::Clear,
            "clouds" | "cloudy" => Self::Clouds,
            "rain" => Self::Rain,
            "drizzle" => Self::Drizzle,
            "thunderstorm" => Self::Thunderstorm,
            "snow" => Self::Snow,
            "mist" | "smoke" | "haze" | "dust" | "fog" | "sand" | "ash" | "squall"
            | "tornado" => Self::Atmosphere,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::Clouds => "clouds",
            Self::Rain => "rain",
            Self::Drizzle => "drizzle",
            Self::Thunderstorm => "thunderstorm",
            Self::Snow => "snow",
            Self::Atmosphere => "atmosphere",
            Self::Unknown => "unknown",
        }
    }
}
