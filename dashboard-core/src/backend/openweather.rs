use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{error, instrument, warn};

use crate::{
    error::ClientError,
    model::{Coordinates, DeleteConfirmation, WeatherRecord},
};

use super::{WeatherBackend, require_city, service::truncate_body};

const CURRENT_WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Calls OpenWeatherMap directly and formats its readings for display.
///
/// There is no server-side history with this backend: the saved list is
/// always empty and deleting is refused.
#[derive(Debug, Clone)]
pub struct OpenWeatherBackend {
    api_key: String,
    endpoint: String,
    http: Client,
}

impl OpenWeatherBackend {
    pub fn new(api_key: String) -> Self {
        Self::with_endpoint(api_key, CURRENT_WEATHER_URL)
    }

    /// Point the backend at another current-weather endpoint.
    pub fn with_endpoint(api_key: String, endpoint: &str) -> Self {
        Self {
            api_key,
            endpoint: endpoint.to_string(),
            http: Client::new(),
        }
    }

    async fn fetch_current(&self, query: &[(&str, String)]) -> Result<WeatherRecord, ClientError> {
        let res = self
            .http
            .get(&self.endpoint)
            .query(query)
            .query(&[("appid", self.api_key.as_str()), ("units", "metric")])
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "failed to send request to OpenWeather");
                ClientError::request_failed("Unable to reach OpenWeather. Please try again.")
            })?;

        let status = res.status();
        let body = res.text().await.map_err(|e| {
            error!(error = %e, "failed to read OpenWeather response body");
            ClientError::request_failed("Unable to reach OpenWeather. Please try again.")
        })?;

        if !status.is_success() {
            warn!(%status, body = %truncate_body(&body), "OpenWeather request failed");
            return Err(status_error(status));
        }

        let parsed: OwCurrentResponse = serde_json::from_str(&body).map_err(|e| {
            error!(error = %e, "failed to parse OpenWeather JSON");
            ClientError::request_failed("OpenWeather sent an unexpected response.")
        })?;

        Ok(parsed.into_record())
    }
}

fn status_error(status: StatusCode) -> ClientError {
    match status {
        StatusCode::NOT_FOUND => {
            ClientError::request_failed("City not found. Please check the spelling.")
        }
        StatusCode::UNAUTHORIZED => ClientError::request_failed(
            "Invalid API key. Please check your OpenWeatherMap API key.",
        ),
        other => ClientError::request_failed(format!(
            "Failed to fetch weather data: {}",
            other.canonical_reason().unwrap_or(other.as_str())
        )),
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: Option<f64>,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    /// Metres.
    visibility: Option<f64>,
}

impl OwCurrentResponse {
    fn into_record(self) -> WeatherRecord {
        let (condition, description, icon_code) = match self.weather.into_iter().next() {
            Some(w) => (w.main, w.description, w.icon),
            None => ("Unknown".to_string(), "Unknown".to_string(), String::new()),
        };

        WeatherRecord {
            city: self.name,
            temperature: format_celsius(self.main.temp),
            description,
            condition,
            humidity: format!("{}%", self.main.humidity),
            wind_speed: format!("{} km/h", (self.wind.speed * 3.6).round() as i64),
            icon_code,
            feels_like: self.main.feels_like.map(format_celsius),
            visibility: self.visibility.map(|m| format!("{:.1} km", m / 1000.0)),
        }
    }
}

fn format_celsius(value: f64) -> String {
    format!("{}°C", value.round() as i64)
}

#[async_trait]
impl WeatherBackend for OpenWeatherBackend {
    #[instrument(skip(self), level = "info")]
    async fn fetch_by_city(&self, city: &str) -> Result<WeatherRecord, ClientError> {
        let city = require_city(city)?;
        self.fetch_current(&[("q", city.to_string())]).await
    }

    #[instrument(skip(self), level = "info")]
    async fn fetch_by_location(
        &self,
        position: Coordinates,
    ) -> Result<WeatherRecord, ClientError> {
        let position = position.validate()?;
        self.fetch_current(&[
            ("lat", position.latitude.to_string()),
            ("lon", position.longitude.to_string()),
        ])
        .await
    }

    async fn list_saved(&self) -> Result<Vec<WeatherRecord>, ClientError> {
        Ok(Vec::new())
    }

    async fn delete_by_city(&self, city: &str) -> Result<DeleteConfirmation, ClientError> {
        require_city(city)?;
        Err(ClientError::request_failed(
            "Saved cities require the dashboard weather service backend.",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> OwCurrentResponse {
        serde_json::from_str(
            r#"{
                "name": "London",
                "main": {"temp": 14.6, "feels_like": 13.2, "humidity": 72},
                "weather": [{"main": "Clouds", "description": "broken clouds", "icon": "04d"}],
                "wind": {"speed": 4.1},
                "visibility": 10000
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn formats_readings_for_display() {
        let record = sample().into_record();

        assert_eq!(record.city, "London");
        assert_eq!(record.temperature, "15°C");
        assert_eq!(record.feels_like.as_deref(), Some("13°C"));
        assert_eq!(record.humidity, "72%");
        assert_eq!(record.wind_speed, "15 km/h");
        assert_eq!(record.visibility.as_deref(), Some("10.0 km"));
        assert_eq!(record.condition, "Clouds");
        assert_eq!(record.icon_code, "04d");
    }

    #[test]
    fn missing_weather_entry_is_unknown() {
        let mut response = sample();
        response.weather.clear();
        response.visibility = None;

        let record = response.into_record();
        assert_eq!(record.condition, "Unknown");
        assert_eq!(record.visibility, None);
    }

    #[test]
    fn status_errors_are_user_readable() {
        assert_eq!(
            status_error(StatusCode::NOT_FOUND).message(),
            "City not found. Please check the spelling."
        );
        assert_eq!(
            status_error(StatusCode::UNAUTHORIZED).message(),
            "Invalid API key. Please check your OpenWeatherMap API key."
        );
        assert_eq!(
            status_error(StatusCode::TOO_MANY_REQUESTS).message(),
            "Failed to fetch weather data: Too Many Requests"
        );
    }

    #[test]
    fn logged_error_body_is_bounded() {
        let body = format!(r#"{{"cod":500,"message":"{}"}}"#, "x".repeat(4_000));
        let logged = truncate_body(&body);
        assert_eq!(logged.chars().count(), 203);
        assert!(logged.starts_with(r#"{"cod":500"#));
    }

    #[tokio::test]
    async fn has_no_saved_cities() {
        let backend = OpenWeatherBackend::new("KEY".into());
        assert!(backend.list_saved().await.unwrap().is_empty());
        assert!(backend.delete_by_city("London").await.is_err());
    }
}
