use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{error, instrument, warn};

use crate::{
    config::DEFAULT_API_BASE_URL,
    error::ClientError,
    model::{CityQuery, Coordinates, DeleteConfirmation, WeatherRecord},
};

use super::{WeatherBackend, require_city};

const UNREACHABLE_MESSAGE: &str = "Unable to reach the weather service. Please try again.";
const INVALID_RESPONSE_MESSAGE: &str = "The weather service sent an unexpected response.";

/// Client for the dashboard's weather service.
///
/// Routes:
/// - `POST /weather/city` with `{city}`
/// - `POST /weather/location` with `{latitude, longitude}`
/// - `GET /weather`
/// - `DELETE /weather/{city}`
#[derive(Debug, Clone)]
pub struct ServiceBackend {
    base_url: String,
    http: Client,
}

impl ServiceBackend {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Default for ServiceBackend {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

/// Turn a send failure into the user-facing error, keeping the raw cause in the log.
fn transport_error(operation: &str, err: reqwest::Error) -> ClientError {
    error!(operation, error = %err, "weather service request failed");
    ClientError::request_failed(UNREACHABLE_MESSAGE)
}

/// Read a success body, or build the error from a failure body.
async fn read_body(operation: &str, response: Response) -> Result<String, ClientError> {
    let status = response.status();
    let body = response.text().await.map_err(|e| transport_error(operation, e))?;

    if !status.is_success() {
        let err = ClientError::from_error_body(status, &body);
        warn!(operation, %status, body = %truncate_body(&body), "weather service returned an error");
        return Err(err);
    }

    Ok(body)
}

/// Decode a success body, or build the error from a failure body.
async fn read_response<T: DeserializeOwned>(
    operation: &str,
    response: Response,
) -> Result<T, ClientError> {
    let body = read_body(operation, response).await?;

    serde_json::from_str(&body).map_err(|e| {
        error!(operation, error = %e, body = %truncate_body(&body), "could not decode weather service response");
        ClientError::request_failed(INVALID_RESPONSE_MESSAGE)
    })
}

#[async_trait]
impl WeatherBackend for ServiceBackend {
    #[instrument(skip(self), level = "info")]
    async fn fetch_by_city(&self, city: &str) -> Result<WeatherRecord, ClientError> {
        let city = require_city(city)?;

        let response = self
            .http
            .post(self.url("/weather/city"))
            .json(&CityQuery { city })
            .send()
            .await
            .map_err(|e| transport_error("fetch_by_city", e))?;

        read_response("fetch_by_city", response).await
    }

    #[instrument(skip(self), level = "info")]
    async fn fetch_by_location(
        &self,
        position: Coordinates,
    ) -> Result<WeatherRecord, ClientError> {
        let position = position.validate()?;

        let response = self
            .http
            .post(self.url("/weather/location"))
            .json(&position)
            .send()
            .await
            .map_err(|e| transport_error("fetch_by_location", e))?;

        read_response("fetch_by_location", response).await
    }

    #[instrument(skip(self), level = "info")]
    async fn list_saved(&self) -> Result<Vec<WeatherRecord>, ClientError> {
        let response = self
            .http
            .get(self.url("/weather"))
            .send()
            .await
            .map_err(|e| transport_error("list_saved", e))?;

        read_response("list_saved", response).await
    }

    #[instrument(skip(self), level = "info")]
    async fn delete_by_city(&self, city: &str) -> Result<DeleteConfirmation, ClientError> {
        // Names come back from the service; send them exactly as received.
        require_city(city)?;
        let path = format!("/weather/{}", urlencoding::encode(city));

        let response = self
            .http
            .delete(self.url(&path))
            .send()
            .await
            .map_err(|e| transport_error("delete_by_city", e))?;

        // A 2xx means the city is gone; the body is informational only.
        let body = read_body("delete_by_city", response).await?;
        Ok(serde_json::from_str(&body).unwrap_or_else(|e| {
            warn!(error = %e, body = %truncate_body(&body), "unexpected delete confirmation");
            DeleteConfirmation::default()
        }))
    }
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let backend = ServiceBackend::new("http://localhost:8000/");
        assert_eq!(backend.url("/weather"), "http://localhost:8000/weather");
    }

    #[test]
    fn default_points_at_localhost() {
        assert_eq!(ServiceBackend::default().base_url(), "http://localhost:8000");
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let long = "°".repeat(250);
        let out = truncate_body(&long);
        assert!(out.ends_with("..."));
        assert_eq!(out.chars().count(), 203);
        assert_eq!(truncate_body("short"), "short");
    }

    #[tokio::test]
    async fn blank_city_never_sends() {
        // Port 1 is never listening; a request would fail with the transport message.
        let backend = ServiceBackend::new("http://127.0.0.1:1");
        let err = backend.fetch_by_city("").await.unwrap_err();
        assert_eq!(err.message(), "Please enter a city name.");

        let err = backend.delete_by_city("  ").await.unwrap_err();
        assert_eq!(err.message(), "Please enter a city name.");
    }

    #[tokio::test]
    async fn out_of_range_position_never_sends() {
        let backend = ServiceBackend::new("http://127.0.0.1:1");
        let position = Coordinates {
            latitude: 120.0,
            longitude: 0.0,
        };
        let err = backend.fetch_by_location(position).await.unwrap_err();
        assert!(err.message().starts_with("Latitude 120"));
    }
}
