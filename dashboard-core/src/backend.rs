use crate::{
    Config,
    backend::{openweather::OpenWeatherBackend, service::ServiceBackend},
    error::ClientError,
    model::{Coordinates, DeleteConfirmation, WeatherRecord},
};
use async_trait::async_trait;
use std::{convert::TryFrom, fmt::Debug};

pub mod openweather;
pub mod service;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// The dashboard's own weather service, which also stores searched cities.
    Service,
    /// OpenWeatherMap called directly; nothing is stored.
    OpenWeather,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Service => "service",
            BackendKind::OpenWeather => "openweather",
        }
    }

    pub const fn all() -> &'static [BackendKind] {
        &[BackendKind::Service, BackendKind::OpenWeather]
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for BackendKind {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "service" => Ok(BackendKind::Service),
            "openweather" => Ok(BackendKind::OpenWeather),
            _ => Err(anyhow::anyhow!(
                "Unknown backend '{value}'. Supported backends: service, openweather."
            )),
        }
    }
}

/// The four weather operations the dashboard relies on.
///
/// Each call is an independent request/response exchange. Failures carry a
/// message meant to be shown to the user as-is.
#[async_trait]
pub trait WeatherBackend: Send + Sync + Debug {
    async fn fetch_by_city(&self, city: &str) -> Result<WeatherRecord, ClientError>;

    async fn fetch_by_location(&self, position: Coordinates)
    -> Result<WeatherRecord, ClientError>;

    async fn list_saved(&self) -> Result<Vec<WeatherRecord>, ClientError>;

    async fn delete_by_city(&self, city: &str) -> Result<DeleteConfirmation, ClientError>;
}

#[async_trait]
impl<T: WeatherBackend + ?Sized> WeatherBackend for Box<T> {
    async fn fetch_by_city(&self, city: &str) -> Result<WeatherRecord, ClientError> {
        (**self).fetch_by_city(city).await
    }

    async fn fetch_by_location(
        &self,
        position: Coordinates,
    ) -> Result<WeatherRecord, ClientError> {
        (**self).fetch_by_location(position).await
    }

    async fn list_saved(&self) -> Result<Vec<WeatherRecord>, ClientError> {
        (**self).list_saved().await
    }

    async fn delete_by_city(&self, city: &str) -> Result<DeleteConfirmation, ClientError> {
        (**self).delete_by_city(city).await
    }
}

#[async_trait]
impl<'a, T: WeatherBackend + ?Sized> WeatherBackend for &'a T {
    async fn fetch_by_city(&self, city: &str) -> Result<WeatherRecord, ClientError> {
        (**self).fetch_by_city(city).await
    }

    async fn fetch_by_location(
        &self,
        position: Coordinates,
    ) -> Result<WeatherRecord, ClientError> {
        (**self).fetch_by_location(position).await
    }

    async fn list_saved(&self) -> Result<Vec<WeatherRecord>, ClientError> {
        (**self).list_saved().await
    }

    async fn delete_by_city(&self, city: &str) -> Result<DeleteConfirmation, ClientError> {
        (**self).delete_by_city(city).await
    }
}

/// Construct the configured backend.
///
/// `base_url_override` replaces the configured service URL (command line or
/// environment).
pub fn backend_from_config(
    config: &Config,
    base_url_override: Option<&str>,
) -> anyhow::Result<Box<dyn WeatherBackend>> {
    let kind = config.backend_kind()?;

    let boxed: Box<dyn WeatherBackend> = match kind {
        BackendKind::Service => {
            let base_url = base_url_override.unwrap_or_else(|| config.api_base_url());
            Box::new(ServiceBackend::new(base_url))
        }
        BackendKind::OpenWeather => {
            let api_key = config.provider_api_key(kind).ok_or_else(|| {
                anyhow::anyhow!(
                    "No API key configured for backend '{kind}'.\n\
                     Hint: run `weather-dashboard configure` and enter your API key."
                )
            })?;
            Box::new(OpenWeatherBackend::new(api_key.to_owned()))
        }
    };

    Ok(boxed)
}

/// Reject blank city names before they reach the network.
pub(crate) fn require_city(city: &str) -> Result<&str, ClientError> {
    let trimmed = city.trim();
    if trimmed.is_empty() {
        return Err(crate::error::ValidationError::EmptyCity.into());
    }
    Ok(trimmed)
}
