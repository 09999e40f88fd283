//! Error taxonomy for the dashboard.
//!
//! Every variant renders to a single line that is safe to show to the user.
//! Raw transport and decode failures never reach these messages; they are
//! logged at the point where they happen.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Failure of one of the weather client operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("{message}")]
    RequestFailed { message: String },
}

impl ClientError {
    pub fn request_failed(message: impl Into<String>) -> Self {
        Self::RequestFailed { message: message.into() }
    }

    /// Generic message for a non-success status without a usable error body.
    pub fn from_status(status: StatusCode) -> Self {
        Self::request_failed(format!("HTTP error: status {}", status.as_u16()))
    }

    /// Build the error for a non-success response.
    ///
    /// The backend's `detail` field is used verbatim when present. Anything
    /// else (no body, non-JSON body, empty or null `detail`) falls back to the
    /// generic status message.
    pub fn from_error_body(status: StatusCode, body: &str) -> Self {
        match extract_detail(body) {
            Some(detail) => Self::request_failed(detail),
            None => Self::from_status(status),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::RequestFailed { message } => message,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

fn extract_detail(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail? {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) if s.is_empty() => None,
        serde_json::Value::String(s) => Some(s),
        // Validation failures arrive as structured arrays; show them as-is.
        other => Some(other.to_string()),
    }
}

/// Outcome codes of a position request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeolocationError {
    #[error("Location access denied.")]
    PermissionDenied,

    #[error("Location information is unavailable.")]
    PositionUnavailable,

    #[error("The request to get your location timed out.")]
    Timeout,

    #[error("An unknown error occurred while getting your location.")]
    Unknown,
}

/// Input rejected before any request is made.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ValidationError {
    #[error("Please enter a city name.")]
    EmptyCity,

    #[error("Latitude {0} is outside the range -90 to 90.")]
    LatitudeOutOfRange(f64),

    #[error("Longitude {0} is outside the range -180 to 180.")]
    LongitudeOutOfRange(f64),
}

/// Anything the dashboard can surface as its error line.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Geolocation(#[from] GeolocationError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl DashboardError {
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

impl From<ValidationError> for ClientError {
    fn from(err: ValidationError) -> Self {
        Self::request_failed(err.to_string())
    }
}
