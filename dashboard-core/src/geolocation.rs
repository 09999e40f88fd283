use std::{fmt::Debug, time::Duration};

use async_trait::async_trait;
use tracing::debug;

use crate::{Config, error::GeolocationError, model::Coordinates};

/// How a position should be obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionOptions {
    pub enable_high_accuracy: bool,
    /// Give up after this long.
    pub timeout: Duration,
    /// A cached position this old or younger is acceptable.
    pub maximum_age: Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            enable_high_accuracy: true,
            timeout: Duration::from_secs(10),
            maximum_age: Duration::from_secs(5 * 60),
        }
    }
}

/// Source of the user's current position.
#[async_trait]
pub trait GeolocationProvider: Send + Sync + Debug {
    async fn current_position(
        &self,
        options: &PositionOptions,
    ) -> Result<Coordinates, GeolocationError>;
}

#[async_trait]
impl<T: GeolocationProvider + ?Sized> GeolocationProvider for Box<T> {
    async fn current_position(
        &self,
        options: &PositionOptions,
    ) -> Result<Coordinates, GeolocationError> {
        (**self).current_position(options).await
    }
}

/// Reports a known position, or "unavailable" when none is set.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedPosition {
    position: Option<Coordinates>,
}

impl FixedPosition {
    pub fn new(position: Option<Coordinates>) -> Self {
        Self { position }
    }
}

#[async_trait]
impl GeolocationProvider for FixedPosition {
    async fn current_position(
        &self,
        options: &PositionOptions,
    ) -> Result<Coordinates, GeolocationError> {
        debug!(?options, position = ?self.position, "resolving fixed position");
        self.position.ok_or(GeolocationError::PositionUnavailable)
    }
}

/// Location access switched off by the user.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeniedPosition;

#[async_trait]
impl GeolocationProvider for DeniedPosition {
    async fn current_position(
        &self,
        _options: &PositionOptions,
    ) -> Result<Coordinates, GeolocationError> {
        Err(GeolocationError::PermissionDenied)
    }
}

/// Build the provider described by the config.
///
/// `override_position` (e.g. from command-line flags) wins over the
/// configured home position but not over disabled location access.
pub fn provider_from_config(
    config: &Config,
    override_position: Option<Coordinates>,
) -> Box<dyn GeolocationProvider> {
    if !config.location_access {
        return Box::new(DeniedPosition);
    }
    Box::new(FixedPosition::new(override_position.or(config.home)))
}
