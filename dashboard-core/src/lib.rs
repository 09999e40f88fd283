//! Core library for the weather dashboard.
//!
//! This crate defines:
//! - The weather record model and the error taxonomy
//! - The weather backend abstraction (dashboard service or OpenWeatherMap)
//! - The recent-cities rule, geolocation and preference storage
//! - The dashboard state controller
//! - Configuration handling
//!
//! It is used by `dashboard-cli`, but any front end can drive [`Dashboard`].

pub mod backend;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod geolocation;
pub mod model;
pub mod preferences;
pub mod recent;

pub use backend::{BackendKind, WeatherBackend, backend_from_config};
pub use config::{Config, ProviderConfig};
pub use dashboard::{Action, Dashboard, DashboardState, Effect};
pub use error::{ClientError, DashboardError, GeolocationError, ValidationError};
pub use geolocation::{GeolocationProvider, PositionOptions};
pub use model::{ConditionKind, Coordinates, DeleteConfirmation, WeatherRecord};
pub use preferences::{JsonFilePreferences, MemoryPreferences, PreferenceStore};
pub use recent::{RECENT_CITIES_LIMIT, dedupe_recent};
