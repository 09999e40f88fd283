//! Actions: user intents and the results of the work they start

use crate::{
    error::{ClientError, GeolocationError},
    model::{Coordinates, DeleteConfirmation, WeatherRecord},
};

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    // ===== Lifecycle =====
    /// Dashboard shown for the first time; loads recent cities
    Mount,

    // ===== City search =====
    /// Search box text changed
    QueryChange(String),

    /// Search for the city in the search box
    SearchSubmit,

    /// Result: city lookup succeeded
    SearchDidLoad(WeatherRecord),

    /// Result: city lookup failed
    SearchDidError(ClientError),

    // ===== Location search =====
    /// "Use my location"
    LocationRequest,

    /// Result: position obtained, weather lookup not yet done
    LocationDidResolve(Coordinates),

    /// Result: position could not be obtained
    LocationDidError(GeolocationError),

    /// Result: weather for the position loaded
    LocationDidLoad(WeatherRecord),

    /// Result: weather lookup for the position failed
    LocationFetchDidError(ClientError),

    // ===== Recent cities =====
    /// Re-read the saved list
    RecentRefresh,

    /// Result: saved list as returned by the service
    RecentDidLoad(Vec<WeatherRecord>),

    /// Result: saved list could not be read
    RecentDidError(ClientError),

    /// Remove a city from the saved list
    DeleteCity(String),

    /// Result: the service answered the delete
    DeleteDidFinish(DeleteConfirmation),

    /// Result: the delete request failed
    DeleteDidError(ClientError),

    // ===== Theme =====
    ThemeToggle,
}
