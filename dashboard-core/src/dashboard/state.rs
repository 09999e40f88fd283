//! Dashboard state - single source of truth for the front end

use crate::model::WeatherRecord;

/// Everything a front end needs to draw the dashboard.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    /// Text in the search box. Replaced by the returned city name after a
    /// successful lookup.
    pub query: String,

    /// Weather currently on display.
    pub current_result: Option<WeatherRecord>,

    pub is_search_loading: bool,

    /// Tracked apart from the city search so the two indicators never clobber
    /// each other.
    pub is_location_loading: bool,

    /// De-duplicated view of the service's saved list, at most four entries.
    pub recent_cities: Vec<WeatherRecord>,

    /// Single-line error shown in place of a result.
    pub error_message: Option<String>,

    /// Why the last recent-cities refresh failed. The previous list is kept.
    pub recent_error: Option<String>,

    pub dark_mode: bool,
}

impl DashboardState {
    pub fn new(dark_mode: bool) -> Self {
        Self {
            dark_mode,
            ..Self::default()
        }
    }

    pub fn is_loading(&self) -> bool {
        self.is_search_loading || self.is_location_loading
    }

    pub fn has_recent_city(&self, city: &str) -> bool {
        self.recent_cities.iter().any(|r| r.city == city)
    }
}
