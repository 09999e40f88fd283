//! Effects - side effects declared by the reducer

use crate::{geolocation::PositionOptions, model::Coordinates};

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Fetch weather for a city name
    FetchByCity { city: String },
    /// Ask the geolocation provider for the current position
    ResolvePosition { options: PositionOptions },
    /// Fetch weather for a position
    FetchByLocation { position: Coordinates },
    /// Read the saved list
    ListSaved,
    /// Delete a saved city
    DeleteByCity { city: String },
    /// Write the dark-mode flag to preferences
    PersistDarkMode(bool),
}
