//! Reducer - pure function: (state, action) -> Transition

use crate::{
    error::{DashboardError, ValidationError},
    geolocation::PositionOptions,
    model::WeatherRecord,
    recent::dedupe_recent,
};

use super::{action::Action, effect::Effect, state::DashboardState};

/// Outcome of one reducer step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transition {
    /// Whether the state needs redrawing.
    pub changed: bool,
    /// Work to run, in order.
    pub effects: Vec<Effect>,
}

impl Transition {
    pub fn changed() -> Self {
        Self {
            changed: true,
            effects: Vec::new(),
        }
    }

    pub fn changed_with(effect: Effect) -> Self {
        Self {
            changed: true,
            effects: vec![effect],
        }
    }

    pub fn unchanged() -> Self {
        Self::default()
    }

    pub fn unchanged_with(effect: Effect) -> Self {
        Self {
            changed: false,
            effects: vec![effect],
        }
    }
}

/// The reducer handles all state transitions.
///
/// City and location searches write the same result and error slots; whichever
/// result arrives last is what the dashboard shows.
pub fn reducer(state: &mut DashboardState, action: Action) -> Transition {
    match action {
        Action::Mount => Transition::unchanged_with(Effect::ListSaved),

        // ===== City search =====
        Action::QueryChange(query) => {
            if state.query == query {
                return Transition::unchanged();
            }
            state.query = query;
            Transition::changed()
        }

        Action::SearchSubmit => {
            if state.is_search_loading {
                return Transition::unchanged();
            }

            let city = state.query.trim().to_string();
            state.current_result = None;
            if city.is_empty() {
                state.error_message = Some(user_message(ValidationError::EmptyCity));
                return Transition::changed();
            }

            state.error_message = None;
            state.is_search_loading = true;
            Transition::changed_with(Effect::FetchByCity { city })
        }

        Action::SearchDidLoad(record) => {
            state.is_search_loading = false;
            show_record(state, record)
        }

        Action::SearchDidError(err) => {
            state.is_search_loading = false;
            show_error(state, err)
        }

        // ===== Location search =====
        Action::LocationRequest => {
            if state.is_location_loading {
                return Transition::unchanged();
            }

            state.current_result = None;
            state.error_message = None;
            state.is_location_loading = true;
            Transition::changed_with(Effect::ResolvePosition {
                options: PositionOptions::default(),
            })
        }

        Action::LocationDidResolve(position) => {
            Transition::unchanged_with(Effect::FetchByLocation { position })
        }

        Action::LocationDidError(err) => {
            state.is_location_loading = false;
            show_error(state, err)
        }

        Action::LocationDidLoad(record) => {
            state.is_location_loading = false;
            show_record(state, record)
        }

        Action::LocationFetchDidError(err) => {
            state.is_location_loading = false;
            show_error(state, err)
        }

        // ===== Recent cities =====
        Action::RecentRefresh => Transition::unchanged_with(Effect::ListSaved),

        Action::RecentDidLoad(records) => {
            let recent = dedupe_recent(records);
            if state.recent_cities == recent && state.recent_error.is_none() {
                return Transition::unchanged();
            }
            state.recent_cities = recent;
            state.recent_error = None;
            Transition::changed()
        }

        // Keep showing the last list we had.
        Action::RecentDidError(err) => {
            state.recent_error = Some(user_message(err));
            Transition::changed()
        }

        Action::DeleteCity(city) => Transition::unchanged_with(Effect::DeleteByCity { city }),

        Action::DeleteDidFinish(_) => Transition::unchanged_with(Effect::ListSaved),

        Action::DeleteDidError(err) => {
            state.error_message = Some(user_message(err));
            Transition::changed_with(Effect::ListSaved)
        }

        // ===== Theme =====
        Action::ThemeToggle => {
            state.dark_mode = !state.dark_mode;
            Transition::changed_with(Effect::PersistDarkMode(state.dark_mode))
        }
    }
}

fn show_record(state: &mut DashboardState, record: WeatherRecord) -> Transition {
    state.query = record.city.clone();
    state.current_result = Some(record);
    state.error_message = None;
    Transition::changed_with(Effect::ListSaved)
}

fn show_error(state: &mut DashboardState, err: impl Into<DashboardError>) -> Transition {
    state.current_result = None;
    state.error_message = Some(user_message(err));
    Transition::changed()
}

fn user_message(err: impl Into<DashboardError>) -> String {
    err.into().user_message()
}
