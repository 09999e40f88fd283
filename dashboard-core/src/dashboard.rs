//! Dashboard state controller.
//!
//! [`reducer`] is the pure state machine. [`Dashboard`] owns the state and
//! the collaborators, runs the reducer, and performs the effects it asks for,
//! feeding each result back in as a new action.

use std::collections::VecDeque;

use tracing::{debug, info, warn};

use crate::{
    backend::WeatherBackend, error::GeolocationError, geolocation::GeolocationProvider,
    preferences::PreferenceStore,
};

pub mod action;
pub mod effect;
pub mod reducer;
pub mod state;

pub use action::Action;
pub use effect::Effect;
pub use reducer::{Transition, reducer};
pub use state::DashboardState;

pub struct Dashboard<B, G, P> {
    state: DashboardState,
    backend: B,
    geolocation: G,
    preferences: P,
}

impl<B, G, P> Dashboard<B, G, P>
where
    B: WeatherBackend,
    G: GeolocationProvider,
    P: PreferenceStore,
{
    /// Create a dashboard. The dark-mode preference is read here, once.
    pub fn new(backend: B, geolocation: G, preferences: P) -> Self {
        let dark_mode = preferences.load_dark_mode();
        Self {
            state: DashboardState::new(dark_mode),
            backend,
            geolocation,
            preferences,
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// Run one reducer step without performing its effects.
    pub fn apply(&mut self, action: Action) -> Transition {
        debug!(?action, "apply");
        reducer(&mut self.state, action)
    }

    /// Dispatch an action and perform every effect that follows from it.
    ///
    /// Effects run one at a time, in the order they were produced. Returns
    /// whether the state changed at any point.
    pub async fn dispatch(&mut self, action: Action) -> bool {
        let mut queue = VecDeque::from([action]);
        let mut changed = false;

        while let Some(action) = queue.pop_front() {
            let transition = self.apply(action);
            changed |= transition.changed;

            for effect in transition.effects {
                if let Some(next) = self.perform(effect).await {
                    queue.push_back(next);
                }
            }
        }

        changed
    }

    /// Perform one effect and report its result as an action.
    pub async fn perform(&self, effect: Effect) -> Option<Action> {
        match effect {
            Effect::FetchByCity { city } => Some(match self.backend.fetch_by_city(&city).await {
                Ok(record) => Action::SearchDidLoad(record),
                Err(e) => Action::SearchDidError(e),
            }),

            Effect::ResolvePosition { options } => {
                let lookup = self.geolocation.current_position(&options);
                let result = tokio::time::timeout(options.timeout, lookup)
                    .await
                    .unwrap_or(Err(GeolocationError::Timeout));

                Some(match result {
                    Ok(position) => Action::LocationDidResolve(position),
                    Err(e) => {
                        warn!(error = ?e, "could not get current position");
                        Action::LocationDidError(e)
                    }
                })
            }

            Effect::FetchByLocation { position } => {
                Some(match self.backend.fetch_by_location(position).await {
                    Ok(record) => Action::LocationDidLoad(record),
                    Err(e) => Action::LocationFetchDidError(e),
                })
            }

            Effect::ListSaved => Some(match self.backend.list_saved().await {
                Ok(records) => Action::RecentDidLoad(records),
                Err(e) => {
                    warn!(error = %e, "could not refresh recent cities");
                    Action::RecentDidError(e)
                }
            }),

            Effect::DeleteByCity { city } => Some(match self.backend.delete_by_city(&city).await {
                Ok(confirmation) => {
                    info!(%city, message = %confirmation.message, "delete answered");
                    Action::DeleteDidFinish(confirmation)
                }
                Err(e) => Action::DeleteDidError(e),
            }),

            Effect::PersistDarkMode(enabled) => {
                if let Err(e) = self.preferences.save_dark_mode(enabled) {
                    warn!(error = %format!("{e:#}"), "could not save dark mode preference");
                }
                None
            }
        }
    }

    /// Load recent cities for a freshly shown dashboard.
    pub async fn mount(&mut self) -> bool {
        self.dispatch(Action::Mount).await
    }

    /// Type `city` into the search box and submit it.
    pub async fn search_city(&mut self, city: &str) -> bool {
        let typed = self.apply(Action::QueryChange(city.to_string())).changed;
        self.dispatch(Action::SearchSubmit).await || typed
    }

    pub async fn use_my_location(&mut self) -> bool {
        self.dispatch(Action::LocationRequest).await
    }

    pub async fn delete_city(&mut self, city: &str) -> bool {
        self.dispatch(Action::DeleteCity(city.to_string())).await
    }

    pub async fn refresh_recent(&mut self) -> bool {
        self.dispatch(Action::RecentRefresh).await
    }

    pub async fn toggle_dark_mode(&mut self) -> bool {
        self.dispatch(Action::ThemeToggle).await
    }
}
