use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use dashboard_core::{
    BackendKind, Config, Coordinates, Dashboard, DashboardState, GeolocationProvider,
    JsonFilePreferences, PreferenceStore, WeatherBackend, backend_from_config, geolocation,
};
use inquire::{Confirm, CustomType, Password, Select, Text};

use crate::{interactive, render};

pub type CliDashboard =
    Dashboard<Box<dyn WeatherBackend>, Box<dyn GeolocationProvider>, JsonFilePreferences>;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-dashboard", version, about = "Weather dashboard")]
pub struct Cli {
    /// Base URL of the weather service; overrides the config file.
    #[arg(long, global = true, env = "WEATHER_API_URL")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the weather for a city.
    Search {
        /// City name, e.g. "London" or "Kuala Lumpur".
        city: String,
    },

    /// Show the weather where you are.
    Locate {
        /// Latitude to use instead of the configured home position.
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,

        /// Longitude to use instead of the configured home position.
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,
    },

    /// List recently searched cities.
    Recent,

    /// Remove a city from the recent list.
    Delete {
        /// City name exactly as listed.
        city: String,
    },

    /// Show or change the dark mode setting.
    Theme {
        #[arg(value_enum)]
        mode: Option<ThemeMode>,
    },

    /// Set up the backend, credentials and home position.
    Configure,

    /// Run an interactive dashboard session.
    Interactive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeMode {
    On,
    Off,
    Toggle,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        let config = Config::load()?;
        let api_url = self.api_url.as_deref();

        match self.command {
            Command::Configure => {
                configure(config)?;
                Ok(ExitCode::SUCCESS)
            }
            Command::Search { city } => {
                let mut dash = build_dashboard(&config, api_url, None)?;
                dash.search_city(&city).await;
                Ok(show(&dash))
            }
            Command::Locate { lat, lon } => {
                let position = match (lat, lon) {
                    (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)?),
                    _ => None,
                };
                let mut dash = build_dashboard(&config, api_url, position)?;
                dash.use_my_location().await;
                Ok(show(&dash))
            }
            Command::Recent => {
                let mut dash = build_dashboard(&config, api_url, None)?;
                dash.mount().await;
                let (out, ok) = recent_report(dash.state());
                print!("{out}");
                Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
            }
            Command::Delete { city } => {
                let mut dash = build_dashboard(&config, api_url, None)?;
                dash.delete_city(&city).await;
                if dash.state().error_message.is_none() {
                    println!("Deleted {city}.");
                }
                Ok(show(&dash))
            }
            Command::Theme { mode } => {
                // Only the preference file is involved; no backend needed.
                let preferences = JsonFilePreferences::open_default()?;
                let current = preferences.load_dark_mode();
                let wanted = theme_after(current, mode);
                if wanted != current {
                    preferences.save_dark_mode(wanted)?;
                }
                println!("Dark mode: {}", if wanted { "on" } else { "off" });
                Ok(ExitCode::SUCCESS)
            }
            Command::Interactive => {
                let mut dash = build_dashboard(&config, api_url, None)?;
                interactive::run(&mut dash).await?;
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

fn build_dashboard(
    config: &Config,
    api_url: Option<&str>,
    position: Option<Coordinates>,
) -> anyhow::Result<CliDashboard> {
    let backend = backend_from_config(config, api_url)?;
    let geolocation = geolocation::provider_from_config(config, position);
    let preferences = JsonFilePreferences::open_default()?;
    Ok(Dashboard::new(backend, geolocation, preferences))
}

/// Print the dashboard and map its error line to the exit status.
fn show(dash: &CliDashboard) -> ExitCode {
    print!("{}", render::render_dashboard(dash.state()));
    exit_code(dash.state())
}

fn theme_after(current: bool, mode: Option<ThemeMode>) -> bool {
    match mode {
        None => current,
        Some(ThemeMode::On) => true,
        Some(ThemeMode::Off) => false,
        Some(ThemeMode::Toggle) => !current,
    }
}

/// Output of the `recent` command and whether the list could be read.
fn recent_report(state: &DashboardState) -> (String, bool) {
    match &state.recent_error {
        Some(message) => (format!("Error: {message}\n"), false),
        None => (render::render_recent(&state.recent_cities, state.dark_mode), true),
    }
}

fn exit_code(state: &DashboardState) -> ExitCode {
    if state.error_message.is_some() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Interactive configuration, saved to the config file.
fn configure(mut config: Config) -> anyhow::Result<()> {
    let current = config.backend_kind().unwrap_or(BackendKind::Service);
    let kinds = BackendKind::all().to_vec();
    let start = kinds.iter().position(|k| *k == current).unwrap_or(0);

    let kind = Select::new("Weather backend:", kinds)
        .with_starting_cursor(start)
        .prompt()?;
    config.set_backend(kind);

    match kind {
        BackendKind::Service => {
            let url = Text::new("Weather service URL:")
                .with_default(config.api_base_url())
                .prompt()?;
            config.api_base_url = Some(url.trim().to_string());
        }
        BackendKind::OpenWeather => {
            let key = Password::new("OpenWeatherMap API key:")
                .without_confirmation()
                .prompt()?;
            config.upsert_provider_api_key(kind, key.trim().to_string());
        }
    }

    config.location_access = Confirm::new("Allow \"use my location\"?")
        .with_default(config.location_access)
        .prompt()?;

    if config.location_access
        && Confirm::new("Set a home position?")
            .with_default(config.home.is_none())
            .prompt()?
    {
        let latitude = CustomType::<f64>::new("Latitude:").prompt()?;
        let longitude = CustomType::<f64>::new("Longitude:").prompt()?;
        let home = Coordinates::new(latitude, longitude).context("Invalid home position")?;
        config.set_home(home);
    }

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}
