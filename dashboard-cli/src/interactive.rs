//! Menu-driven dashboard session.

use std::fmt;

use inquire::{InquireError, Select, Text};

use crate::{cli::CliDashboard, render};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuItem {
    Search,
    UseMyLocation,
    Delete,
    Refresh,
    ToggleTheme,
    Quit,
}

impl MenuItem {
    const ALL: [MenuItem; 6] = [
        MenuItem::Search,
        MenuItem::UseMyLocation,
        MenuItem::Delete,
        MenuItem::Refresh,
        MenuItem::ToggleTheme,
        MenuItem::Quit,
    ];
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MenuItem::Search => "Search a city",
            MenuItem::UseMyLocation => "Use my location",
            MenuItem::Delete => "Delete a recent city",
            MenuItem::Refresh => "Refresh recent cities",
            MenuItem::ToggleTheme => "Toggle dark mode",
            MenuItem::Quit => "Quit",
        })
    }
}

/// Run until the user quits or cancels a prompt.
pub async fn run(dash: &mut CliDashboard) -> anyhow::Result<()> {
    dash.mount().await;
    redraw(dash);

    loop {
        let choice = match prompt(Select::new("What next?", MenuItem::ALL.to_vec()).prompt())? {
            Some(choice) => choice,
            None => return Ok(()),
        };

        match choice {
            MenuItem::Search => {
                let city = match prompt(
                    Text::new("City:")
                        .with_initial_value(&dash.state().query)
                        .prompt(),
                )? {
                    Some(city) => city,
                    None => continue,
                };
                dash.search_city(&city).await;
            }
            MenuItem::UseMyLocation => {
                dash.use_my_location().await;
            }
            MenuItem::Delete => {
                let cities: Vec<String> = dash
                    .state()
                    .recent_cities
                    .iter()
                    .map(|r| r.city.clone())
                    .collect();
                if cities.is_empty() {
                    println!("No recent cities to delete.");
                    continue;
                }
                let Some(city) = prompt(Select::new("Delete which city?", cities).prompt())? else {
                    continue;
                };
                dash.delete_city(&city).await;
            }
            MenuItem::Refresh => {
                dash.refresh_recent().await;
            }
            MenuItem::ToggleTheme => {
                dash.toggle_dark_mode().await;
                let mode = if dash.state().dark_mode { "on" } else { "off" };
                println!("Dark mode {mode}.");
            }
            MenuItem::Quit => return Ok(()),
        }

        redraw(dash);
    }
}

fn redraw(dash: &CliDashboard) {
    let out = render::render_dashboard(dash.state());
    if !out.is_empty() {
        println!("\n{out}");
    }
}

/// Treat Esc / Ctrl-C as "back out" instead of an error.
fn prompt<T>(result: Result<T, InquireError>) -> anyhow::Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(e.into()),
    }
}
