//! Human-friendly text output for the dashboard state.

use std::fmt::Write;

use dashboard_core::{ConditionKind, DashboardState, WeatherRecord};

/// Box-drawing characters for one theme.
struct Palette {
    top: char,
    side: char,
    rule: char,
    bottom: char,
}

const LIGHT: Palette = Palette {
    top: '┌',
    side: '│',
    rule: '─',
    bottom: '└',
};

const DARK: Palette = Palette {
    top: '┏',
    side: '┃',
    rule: '━',
    bottom: '┗',
};

const CARD_WIDTH: usize = 36;

fn palette(dark_mode: bool) -> &'static Palette {
    if dark_mode { &DARK } else { &LIGHT }
}

pub fn condition_glyph(kind: ConditionKind) -> &'static str {
    match kind {
        ConditionKind::Clear => "☀",
        ConditionKind::Clouds => "☁",
        ConditionKind::Rain => "🌧",
        ConditionKind::Drizzle => "🌦",
        ConditionKind::Thunderstorm => "⛈",
        ConditionKind::Snow => "❄",
        ConditionKind::Atmosphere => "🌫",
        ConditionKind::Unknown => "?",
    }
}

/// One weather card.
pub fn render_record(record: &WeatherRecord, dark_mode: bool) -> String {
    let p = palette(dark_mode);
    let mut out = String::new();

    let title = format!("{} {} ", p.rule, record.city);
    let fill = CARD_WIDTH.saturating_sub(title.chars().count());
    let _ = writeln!(out, "{}{}{}", p.top, title, p.rule.to_string().repeat(fill));

    let _ = writeln!(
        out,
        "{} {}  {} · {}",
        p.side,
        condition_glyph(record.condition_kind()),
        record.condition,
        record.description
    );

    let rows = [
        ("Temperature", record.temperature.as_str()),
        ("Feels like", record.feels_like_or_fallback()),
        ("Humidity", record.humidity.as_str()),
        ("Wind", record.wind_speed.as_str()),
        ("Visibility", record.visibility_or_fallback()),
    ];
    for (label, value) in rows {
        let _ = writeln!(out, "{} {label:<12} {value}", p.side);
    }
    if !record.icon_code.is_empty() {
        let _ = writeln!(out, "{} {:<12} {}", p.side, "Icon", record.icon_url());
    }

    let _ = writeln!(out, "{}{}", p.bottom, p.rule.to_string().repeat(CARD_WIDTH));
    out
}

/// Compact one-line-per-city list.
pub fn render_recent(records: &[WeatherRecord], dark_mode: bool) -> String {
    let p = palette(dark_mode);
    let mut out = String::new();

    if records.is_empty() {
        out.push_str("No recent cities.\n");
        return out;
    }

    let _ = writeln!(out, "Recent cities");
    for record in records {
        let _ = writeln!(
            out,
            "{} {} {:<20} {:>6}  {}",
            p.side,
            condition_glyph(record.condition_kind()),
            record.city,
            record.temperature,
            record.description
        );
    }
    out
}

/// Everything the dashboard currently shows: error or result, then recents.
pub fn render_dashboard(state: &DashboardState) -> String {
    let mut out = String::new();

    if let Some(message) = &state.error_message {
        let _ = writeln!(out, "Error: {message}");
    } else if let Some(record) = &state.current_result {
        out.push_str(&render_record(record, state.dark_mode));
    }

    if !state.recent_cities.is_empty() {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&render_recent(&state.recent_cities, state.dark_mode));
    }

    if let Some(message) = &state.recent_error {
        let _ = writeln!(out, "Recent cities could not be refreshed: {message}");
    }

    out
}
