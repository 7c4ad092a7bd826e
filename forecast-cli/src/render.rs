//! Plain-text rendering of the dashboard state.

use chrono::Local;
use forecast_core::{
    DailyForecast, DashboardState, QueryResult, TemperaturePoint, WeatherError,
    temperature_series,
};
use std::io::{self, Write};

const RULE: &str = "==========================================================================";
const BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

pub fn render(out: &mut impl Write, state: &DashboardState) -> io::Result<()> {
    match state.last() {
        Some(result) => render_result(out, result),
        None => writeln!(out, "No results yet. Enter a city name to get started."),
    }
}

pub fn render_result(out: &mut impl Write, result: &QueryResult) -> io::Result<()> {
    let snapshot = &result.snapshot;
    let category = snapshot.category();

    writeln!(out, "Weather Updates for {}:", result.city)?;
    writeln!(out)?;
    writeln!(
        out,
        "  Temperature  {:.2} °C (feels like {:.2} °C)",
        snapshot.temperature_c(),
        snapshot.feels_like_c()
    )?;
    writeln!(out, "  Humidity     {}%", snapshot.humidity_pct)?;
    writeln!(out, "  Pressure     {} hPa", snapshot.pressure_hpa)?;
    writeln!(out, "  Wind Speed   {} m/s", snapshot.wind_speed_mps)?;
    writeln!(
        out,
        "  Condition    {} {}",
        category.glyph(),
        capitalize(&snapshot.condition)
    )?;
    writeln!(out)?;

    writeln!(out, "AI Weather Summary")?;
    writeln!(out, "  {}", result.summary)?;

    writeln!(out, "{RULE}")?;
    match &result.forecast_error {
        Some(reason) => writeln!(out, "Error fetching forecast! ({reason})")?,
        None => {
            render_forecast_table(out, &result.daily)?;
            writeln!(out, "{RULE}")?;
            render_chart(out, &temperature_series(&result.samples))?;
        }
    }

    writeln!(out, "{RULE}")?;
    writeln!(
        out,
        "Map: {} ({:.4}, {:.4})",
        result.marker.label, result.marker.latitude, result.marker.longitude
    )?;
    writeln!(out, "  {}", result.marker.openstreetmap_url())?;

    Ok(())
}

fn render_forecast_table(out: &mut impl Write, days: &[DailyForecast]) -> io::Result<()> {
    writeln!(out, "{}-Day Weather Forecast", days.len())?;

    if days.is_empty() {
        return writeln!(out, "  No forecast data available.");
    }

    writeln!(out, "  {:<18} {:<26} {:>9} {:>9}", "Day", "Desc", "Min Temp", "Max Temp")?;
    for day in days {
        let desc = format!("{} {}", day.icon, capitalize(&day.condition));
        writeln!(
            out,
            "  {:<18} {:<26} {:>7.1}°C {:>7.1}°C",
            day.label, desc, day.temp_min_c, day.temp_max_c
        )?;
    }

    Ok(())
}

fn render_chart(out: &mut impl Write, points: &[TemperaturePoint]) -> io::Result<()> {
    writeln!(out, "Temperature Chart")?;

    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return writeln!(out, "  No forecast data available.");
    };

    let lo = points.iter().map(|p| p.min_c).fold(f64::INFINITY, f64::min);
    let hi = points.iter().map(|p| p.max_c).fold(f64::NEG_INFINITY, f64::max);

    let max_line = sparkline(points.iter().map(|p| p.max_c), lo, hi);
    let min_line = sparkline(points.iter().map(|p| p.min_c), lo, hi);

    writeln!(out, "  Max  {max_line}")?;
    writeln!(out, "  Min  {min_line}")?;
    writeln!(
        out,
        "  {:.1}..{:.1} °C, {} to {}",
        lo,
        hi,
        first.time.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
        last.time.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
    )
}

/// One bar per value, scaled to the shared `lo..hi` range.
fn sparkline(values: impl Iterator<Item = f64>, lo: f64, hi: f64) -> String {
    let span = (hi - lo).max(0.001);
    values
        .map(|v| {
            let norm = ((v - lo) / span).clamp(0.0, 1.0);
            BARS[(norm * (BARS.len() - 1) as f64).round() as usize]
        })
        .collect()
}

/// First letter upper case, the rest lower case.
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

pub fn render_error(out: &mut impl Write, err: &WeatherError) -> io::Result<()> {
    match err {
        WeatherError::EmptyCity => writeln!(out, "Please enter a city name."),
        WeatherError::NotFound { query } => writeln!(out, "‼ City not found: {query} ‼"),
        e if e.is_transport() => {
            writeln!(out, "Could not reach the weather service, please try again. ({e})")
        }
        WeatherError::InvalidRequest(_) => {
            writeln!(out, "{err}. Check base_url in the config file.")
        }
        e => writeln!(out, "Error: {e}"),
    }
}
