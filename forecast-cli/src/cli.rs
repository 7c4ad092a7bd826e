use anyhow::Context;
use clap::{Parser, Subcommand};
use forecast_core::{Config, Dashboard, DashboardState, ServiceId, WeatherError};
use inquire::{Password, PasswordDisplayMode};
use std::{
    io::{self, Write},
    process::ExitCode,
};
use tracing::debug;

use crate::{render, session};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "forecast", version, about = "Weather forecast with AI summaries")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store API keys; prompts for every service when none is given.
    Configure {
        /// Service short name: "openweather" or "cohere".
        service: Option<String>,
    },

    /// Show current weather, summary and forecast for a city.
    Show {
        /// City name, e.g. "London" or "Paris,FR".
        city: String,

        /// Number of forecast days to list.
        #[arg(long)]
        days: Option<usize>,
    },

    /// Look up cities one after another, keeping the last result on screen.
    Interactive {
        /// Number of forecast days to list.
        #[arg(long)]
        days: Option<usize>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        match self.command {
            Command::Configure { service } => {
                configure(service.as_deref())?;
                Ok(ExitCode::SUCCESS)
            }
            Command::Show { city, days } => {
                let dashboard = build_dashboard(days)?;
                let mut state = DashboardState::default();

                let outcome = dashboard.query(&mut state, &city).await.map(|_| ());
                let shown = report(
                    &mut io::stdout().lock(),
                    &mut io::stderr().lock(),
                    &state,
                    outcome,
                )?;

                Ok(if shown {
                    ExitCode::SUCCESS
                } else {
                    ExitCode::FAILURE
                })
            }
            Command::Interactive { days } => {
                let dashboard = build_dashboard(days)?;
                session::run(&dashboard).await?;
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

/// Print a one-shot query: the result to `out`, or the worded error to `err_out`.
///
/// Returns whether there was a result to show.
fn report(
    out: &mut impl Write,
    err_out: &mut impl Write,
    state: &DashboardState,
    outcome: Result<(), WeatherError>,
) -> io::Result<bool> {
    match outcome {
        Ok(()) => {
            render::render(out, state)?;
            out.flush()?;
            Ok(true)
        }
        Err(e) => {
            debug!(error = ?e, "query failed");
            render::render_error(err_out, &e)?;
            err_out.flush()?;
            Ok(false)
        }
    }
}

fn build_dashboard(days: Option<usize>) -> anyhow::Result<Dashboard> {
    let config = Config::load()?.with_env_overrides();
    let dashboard = Dashboard::from_config(&config)?;

    Ok(match days {
        Some(days) => dashboard.with_max_days(days),
        None => dashboard,
    })
}

fn configure(service: Option<&str>) -> anyhow::Result<()> {
    let services = match service {
        Some(name) => vec![ServiceId::try_from(name)?],
        None => ServiceId::all().to_vec(),
    };

    let mut config = Config::load()?;

    for id in services {
        let help = match id {
            ServiceId::OpenWeather => "Required. Free keys at https://openweathermap.org/api",
            ServiceId::Cohere => "Optional. Leave empty to use plain summaries",
        };

        let key = Password::new(&format!("{id} API key:"))
            .without_confirmation()
            .with_display_mode(PasswordDisplayMode::Masked)
            .with_help_message(help)
            .prompt()
            .with_context(|| format!("Failed to read API key for '{id}'"))?;

        let key = key.trim();
        if key.is_empty() {
            println!("{}", skipped_key_message(&config, id));
            continue;
        }

        config.upsert_provider_api_key(id, key.to_string());
    }

    let path = config.save()?;
    println!("Configuration saved to {}", path.display());

    Ok(())
}

fn skipped_key_message(config: &Config, id: ServiceId) -> String {
    if config.is_provider_configured(id) {
        format!("Keeping existing {id} settings.")
    } else {
        format!("No {id} API key set; {id} stays unconfigured.")
    }
}
