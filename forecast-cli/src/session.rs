//! Prompt loop for `forecast interactive`.

use forecast_core::{Dashboard, DashboardState};
use inquire::{InquireError, Text};
use std::io::{self, Write};
use tracing::debug;

use crate::render;

#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Quit,
    Clear,
    City(&'a str),
}

fn parse_input(line: &str) -> Input<'_> {
    match line.trim() {
        "" | ":q" | ":quit" => Input::Quit,
        ":clear" => Input::Clear,
        city => Input::City(city),
    }
}

pub async fn run(dashboard: &Dashboard) -> anyhow::Result<()> {
    let mut state = DashboardState::default();

    loop {
        let line = match Text::new("City:")
            .with_placeholder("Enter City Name")
            .with_help_message(":clear resets the results, an empty line quits")
            .prompt()
        {
            Ok(line) => line,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e.into()),
        };

        let city = match parse_input(&line) {
            Input::Quit => break,
            Input::Clear => {
                state.clear();
                None
            }
            Input::City(city) => Some(city),
        };

        let outcome = match city {
            Some(city) => {
                eprintln!("Fetching weather data.....");
                Some(dashboard.query(&mut state, city).await.map(|_| ()))
            }
            None => None,
        };

        let mut stdout = io::stdout().lock();
        match outcome {
            Some(Err(e)) => {
                debug!(error = ?e, "query failed");
                render::render_error(&mut stdout, &e)?;
            }
            _ => render::render(&mut stdout, &state)?,
        }

        writeln!(stdout)?;
        stdout.flush()?;
    }

    Ok(())
}
