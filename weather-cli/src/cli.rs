use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{InquireError, Password, PasswordDisplayMode, Text};
use std::io::{self, Write};
use tracing::{debug, info};
use weather_core::{
    Config, OpenWeatherClient, SearchSession, WeatherFetchError, resolve_city, search,
};

use crate::render::render_dashboard;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-dash", version, about = "Weather dashboard for the terminal")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key, default city and display timezone.
    Configure,

    /// Show the dashboard for a city.
    Show {
        /// City name; the configured default city if omitted.
        city: Option<String>,
    },

    /// Prompt for cities repeatedly and show each dashboard.
    Watch,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city } => {
                let config = Config::load()?;
                let client = client_from_config(&config)?;
                let city = resolve_city(city.as_deref(), &config.default_city);

                match search(&client, city).await {
                    Ok(dashboard) => {
                        let mut stdout = io::stdout().lock();
                        render_dashboard(&mut stdout, &dashboard)?;
                        Ok(())
                    }
                    Err(err) => {
                        report_failure(city, &err);
                        Err(err).with_context(|| format!("Search for '{city}' failed"))
                    }
                }
            }
            Command::Watch => watch().await,
        }
    }
}

fn client_from_config(config: &Config) -> anyhow::Result<OpenWeatherClient> {
    let settings = config.client_settings()?;
    OpenWeatherClient::new(settings).context("Failed to initialize HTTP client")
}

fn report_failure(city: &str, err: &WeatherFetchError) {
    debug!(error = ?err, "search failed");
    eprintln!("Could not fetch weather for '{city}'.");
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    config.set_api_key(api_key.trim().to_string());

    let default_city = Text::new("Default city:")
        .with_default(&config.default_city)
        .prompt()
        .context("Failed to read default city")?;
    if !default_city.trim().is_empty() {
        config.default_city = default_city.trim().to_string();
    }

    let timezone = Text::new("Display timezone (IANA name):")
        .with_default(&config.timezone)
        .prompt()
        .context("Failed to read timezone")?;
    config.timezone = timezone.trim().to_string();
    config.display_timezone()?;

    let path = config.save()?;
    info!(path = %path.display(), "configuration saved");
    println!("Configuration saved to {}", path.display());

    Ok(())
}

async fn watch() -> anyhow::Result<()> {
    let config = Config::load()?;
    let client = client_from_config(&config)?;
    let session = SearchSession::new();

    // First paint uses the default city, like a fresh page load.
    let mut next = Some(config.default_city.clone());

    loop {
        if let Some(input) = next.take() {
            let city = resolve_city(Some(input.as_str()), &config.default_city);

            match session.search(&client, city).await {
                Ok(Some(dashboard)) => {
                    let mut stdout = io::stdout().lock();
                    render_dashboard(&mut stdout, &dashboard)?;
                    writeln!(stdout)?;
                }
                Ok(None) => debug!(city, "newer search superseded this one"),
                Err(err) => report_failure(city, &err),
            }
        }

        match Text::new("City:")
            .with_placeholder(&config.default_city)
            .prompt()
        {
            Ok(input) => next = Some(input),
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err).context("Failed to read city"),
        }
    }

    Ok(())
}
