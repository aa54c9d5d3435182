use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode};
use tokio::net::TcpListener;
use weather_core::{Aggregator, Config, ProviderId};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-server", version, about = "Multi-provider temperature service")]
pub struct Cli {
    /// Config file path; defaults to the platform config directory.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the aggregated temperature over HTTP.
    Serve {
        /// Listen address, e.g. "0.0.0.0:8000".
        #[arg(long)]
        bind: Option<String>,

        /// File holding the Weather Underground API key.
        #[arg(long)]
        key_file: Option<PathBuf>,
    },

    /// Query all providers once and print the result.
    Show {
        /// City name, passed to providers verbatim.
        city: String,
    },

    /// Store an API key for a specific provider.
    Configure {
        /// Provider short name, e.g. "wunderground" or "openweathermap".
        provider: String,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let path = match self.config {
            Some(path) => path,
            None => Config::config_file_path()?,
        };
        let mut config = Config::load_from(&path)?;

        match self.command {
            Command::Serve { bind, key_file } => {
                if bind.is_some() {
                    config.bind = bind;
                }
                if key_file.is_some() {
                    config.key_file = key_file;
                }
                config.apply_key_file();

                let aggregator = Arc::new(Aggregator::from_config(&config));
                let providers = aggregator.len();
                let app = weather_server::build_app(aggregator);

                let addr = config.bind_addr();
                let listener = TcpListener::bind(addr)
                    .await
                    .with_context(|| format!("Failed to bind {addr}"))?;

                tracing::info!(%addr, providers, "Listening");
                axum::serve(listener, app).await.context("HTTP server error")?;
            }
            Command::Show { city } => {
                config.apply_key_file();

                let aggregator = Aggregator::from_config(&config);
                let reading = weather_server::lookup(&aggregator, &city).await?;

                println!("{}", serde_json::to_string_pretty(&reading)?);
            }
            Command::Configure { provider } => {
                let id = ProviderId::try_from(provider.as_str())?;

                let api_key = Password::new(&format!("{id} API key:"))
                    .with_display_mode(PasswordDisplayMode::Masked)
                    .without_confirmation()
                    .prompt()
                    .context("Failed to read API key")?;

                config.upsert_provider_api_key(id, api_key.trim().to_string());
                config.save_to(&path)?;

                println!("Saved {id} API key to {}", path.display());
            }
        }

        Ok(())
    }
}
