//! Binary crate for the `weather-server` tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Serving the aggregated temperature over HTTP
//! - Interactive credential configuration

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    weather_server::telemetry::init("info");

    let cmd = cli::Cli::parse();
    cmd.run().await
}
