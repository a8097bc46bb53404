//! Bike-share station finder CLI
//!
//! Command-line front end for station discovery. Prints view states and
//! map regions as JSON on stdout; logs go to stderr.

#![allow(clippy::print_stdout)]

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use application::DiscoveryService;
use clap::{Parser, Subcommand};
use domain::SearchRequest;
use infrastructure::{
    AppConfig, FixedLocationProvider, GeocoderAdapter, StationFeedAdapter, init_logging, retry,
};
use serde::Serialize;
use tracing::{debug, info};

/// Bike-share station finder
#[derive(Parser, Debug)]
#[command(name = "bikeshare-cli")]
#[command(author, version, about = "Find bike-share stations around two addresses", long_about = None)]
struct Cli {
    /// Verbosity level (overrides the configured log filter)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (default: ./bikeshare.toml if present)
    #[arg(short, long, global = true, env = "BIKESHARE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Geocode two addresses and list the stations around each
    ///
    /// Example: bikeshare-cli discover "Union Station, Chicago" "Navy Pier, Chicago" --radius 400
    Discover {
        /// Source address (Home)
        source: String,

        /// Destination address
        destination: String,

        /// Search radius in meters
        #[arg(short, long, default_value_t = 500.0)]
        radius: f64,

        /// Retry the whole search this many times on retryable failures
        /// (default: retry.max_retries from the configuration)
        #[arg(long)]
        retries: Option<u32>,
    },

    /// Show every station in the feed (the map before the first search)
    Stations,

    /// Print the camera region for the configured device location
    Frame {
        /// Framing used when the map first appears
        #[arg(long, conflicts_with = "reset", required_unless_present = "reset")]
        startup: bool,

        /// Framing used by the "recenter on my location" action
        #[arg(long)]
        reset: bool,
    },

    /// Print the effective configuration
    Config,
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}

/// Load configuration from the explicit path or the default location
fn load_config(path: Option<&PathBuf>) -> anyhow::Result<AppConfig> {
    let config = match path {
        Some(path) => AppConfig::load_from(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => AppConfig::load().context("failed to load configuration")?,
    };
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("invalid configuration: {e}"))?;
    Ok(config)
}

/// Wire the HTTP adapters into a discovery service
fn build_service(config: &AppConfig) -> anyhow::Result<DiscoveryService> {
    let geocoder = GeocoderAdapter::nominatim(&config.geocoding)
        .context("failed to create geocoding client")?;
    let stations = StationFeedAdapter::socrata(&config.stations)
        .context("failed to create station feed client")?;
    let location = FixedLocationProvider::from_config(&config.location);

    Ok(
        DiscoveryService::new(Arc::new(geocoder), Arc::new(stations))
            .with_config(config.discovery.clone())
            .with_location_provider(Arc::new(location)),
    )
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_ref())?;

    let mut log_config = config.logging.clone();
    if let Some(filter) = log_filter_from_verbosity(cli.verbose) {
        log_config = log_config.with_filter(filter);
    }
    init_logging(&log_config)?;

    match cli.command {
        Commands::Discover {
            source,
            destination,
            radius,
            retries,
        } => {
            let service = build_service(&config)?;
            let retry_config = retries.map_or_else(
                || config.retry.clone(),
                |n| config.retry.clone().with_max_retries(n),
            );
            let request = SearchRequest::new(source, destination, radius);

            info!(radius, max_retries = retry_config.max_retries, "Starting search");
            let outcome = retry(&retry_config, || service.discover(request.clone()))
                .await
                .context("search failed")?;

            debug!(
                markers = outcome.view_state.markers().len(),
                unavailable = outcome.unavailable.len(),
                "Search finished"
            );
            print_json(&outcome)?;
        },

        Commands::Stations => {
            let service = build_service(&config)?;
            let view = retry(&config.retry, || service.initial_view())
                .await
                .context("failed to load stations")?;
            print_json(&view)?;
        },

        Commands::Frame { startup, reset: _ } => {
            let service = build_service(&config)?;
            let region = if startup {
                service.startup_region().await
            } else {
                service.reset_region().await
            };
            let region = region.context(
                "device location unknown: set location.latitude and location.longitude",
            )?;
            print_json(&region)?;
        },

        Commands::Config => {
            print_json(&config)?;
        },
    }

    Ok(())
}
