//! CLI entry point for the Divia realtime dashboard probes.
//!
//! Every subcommand prints exactly one JSON line to stdout; logs go to
//! stderr so the dashboard can consume stdout as-is.

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use divia_rt::board::{MissingSentinel, SentinelPolicy};
use divia_rt::fetch::{DEFAULT_TIMEOUT_SECS, VEHICLE_TIMEOUT_SECS};
use divia_rt::{panels, vehicles, velodi};
use std::time::Duration;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "divia-rt")]
#[command(about = "Realtime Divia departures and Vélodi availability for a home dashboard", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a preset dashboard panel by name
    Panel {
        /// Panel name, e.g. "b12-plombiere-wilson" or "velodi-wilson"
        name: String,
    },
    /// Next departures for a line/stop pair
    NextBuses {
        /// Legacy TOTEM line id (e.g. "102" for B12)
        #[arg(short, long)]
        line: String,

        /// Legacy TOTEM stop code (e.g. "141" for Wilson Carnot)
        #[arg(short, long)]
        stop: String,

        /// Number of departures to report
        #[arg(short, long, default_value_t = 2)]
        count: usize,

        /// What an empty slot renders as
        #[arg(long, value_enum, default_value_t = MissingSentinel::Na)]
        sentinel: MissingSentinel,

        /// Render a next bus at <= 1 minute as 0 ("bus at stop")
        #[arg(long, default_value_t = false)]
        clamp_at_stop: bool,

        /// HTTP timeout in seconds
        #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
        timeout: u64,
    },
    /// Live vehicle positions, optionally filtered by line
    Vehicles {
        /// Legacy TOTEM line id to filter on
        #[arg(short, long)]
        line: Option<String>,

        /// HTTP timeout in seconds
        #[arg(long, default_value_t = VEHICLE_TIMEOUT_SECS)]
        timeout: u64,
    },
    /// Bike and dock availability for a Vélodi station
    Bikes {
        /// GBFS station id (e.g. "11" for Wilson)
        #[arg(short, long)]
        station: Option<String>,

        /// Station name to search for instead of an id
        #[arg(short, long)]
        name: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let output = match cli.command {
        Commands::Panel { name } => {
            let Some(panel) = panels::by_name(&name) else {
                bail!(
                    "unknown panel {name:?}; available panels: {}",
                    panels::names().join(", ")
                );
            };
            panels::run(panel).await
        }
        Commands::NextBuses {
            line,
            stop,
            count,
            sentinel,
            clamp_at_stop,
            timeout,
        } => {
            let policy = SentinelPolicy {
                missing: sentinel,
                clamp_at_stop,
            };
            panels::bus_panel_output(&line, &stop, count, policy, Duration::from_secs(timeout))
                .await
        }
        Commands::Vehicles { line, timeout } => {
            let positions = match vehicles::fetch_vehicle_positions(
                line.as_deref(),
                Duration::from_secs(timeout),
            )
            .await
            {
                Ok(positions) => positions,
                Err(e) => {
                    error!(error = %e, "vehicle position lookup failed");
                    Vec::new()
                }
            };
            serde_json::to_value(positions)?
        }
        Commands::Bikes { station, name } => {
            let station_id = match (station, name) {
                (Some(id), _) => Some(id),
                (None, Some(name)) => resolve_station(&name).await,
                (None, None) => bail!("either --station or --name is required"),
            };
            match station_id {
                Some(id) => panels::bike_panel_output(&id).await,
                None => serde_json::json!({ "bike": "N/A", "dock": "N/A" }),
            }
        }
    };

    println!("{output}");
    Ok(())
}

/// Name-based station lookup for the `bikes` subcommand. Failures are
/// logged and degrade to the N/A cell like any other fetch problem.
async fn resolve_station(name: &str) -> Option<String> {
    let result: Result<String> = async { velodi::VelodiClient::new()?.find_station(name).await }.await;
    match result {
        Ok(id) => Some(id),
        Err(e) => {
            error!(error = %e, name, "station name lookup failed");
            None
        }
    }
}
