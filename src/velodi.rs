//! DiviaVélodi bike-share availability, read from the network's GBFS feeds.
//!
//! Two documents are used: `station_status.json` for live bike/dock counts
//! and `station_information.json` to resolve a station by name.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::time::Duration;
use tracing::debug;

pub const VELODI_GBFS_BASE: &str = "https://transport.data.gouv.fr/gbfs/dijon";

const STATUS_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Deserialize)]
struct GbfsDocument<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct StationList<T> {
    stations: Vec<T>,
}

/// Live counters for one station, from `station_status.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct StationStatus {
    pub station_id: String,
    pub num_bikes_available: u32,
    pub num_docks_available: u32,
}

/// Static station record from `station_information.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct StationInformation {
    pub station_id: String,
    pub name: String,
    #[serde(default)]
    pub capacity: Option<u32>,
}

/// What the dashboard cares about: free bikes and free docks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Availability {
    pub bikes: u32,
    pub docks: u32,
}

pub struct VelodiClient {
    base_url: String,
    client: reqwest::Client,
}

impl VelodiClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(VELODI_GBFS_BASE)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(STATUS_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(5))
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    async fn get_document<T: DeserializeOwned>(&self, file: &str) -> Result<T> {
        let url = format!("{}/{}", self.base_url, file);
        debug!(%url, "fetching GBFS document");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("GET {url} failed"))?
            .error_for_status()?;

        response
            .json()
            .await
            .with_context(|| format!("failed to parse GBFS document {file}"))
    }

    /// Current availability for a station, by GBFS station id.
    pub async fn station_status(&self, station_id: &str) -> Result<Availability> {
        let document: GbfsDocument<StationList<StationStatus>> =
            self.get_document("station_status.json").await?;

        availability_for(&document.data.stations, station_id)
            .with_context(|| format!("station {station_id} not present in status feed"))
    }

    /// Resolves a station id from a (partial) station name.
    pub async fn find_station(&self, name: &str) -> Result<String> {
        let document: GbfsDocument<StationList<StationInformation>> =
            self.get_document("station_information.json").await?;

        match_station(&document.data.stations, name)
            .map(|station| station.station_id.clone())
            .with_context(|| format!("no station matching {name:?}"))
    }
}

fn availability_for(stations: &[StationStatus], station_id: &str) -> Option<Availability> {
    stations
        .iter()
        .find(|s| s.station_id == station_id)
        .map(|s| Availability {
            bikes: s.num_bikes_available,
            docks: s.num_docks_available,
        })
}

fn match_station<'a>(
    stations: &'a [StationInformation],
    name: &str,
) -> Option<&'a StationInformation> {
    let needle = name.to_lowercase();
    stations
        .iter()
        .find(|s| s.name.to_lowercase().contains(&needle))
}
