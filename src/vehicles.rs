//! Live vehicle positions from the vehicle position feed.

use anyhow::Result;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

use crate::fetch::{BasicClient, HttpClient, fetch_bytes};
use crate::gtfs_rt::FeedMessage;
use crate::{VEHICLE_POSITION_URL, ids, parser};

/// One vehicle as reported by the feed. Every field is optional in the
/// wire format; absent fields are omitted from the JSON output rather than
/// serialized as null.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VehicleInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trip_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_sequence: Option<u32>,
}

/// Extracts vehicle positions from a feed snapshot, optionally filtered by
/// route. With a filter, vehicles that carry no trip descriptor cannot be
/// attributed to a route and are skipped; without one, they are included
/// with whatever fields they do have.
pub fn locate_vehicles(feed: &FeedMessage, route_filter: Option<&str>) -> Vec<VehicleInfo> {
    let mut vehicles = Vec::new();

    for entity in &feed.entity {
        let Some(veh) = &entity.vehicle else {
            continue;
        };

        if let Some(route_id) = route_filter {
            match &veh.trip {
                Some(trip) if trip.route_id.as_deref() == Some(route_id) => {}
                _ => continue,
            }
        }

        let mut info = VehicleInfo::default();
        if let Some(trip) = &veh.trip {
            info.trip_id = trip.trip_id.clone();
            info.route_id = trip.route_id.clone();
        }
        if let Some(pos) = &veh.position {
            info.latitude = Some(pos.latitude);
            info.longitude = Some(pos.longitude);
            info.speed = pos.speed;
        }
        info.stop_sequence = veh.current_stop_sequence;

        vehicles.push(info);
    }

    vehicles
}

/// Fetches a vehicle position feed through the given client and extracts
/// positions, optionally filtered by legacy line id.
pub async fn vehicle_positions_from<C: HttpClient>(
    client: &C,
    url: &str,
    line: Option<&str>,
) -> Result<Vec<VehicleInfo>> {
    let route_id = line.map(ids::route_id);
    debug!(?line, ?route_id, "fetching vehicle positions");

    let bytes = fetch_bytes(client, url).await?;
    let feed = parser::parse_feed(&bytes)?;

    Ok(locate_vehicles(&feed, route_id.as_deref()))
}

/// [`vehicle_positions_from`] against the live Divia endpoint with a fresh
/// client.
pub async fn fetch_vehicle_positions(
    line: Option<&str>,
    timeout: Duration,
) -> Result<Vec<VehicleInfo>> {
    let client = BasicClient::with_timeout(timeout)?;
    vehicle_positions_from(&client, VEHICLE_POSITION_URL, line).await
}
