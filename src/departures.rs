//! Next-departure selection over a decoded trip update feed.

use anyhow::Result;
use chrono::{DateTime, Local, TimeZone};
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

use crate::fetch::{BasicClient, HttpClient, fetch_bytes};
use crate::gtfs_rt::FeedMessage;
use crate::{TRIP_UPDATE_URL, ids, parser};

/// One predicted departure at a stop, derived from the feed snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct Departure {
    /// Absolute predicted time.
    pub time: DateTime<Local>,
    /// Whole minutes until departure, floored. Strictly-future times only,
    /// so this is always >= 0.
    pub minutes: i64,
    /// 24-hour clock text for display, local time.
    pub formatted: String,
}

/// Selects the next departures for a route/stop pair from a feed snapshot.
///
/// Scans trip update entities for the route, then their stop time updates
/// for the stop. The predicted time is the departure event when present,
/// the arrival event otherwise; updates carrying neither are skipped, as
/// are times at or before `now`. Results are sorted ascending and cut to
/// `limit`.
///
/// No match at any stage is not an error: the result is simply shorter,
/// possibly empty.
pub fn select_departures(
    feed: &FeedMessage,
    route_id: &str,
    stop_id: &str,
    limit: usize,
    now: DateTime<Local>,
) -> Vec<Departure> {
    let mut departures = Vec::new();

    for entity in &feed.entity {
        let Some(update) = &entity.trip_update else {
            continue;
        };
        if update.trip.route_id.as_deref() != Some(route_id) {
            continue;
        }

        for stu in &update.stop_time_update {
            if stu.stop_id.as_deref() != Some(stop_id) {
                continue;
            }

            let timestamp = stu
                .departure
                .as_ref()
                .and_then(|event| event.time)
                .or_else(|| stu.arrival.as_ref().and_then(|event| event.time));
            let Some(timestamp) = timestamp else {
                continue;
            };
            let Some(time) = Local.timestamp_opt(timestamp, 0).single() else {
                continue;
            };
            if time <= now {
                continue;
            }

            let minutes = (time - now).num_seconds() / 60;
            departures.push(Departure {
                time,
                minutes,
                formatted: time.format("%H:%M").to_string(),
            });
        }
    }

    departures.sort_by_key(|d| d.time);
    departures.truncate(limit);
    departures
}

/// Fetches a trip update feed through the given client and selects the
/// next departures for a legacy (line, stop) pair. One outbound call;
/// fails on network or decode errors, which callers downgrade to an empty
/// board.
pub async fn next_departures_from<C: HttpClient>(
    client: &C,
    url: &str,
    line: &str,
    stop: &str,
    limit: usize,
) -> Result<Vec<Departure>> {
    let route_id = ids::route_id(line);
    let stop_id = ids::stop_id(stop);
    debug!(line, stop, %route_id, %stop_id, "resolved feed ids");

    let bytes = fetch_bytes(client, url).await?;
    let feed = parser::parse_feed(&bytes)?;

    Ok(select_departures(
        &feed,
        &route_id,
        &stop_id,
        limit,
        Local::now(),
    ))
}

/// [`next_departures_from`] against the live Divia endpoint with a fresh
/// client.
pub async fn fetch_next_departures(
    line: &str,
    stop: &str,
    limit: usize,
    timeout: Duration,
) -> Result<Vec<Departure>> {
    let client = BasicClient::with_timeout(timeout)?;
    next_departures_from(&client, TRIP_UPDATE_URL, line, stop, limit).await
}
