//! Named dashboard panels.
//!
//! The home dashboard renders one cell per panel. Each preset carries the
//! literals one of the old per-cell scripts was compiled with: a (line,
//! stop, count, sentinel policy) tuple for bus cells, a station id for
//! bike cells. The runner owns error conversion: a failed fetch or decode
//! is logged and rendered as the cell's sentinel output, never a crash.

use serde_json::{Value, json};
use std::time::Duration;
use tracing::error;

use crate::TRIP_UPDATE_URL;
use crate::board::{self, Board, SentinelPolicy};
use crate::departures;
use crate::fetch::{BasicClient, DEFAULT_TIMEOUT_SECS, HttpClient};
use crate::velodi::{Availability, VelodiClient};

#[derive(Debug, Clone, Copy)]
pub enum PanelKind {
    Buses {
        line: &'static str,
        stop: &'static str,
        count: usize,
        policy: SentinelPolicy,
    },
    Bikes {
        station: &'static str,
    },
}

#[derive(Debug, Clone, Copy)]
pub struct Panel {
    pub name: &'static str,
    pub kind: PanelKind,
}

pub const PANELS: &[Panel] = &[
    Panel {
        name: "b12-plombiere-wilson",
        kind: PanelKind::Buses {
            line: "102",
            stop: "141",
            count: 2,
            policy: SentinelPolicy::NA,
        },
    },
    Panel {
        name: "l5-talant-transvaal",
        kind: PanelKind::Buses {
            line: "87",
            stop: "748",
            count: 2,
            policy: SentinelPolicy::NA,
        },
    },
    // This cell's display treats 999 as "no bus" and shows 0 while the bus
    // is at the stop.
    Panel {
        name: "l5-talant-wilson",
        kind: PanelKind::Buses {
            line: "87",
            stop: "141",
            count: 2,
            policy: SentinelPolicy::N999_CLAMPED,
        },
    },
    Panel {
        name: "l6-toison-wilson",
        kind: PanelKind::Buses {
            line: "90",
            stop: "141",
            count: 2,
            policy: SentinelPolicy::NA,
        },
    },
    Panel {
        name: "velodi-wilson",
        kind: PanelKind::Bikes { station: "11" },
    },
    Panel {
        name: "velodi-eldorado",
        kind: PanelKind::Bikes { station: "37" },
    },
];

pub fn by_name(name: &str) -> Option<&'static Panel> {
    PANELS.iter().find(|panel| panel.name == name)
}

pub fn names() -> Vec<&'static str> {
    PANELS.iter().map(|panel| panel.name).collect()
}

/// Runs one panel end to end and returns its JSON output line.
pub async fn run(panel: &Panel) -> Value {
    match panel.kind {
        PanelKind::Buses {
            line,
            stop,
            count,
            policy,
        } => {
            bus_panel_output(
                line,
                stop,
                count,
                policy,
                Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            )
            .await
        }
        PanelKind::Bikes { station } => bike_panel_output(station).await,
    }
}

/// Fetches departures for a bus cell through the given client and renders
/// the board. Fetch and decode failures degrade to an empty board.
pub async fn bus_board_from<C: HttpClient>(
    client: &C,
    url: &str,
    line: &str,
    stop: &str,
    count: usize,
    policy: SentinelPolicy,
) -> Value {
    let departures = match departures::next_departures_from(client, url, line, stop, count).await {
        Ok(departures) => departures,
        Err(e) => {
            error!(error = %e, line, stop, "departure lookup failed, rendering empty board");
            Vec::new()
        }
    };

    board::render(&board::next_two(&departures), policy)
}

/// [`bus_board_from`] against the live Divia endpoint with a fresh client.
pub async fn bus_panel_output(
    line: &str,
    stop: &str,
    count: usize,
    policy: SentinelPolicy,
    timeout: Duration,
) -> Value {
    match BasicClient::with_timeout(timeout) {
        Ok(client) => bus_board_from(&client, TRIP_UPDATE_URL, line, stop, count, policy).await,
        Err(e) => {
            error!(error = %e, "http client construction failed, rendering empty board");
            board::render(&Board::default(), policy)
        }
    }
}

/// Fetches availability for a bike cell. Failures render N/A counters.
pub async fn bike_board_from(client: &VelodiClient, station: &str) -> Value {
    let result: anyhow::Result<Availability> = client.station_status(station).await;

    match result {
        Ok(availability) => json!({ "bike": availability.bikes, "dock": availability.docks }),
        Err(e) => {
            error!(error = %e, station, "station lookup failed, rendering N/A");
            json!({ "bike": "N/A", "dock": "N/A" })
        }
    }
}

/// [`bike_board_from`] against the live GBFS base with a fresh client.
pub async fn bike_panel_output(station: &str) -> Value {
    match VelodiClient::new() {
        Ok(client) => bike_board_from(&client, station).await,
        Err(e) => {
            error!(error = %e, station, "http client construction failed, rendering N/A");
            json!({ "bike": "N/A", "dock": "N/A" })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::MissingSentinel;

    #[test]
    fn test_every_panel_is_resolvable_by_name() {
        for panel in PANELS {
            assert!(by_name(panel.name).is_some(), "panel {} missing", panel.name);
        }
        assert!(by_name("no-such-panel").is_none());
        assert_eq!(names().len(), PANELS.len());
    }

    #[test]
    fn test_bus_presets_carry_expected_literals() {
        let Some(Panel {
            kind:
                PanelKind::Buses {
                    line, stop, policy, ..
                },
            ..
        }) = by_name("b12-plombiere-wilson")
        else {
            panic!("b12 panel should be a bus panel");
        };
        assert_eq!(*line, "102");
        assert_eq!(*stop, "141");
        assert_eq!(policy.missing, MissingSentinel::Na);
        assert!(!policy.clamp_at_stop);
    }

    #[test]
    fn test_l5_wilson_uses_999_with_clamp() {
        let Some(Panel {
            kind: PanelKind::Buses { policy, .. },
            ..
        }) = by_name("l5-talant-wilson")
        else {
            panic!("l5-talant-wilson should be a bus panel");
        };
        assert_eq!(policy.missing, MissingSentinel::N999);
        assert!(policy.clamp_at_stop);
    }

    #[test]
    fn test_bike_presets_carry_station_ids() {
        let Some(Panel {
            kind: PanelKind::Bikes { station },
            ..
        }) = by_name("velodi-wilson")
        else {
            panic!("velodi-wilson should be a bike panel");
        };
        assert_eq!(*station, "11");
    }
}
