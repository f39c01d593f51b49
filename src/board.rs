//! Dashboard board shaping and sentinel rendering.
//!
//! The display expects one JSON line per panel, shape
//! `{"prochain_bus": <minutes>, "suivant_bus": <minutes>}`. What goes into
//! a slot with no data differs per display cell, so the sentinel choice is
//! a policy the caller carries, not part of the shared board extraction.

use clap::ValueEnum;
use serde_json::{Value, json};

use crate::departures::Departure;

/// The next and following departure in whole minutes, when known.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Board {
    pub next: Option<i64>,
    pub following: Option<i64>,
}

/// Extracts the next/following slots from an already-sorted departure list.
/// Entries beyond the first two are ignored.
pub fn next_two(departures: &[Departure]) -> Board {
    Board {
        next: departures.first().map(|d| d.minutes),
        following: departures.get(1).map(|d| d.minutes),
    }
}

/// What an empty slot renders as.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum MissingSentinel {
    /// JSON string "N/A".
    #[default]
    Na,
    /// The number 999, for displays that treat large values as "no bus".
    N999,
}

/// Per-panel rendering policy for the two minute slots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SentinelPolicy {
    pub missing: MissingSentinel,
    /// Render a next bus at <= 1 minute as 0, meaning "bus at stop".
    /// Only ever applied to the next slot.
    pub clamp_at_stop: bool,
}

impl SentinelPolicy {
    pub const NA: Self = Self {
        missing: MissingSentinel::Na,
        clamp_at_stop: false,
    };

    pub const N999_CLAMPED: Self = Self {
        missing: MissingSentinel::N999,
        clamp_at_stop: true,
    };
}

/// Renders a board to the dashboard JSON value under the given policy.
pub fn render(board: &Board, policy: SentinelPolicy) -> Value {
    let missing = match policy.missing {
        MissingSentinel::Na => json!("N/A"),
        MissingSentinel::N999 => json!(999),
    };

    let next = match board.next {
        Some(minutes) if policy.clamp_at_stop && minutes <= 1 => json!(0),
        Some(minutes) => json!(minutes),
        None => missing.clone(),
    };
    let following = match board.following {
        Some(minutes) => json!(minutes),
        None => missing,
    };

    json!({ "prochain_bus": next, "suivant_bus": following })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    fn departure(minutes: i64) -> Departure {
        let time = Local.timestamp_opt(1_700_000_000 + minutes * 60, 0).unwrap();
        Departure {
            time,
            minutes,
            formatted: time.format("%H:%M").to_string(),
        }
    }

    #[test]
    fn test_next_two_slots() {
        assert_eq!(next_two(&[]), Board::default());

        let one = next_two(&[departure(5)]);
        assert_eq!(one.next, Some(5));
        assert_eq!(one.following, None);

        let three = next_two(&[departure(5), departure(15), departure(25)]);
        assert_eq!(three.next, Some(5));
        assert_eq!(three.following, Some(15));
    }

    #[test]
    fn test_render_na_sentinels() {
        let empty = render(&Board::default(), SentinelPolicy::NA);
        assert_eq!(empty, json!({ "prochain_bus": "N/A", "suivant_bus": "N/A" }));

        let partial = render(
            &Board {
                next: Some(7),
                following: None,
            },
            SentinelPolicy::NA,
        );
        assert_eq!(partial, json!({ "prochain_bus": 7, "suivant_bus": "N/A" }));
    }

    #[test]
    fn test_render_999_sentinels() {
        let empty = render(&Board::default(), SentinelPolicy::N999_CLAMPED);
        assert_eq!(empty, json!({ "prochain_bus": 999, "suivant_bus": 999 }));
    }

    #[test]
    fn test_clamp_at_stop_applies_to_next_slot_only() {
        let board = Board {
            next: Some(1),
            following: Some(1),
        };

        let clamped = render(&board, SentinelPolicy::N999_CLAMPED);
        assert_eq!(clamped, json!({ "prochain_bus": 0, "suivant_bus": 1 }));

        let unclamped = render(&board, SentinelPolicy::NA);
        assert_eq!(unclamped, json!({ "prochain_bus": 1, "suivant_bus": 1 }));
    }

    #[test]
    fn test_clamp_leaves_larger_values_alone() {
        let board = Board {
            next: Some(2),
            following: Some(12),
        };
        let rendered = render(&board, SentinelPolicy::N999_CLAMPED);
        assert_eq!(rendered, json!({ "prochain_bus": 2, "suivant_bus": 12 }));
    }

    #[test]
    fn test_full_board_ignores_policy_missing_value() {
        let board = Board {
            next: Some(5),
            following: Some(15),
        };
        for policy in [SentinelPolicy::NA, SentinelPolicy::N999_CLAMPED] {
            let rendered = render(&board, policy);
            assert_eq!(rendered["prochain_bus"], json!(5));
            assert_eq!(rendered["suivant_bus"], json!(15));
        }
    }
}
