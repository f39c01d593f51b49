//! Protobuf parser for the GTFS Realtime feeds.

use anyhow::Result;
use prost::Message;

use crate::gtfs_rt::FeedMessage;

/// Decodes a protobuf-encoded GTFS-RT [`FeedMessage`] from raw bytes.
///
/// # Errors
///
/// Returns an error if the bytes are not valid protobuf for a `FeedMessage`.
/// There is no partial recovery: a truncated or corrupt feed yields nothing.
pub fn parse_feed(bytes: &[u8]) -> Result<FeedMessage> {
    Ok(FeedMessage::decode(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gtfs_rt::{FeedEntity, FeedHeader, FeedMessage, TripDescriptor, TripUpdate};

    fn divia_like_feed() -> FeedMessage {
        FeedMessage {
            header: FeedHeader {
                gtfs_realtime_version: "2.0".to_string(),
                incrementality: None,
                timestamp: Some(1_700_000_000),
            },
            entity: vec![FeedEntity {
                id: "divia:tu:1".to_string(),
                is_deleted: None,
                trip_update: Some(TripUpdate {
                    trip: TripDescriptor {
                        trip_id: Some("4-12-0830-01".to_string()),
                        route_id: Some("4-12".to_string()),
                        direction_id: Some(0),
                        start_time: None,
                        start_date: None,
                    },
                    vehicle: None,
                    stop_time_update: vec![],
                    timestamp: None,
                    delay: None,
                }),
                vehicle: None,
            }],
        }
    }

    #[test]
    fn test_decodes_trip_update_entities() {
        let bytes = divia_like_feed().encode_to_vec();
        let feed = parse_feed(&bytes).unwrap();

        assert_eq!(feed.header.gtfs_realtime_version, "2.0");
        assert_eq!(feed.entity.len(), 1);
        let update = feed.entity[0].trip_update.as_ref().unwrap();
        assert_eq!(update.trip.route_id.as_deref(), Some("4-12"));
    }

    #[test]
    fn test_truncated_feed_is_an_error() {
        // A proxy hiccup that cuts the body mid-entity must surface as a
        // decode error, not a shorter feed
        let bytes = divia_like_feed().encode_to_vec();
        assert!(parse_feed(&bytes[..bytes.len() - 4]).is_err());
    }

    #[test]
    fn test_empty_body_decodes_to_empty_feed() {
        // Zero bytes are a valid encoding of an all-defaults message; the
        // caller just sees no entities
        let feed = parse_feed(&[]).unwrap();
        assert!(feed.entity.is_empty());
        assert_eq!(feed.header.gtfs_realtime_version, "");
    }
}
