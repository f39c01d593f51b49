pub mod board;
pub mod departures;
pub mod fetch;
pub mod ids;
pub mod panels;
pub mod parser;
pub mod vehicles;
pub mod velodi;

pub mod gtfs_rt {
    include!(concat!(env!("OUT_DIR"), "/transit_realtime.rs"));
}

/// Trip update feed for the Divia Dijon network, served through the
/// transport.data.gouv.fr proxy.
pub const TRIP_UPDATE_URL: &str =
    "https://proxy.transport.data.gouv.fr/resource/divia-dijon-gtfs-rt-trip-update";

/// Vehicle position feed for the Divia Dijon network.
pub const VEHICLE_POSITION_URL: &str =
    "https://proxy.transport.data.gouv.fr/resource/divia-dijon-gtfs-rt-vehicle-position";
