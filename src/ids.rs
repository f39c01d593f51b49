//! Legacy TOTEM identifier mapping.
//!
//! The old Divia TOTEM API identified lines and stops by short numeric
//! codes. The GTFS-RT feeds use `4-` prefixed ids instead. The mappings
//! below were recovered by cross-referencing the live feed against the
//! TOTEM codes still baked into the display configs.

/// Maps a TOTEM line id to the GTFS route id.
///
/// Total: unknown codes fall back to the direct `4-{code}` format, which
/// holds for every plain bus line observed in the feed.
pub fn route_id(line: &str) -> String {
    let known = match line {
        // trams
        "101" => Some("4-T1"),
        "202" => Some("4-T2"),

        // Lianes; several TOTEM variants share one GTFS route
        "87" | "88" | "105" => Some("4-L5"),
        "89" | "90" | "106" => Some("4-L6"),
        "91" | "99" | "100" | "108" => Some("4-L8"),

        // Corol buses B12-B19
        "102" => Some("4-12"),
        "103" => Some("4-13"),
        "104" => Some("4-14"),
        "107" => Some("4-15"),
        "111" => Some("4-16"),
        "118" => Some("4-18"),
        "119" => Some("4-19"),

        // standard bus lines 30-45; same shape as the fallback but kept
        // pinned in the table
        "30" => Some("4-30"),
        "31" => Some("4-31"),
        "32" => Some("4-32"),
        "33" => Some("4-33"),
        "34" => Some("4-34"),
        "35" => Some("4-35"),
        "36" => Some("4-36"),
        "37" => Some("4-37"),
        "38" => Some("4-38"),
        "40" => Some("4-40"),
        "41" => Some("4-41"),
        "42" => Some("4-42"),
        "43" => Some("4-43"),
        "44" => Some("4-44"),
        "45" => Some("4-45"),

        // navettes
        "CITY" => Some("4-CITY"),
        "CO" => Some("4-CO"),

        // ProxiLianes
        "139" | "140" => Some("4-PL"),

        _ => None,
    };

    match known {
        Some(id) => id.to_string(),
        None => format!("4-{line}"),
    }
}

/// Maps a TOTEM stop code to the GTFS stop id. Always `4-{code}`.
pub fn stop_id(code: &str) -> String {
    format!("4-{code}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tram_and_corol_mappings() {
        assert_eq!(route_id("101"), "4-T1");
        assert_eq!(route_id("202"), "4-T2");
        assert_eq!(route_id("102"), "4-12");
        assert_eq!(route_id("119"), "4-19");
    }

    #[test]
    fn test_liane_variants_share_a_route() {
        assert_eq!(route_id("87"), "4-L5");
        assert_eq!(route_id("88"), "4-L5");
        assert_eq!(route_id("105"), "4-L5");
        assert_eq!(route_id("90"), "4-L6");
        assert_eq!(route_id("100"), "4-L8");
    }

    #[test]
    fn test_standard_bus_block_is_pinned() {
        assert_eq!(route_id("30"), "4-30");
        assert_eq!(route_id("38"), "4-38");
        assert_eq!(route_id("45"), "4-45");
    }

    #[test]
    fn test_unknown_line_falls_back_to_direct_format() {
        // "39" sits in the 30-45 block but has no TOTEM code, so it rides
        // the fallback like any unknown line
        assert_eq!(route_id("57"), "4-57");
        assert_eq!(route_id("39"), "4-39");
        assert_eq!(route_id(""), "4-");
    }

    #[test]
    fn test_stop_id_is_always_prefixed() {
        assert_eq!(stop_id("141"), "4-141");
        assert_eq!(stop_id("748"), "4-748");
        assert_eq!(stop_id(""), "4-");
    }
}
