//! National Transit Database code tables.

use tabula_transform::Recode;

/// Expense type row kept from the fare revenue extract; the other expense
/// type values double-count funds.
pub const EARNED_FARES: &str = "Funds Earned During Period";

/// NTD mode codes to rider-facing labels. Codes absent from the extract's
/// documentation fall back to "Unknown".
pub fn mode_labels() -> Recode {
    Recode::from_pairs(
        &[
            ("AR", "Alaska Railroad"),
            ("CB", "Commuter Bus"),
            ("CC", "Cable Car"),
            ("CR", "Commuter Rail"),
            ("DR", "Demand Response"),
            ("FB", "Ferryboat"),
            ("HR", "Heavy Rail"),
            ("IP", "Inclined Plane"),
            ("LR", "Light Rail"),
            ("MB", "Bus"),
            ("MG", "Monorail/Automated Guideway"),
            ("PB", "Publico"),
            ("RB", "Bus Rapid Transit"),
            ("SR", "Streetcar Rail"),
            ("TB", "Trolleybus"),
            ("TR", "Aerial Tramway"),
            ("VP", "Vanpool"),
            ("YR", "Hybrid Rail"),
        ],
        "Unknown",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_resolve_and_unknown_falls_back() {
        let labels = mode_labels();
        assert_eq!(labels.apply("AR"), "Alaska Railroad");
        assert_eq!(labels.apply("MB"), "Bus");
        assert_eq!(labels.apply("ZZ"), "Unknown");
    }
}
