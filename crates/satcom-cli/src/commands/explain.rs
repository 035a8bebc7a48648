//! `explain` - static reference text; never touches the datastore.

use crate::cli::ExplainTopic;
use crate::errors::CliError;

/// Orbit type abbreviations and their explanations, sorted by key.
const ORBITS: &[(&str, &str)] = &[
    (
        "GEO",
        "Geostationary Orbit (GEO)\n  \
         Altitude: 35,786 km above the equator.\n  \
         Period: one sidereal day, so the satellite holds a fixed point in the sky.\n  \
         Uses: broadcast and fixed communications, weather imaging.\n  \
         Trade-offs: a single satellite sees about a third of the Earth, but \
         latency is high and polar coverage is poor.",
    ),
    (
        "GSO",
        "Geosynchronous Orbit (GSO)\n  \
         Altitude: 35,786 km.\n  \
         Period: one sidereal day, but the orbit may be inclined, so the \
         satellite traces a figure-eight over the same longitude each day.\n  \
         Uses: communications and broadcasting.\n  \
         Note: GEO is the zero-inclination case of GSO.",
    ),
    (
        "HALO",
        "Halo Orbit\n  \
         A periodic three-dimensional orbit around a Lagrange point (L1, L2 or \
         L3) of a two-body system such as Sun-Earth or Earth-Moon.\n  \
         Uses: space telescopes and solar observatories, deep-space relays.\n  \
         Trade-offs: an unobstructed, stable vantage point, but the orbit is \
         unstable and needs regular station-keeping.",
    ),
    (
        "HEO",
        "Highly Elliptical Orbit (HEO)\n  \
         A low perigee and a very high apogee; the satellite lingers near \
         apogee over one region.\n  \
         Uses: high-latitude communications (Molniya, Tundra), science missions.\n  \
         Trade-offs: long dwell time where GEO reaches poorly, but ground \
         antennas must track a moving target at varying range.",
    ),
    (
        "LEO",
        "Low Earth Orbit (LEO)\n  \
         Altitude: roughly 160 to 2,000 km.\n  \
         Period: about 90 minutes to 2 hours.\n  \
         Uses: Earth observation, crewed stations, broadband constellations.\n  \
         Trade-offs: cheap to reach with low latency, but each satellite sees \
         a small footprint and lower orbits suffer atmospheric drag.",
    ),
    (
        "MEO",
        "Medium Earth Orbit (MEO)\n  \
         Altitude: between LEO and GEO, about 2,000 to 35,786 km; navigation \
         satellites sit near 20,200 km.\n  \
         Period: a few hours (12 hours for GPS).\n  \
         Uses: navigation (GPS, GLONASS, Galileo), some communications.\n  \
         Trade-offs: wider coverage than LEO with less latency than GEO.",
    ),
    (
        "SSO",
        "Sun-Synchronous Orbit (SSO)\n  \
         A near-polar orbit (about 98 degrees inclination) that crosses each \
         latitude at the same local solar time.\n  \
         Altitude: usually 600 to 800 km.\n  \
         Uses: imaging, environmental and weather monitoring.\n  \
         Trade-offs: consistent lighting for change detection, with LEO-sized \
         coverage per satellite.",
    ),
];

pub fn handle_explain(topic: &ExplainTopic) -> anyhow::Result<()> {
    match topic {
        ExplainTopic::Orbit { term } => {
            println!("{}", explain_orbit(term)?);
            Ok(())
        }
    }
}

/// Look up an orbit type, case-insensitively.
pub fn explain_orbit(term: &str) -> Result<&'static str, CliError> {
    let key = term.trim().to_uppercase();
    ORBITS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, text)| *text)
        .ok_or_else(|| {
            let supported: Vec<&str> = ORBITS.iter().map(|(name, _)| *name).collect();
            CliError::not_found(
                format!("Unknown orbit type: {}", term),
                format!("Supported orbit types: {}", supported.join(", ")),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::exit_codes;

    #[test]
    fn test_every_orbit_type_is_explained() {
        for term in ["LEO", "MEO", "GEO", "GSO", "HEO", "SSO", "HALO"] {
            assert!(explain_orbit(term).is_ok(), "missing {}", term);
        }
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(explain_orbit("leo").unwrap(), explain_orbit("LEO").unwrap());
        assert!(explain_orbit(" Halo ").unwrap().starts_with("Halo Orbit"));
    }

    #[test]
    fn test_unknown_orbit_lists_supported() {
        let err = explain_orbit("XEO").unwrap_err();
        assert_eq!(err.code, exit_codes::NOT_FOUND);
        assert!(err.hint.unwrap().contains("GEO, GSO, HALO, HEO, LEO, MEO, SSO"));
    }

    #[test]
    fn test_orbits_sorted() {
        let names: Vec<&str> = ORBITS.iter().map(|(name, _)| *name).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }
}
