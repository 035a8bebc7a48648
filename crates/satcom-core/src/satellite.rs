//! Satellite records and query filtering.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SatcomError};
use crate::record::Record;

/// Date format used for launch dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Information about an Earth satellite.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Satellite {
    pub name: String,
    pub orbit_type: String,
    pub altitude: f64,
    pub eccentricity: f64,
    pub inclination: f64,
    pub power_system: String,
    pub communication: String,
    pub size: f64,
    pub weight: f64,
    pub constellation: bool,
    pub remote_sensing: String,
    /// Launch date, `YYYY-MM-DD`
    pub launch_date: String,
    pub operator: String,
    pub mission_objective: String,
    /// e.g. Active, Inactive
    pub status: String,
}

impl Satellite {
    /// Create a satellite with its identifying fields set.
    pub fn new(
        name: impl Into<String>,
        operator: impl Into<String>,
        status: impl Into<String>,
        orbit_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            operator: operator.into(),
            status: status.into(),
            orbit_type: orbit_type.into(),
            ..Self::default()
        }
    }

    /// Parsed launch date, if the stored string is a valid `YYYY-MM-DD`.
    pub fn launch_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.launch_date, DATE_FORMAT).ok()
    }
}

impl Record for Satellite {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|e| {
        SatcomError::InvalidInput(format!(
            "Invalid date '{}' (expected YYYY-MM-DD): {}",
            value, e
        ))
    })
}

/// Query criteria for satellites. Unset fields match everything.
#[derive(Debug, Clone, Default)]
pub struct SatelliteFilter {
    /// Operator, case-insensitive
    pub operator: Option<String>,
    /// Status, case-insensitive
    pub status: Option<String>,
    /// Orbit type, case-insensitive
    pub orbit_type: Option<String>,
    /// Launched on or after this date
    pub launch_after: Option<NaiveDate>,
    /// Launched on or before this date
    pub launch_before: Option<NaiveDate>,
    pub constellation: Option<bool>,
    /// Minimum altitude in km; zero means no bound
    pub min_altitude: f64,
    /// Maximum altitude in km; zero means no bound
    pub max_altitude: f64,
}

impl SatelliteFilter {
    /// Reject contradictory bounds.
    pub fn validate(&self) -> Result<()> {
        if let (Some(after), Some(before)) = (self.launch_after, self.launch_before) {
            if after > before {
                return Err(SatcomError::InvalidInput(format!(
                    "--launch-after date ({}) cannot be after --launch-before date ({})",
                    after, before
                )));
            }
        }
        if self.min_altitude > 0.0
            && self.max_altitude > 0.0
            && self.min_altitude > self.max_altitude
        {
            return Err(SatcomError::InvalidInput(format!(
                "--min-altitude ({:.0}) cannot be greater than --max-altitude ({:.0})",
                self.min_altitude, self.max_altitude
            )));
        }
        Ok(())
    }

    /// Whether `sat` satisfies every set criterion.
    pub fn matches(&self, sat: &Satellite) -> bool {
        if !eq_ignore_case(self.operator.as_deref(), &sat.operator)
            || !eq_ignore_case(self.status.as_deref(), &sat.status)
            || !eq_ignore_case(self.orbit_type.as_deref(), &sat.orbit_type)
        {
            return false;
        }

        if self.launch_after.is_some() || self.launch_before.is_some() {
            let Some(launched) = sat.launch_date() else {
                return false;
            };
            if self.launch_after.is_some_and(|after| launched < after) {
                return false;
            }
            if self.launch_before.is_some_and(|before| launched > before) {
                return false;
            }
        }

        if self
            .constellation
            .is_some_and(|wanted| sat.constellation != wanted)
        {
            return false;
        }

        if self.min_altitude > 0.0 && sat.altitude < self.min_altitude {
            return false;
        }
        if self.max_altitude > 0.0 && sat.altitude > self.max_altitude {
            return false;
        }

        true
    }

    /// Matching satellites, sorted by name.
    pub fn apply<'a, I>(&self, satellites: I) -> Vec<Satellite>
    where
        I: IntoIterator<Item = &'a Satellite>,
    {
        let mut matched: Vec<Satellite> = satellites
            .into_iter()
            .filter(|sat| self.matches(sat))
            .cloned()
            .collect();
        matched.sort_by(|a, b| a.name.cmp(&b.name));
        matched
    }
}

fn eq_ignore_case(wanted: Option<&str>, actual: &str) -> bool {
    match wanted {
        Some(value) if !value.is_empty() => value.to_lowercase() == actual.to_lowercase(),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sat(name: &str, operator: &str, launch: &str, altitude: f64) -> Satellite {
        Satellite {
            launch_date: launch.to_string(),
            altitude,
            ..Satellite::new(name, operator, "Active", "LEO")
        }
    }

    #[test]
    fn test_serializes_camel_case() {
        let value = serde_json::to_value(Satellite::new("SAT-1", "ESA", "Active", "LEO")).unwrap();
        assert_eq!(value["orbitType"], "LEO");
        assert_eq!(value["missionObjective"], "");
        assert!(value.get("orbit_type").is_none());
    }

    #[test]
    fn test_missing_fields_default() {
        let sat: Satellite = serde_json::from_str(r#"{"name":"SAT-1","operator":"ESA"}"#).unwrap();
        assert_eq!(sat.name(), "SAT-1");
        assert_eq!(sat.operator, "ESA");
        assert!(!sat.constellation);
    }

    #[test]
    fn test_text_filters_are_case_insensitive() {
        let filter = SatelliteFilter {
            operator: Some("esa".to_string()),
            status: Some("ACTIVE".to_string()),
            orbit_type: Some("leo".to_string()),
            ..Default::default()
        };
        assert!(filter.matches(&sat("SAT-1", "ESA", "2020-01-01", 500.0)));
        assert!(!filter.matches(&sat("SAT-2", "NASA", "2020-01-01", 500.0)));
    }

    #[test]
    fn test_launch_window_is_inclusive() {
        let filter = SatelliteFilter {
            launch_after: Some(parse_date("2020-01-01").unwrap()),
            launch_before: Some(parse_date("2020-12-31").unwrap()),
            ..Default::default()
        };
        assert!(filter.matches(&sat("A", "ESA", "2020-01-01", 0.0)));
        assert!(filter.matches(&sat("B", "ESA", "2020-12-31", 0.0)));
        assert!(!filter.matches(&sat("C", "ESA", "2021-01-01", 0.0)));
        assert!(!filter.matches(&sat("D", "ESA", "2019-12-31", 0.0)));
    }

    #[test]
    fn test_unparsable_launch_date_excluded_from_window() {
        let filter = SatelliteFilter {
            launch_after: Some(parse_date("2000-01-01").unwrap()),
            ..Default::default()
        };
        assert!(!filter.matches(&sat("A", "ESA", "unknown", 0.0)));
        assert!(SatelliteFilter::default().matches(&sat("A", "ESA", "unknown", 0.0)));
    }

    #[test]
    fn test_altitude_zero_means_unbounded() {
        let filter = SatelliteFilter {
            min_altitude: 400.0,
            ..Default::default()
        };
        assert!(filter.matches(&sat("A", "ESA", "", 500.0)));
        assert!(!filter.matches(&sat("B", "ESA", "", 300.0)));

        let filter = SatelliteFilter {
            max_altitude: 400.0,
            ..Default::default()
        };
        assert!(filter.matches(&sat("B", "ESA", "", 300.0)));
        assert!(!filter.matches(&sat("A", "ESA", "", 500.0)));
    }

    #[test]
    fn test_constellation_filter() {
        let mut starlink = sat("STARLINK-1", "SpaceX", "", 550.0);
        starlink.constellation = true;
        let filter = SatelliteFilter {
            constellation: Some(true),
            ..Default::default()
        };
        assert!(filter.matches(&starlink));
        assert!(!filter.matches(&sat("HUBBLE", "NASA", "", 540.0)));
    }

    #[test]
    fn test_validate_rejects_inverted_bounds() {
        let dates = SatelliteFilter {
            launch_after: Some(parse_date("2021-01-01").unwrap()),
            launch_before: Some(parse_date("2020-01-01").unwrap()),
            ..Default::default()
        };
        assert!(matches!(dates.validate(), Err(SatcomError::InvalidInput(_))));

        let altitude = SatelliteFilter {
            min_altitude: 900.0,
            max_altitude: 100.0,
            ..Default::default()
        };
        assert!(matches!(altitude.validate(), Err(SatcomError::InvalidInput(_))));

        assert!(SatelliteFilter::default().validate().is_ok());
    }

    #[test]
    fn test_apply_sorts_by_name() {
        let sats = [
            sat("ZETA", "ESA", "", 0.0),
            sat("ALPHA", "ESA", "", 0.0),
            sat("MID", "NASA", "", 0.0),
        ];
        let filter = SatelliteFilter {
            operator: Some("ESA".to_string()),
            ..Default::default()
        };
        let names: Vec<String> = filter.apply(&sats).into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["ALPHA", "ZETA"]);
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert!(parse_date("2024-02-30").is_err());
        assert!(parse_date("yesterday").is_err());
        assert_eq!(
            parse_date("2024-02-29").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
    }
}
