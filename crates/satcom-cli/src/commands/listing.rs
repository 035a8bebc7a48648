//! Read-only commands: `list` and `query`.

use satcom_core::satellite::parse_date;
use satcom_core::{Satellite, SatelliteFilter};

use crate::app::AppContext;
use crate::cli::{OutputFormat, QueryArgs};
use crate::output::print_satellites;

pub fn handle_list(ctx: &AppContext, output: OutputFormat) -> anyhow::Result<()> {
    let session = ctx.open_store()?;
    let records = session.records()?;

    let mut satellites: Vec<Satellite> = records.into_values().collect();
    satellites.sort_by(|a, b| a.name.cmp(&b.name));

    if !ctx.quiet() && output == OutputFormat::Table {
        println!("Total records: {}.", satellites.len());
    }
    print_satellites(&satellites, output)
}

pub fn handle_query(ctx: &AppContext, args: &QueryArgs) -> anyhow::Result<()> {
    // Reject bad filters before prompting for a passphrase.
    let filter = build_filter(args)?;

    let session = ctx.open_store()?;
    let records = session.records()?;
    let satellites = filter.apply(records.values());

    if !ctx.quiet() && args.output == OutputFormat::Table {
        println!("Found {} matching satellite(s).", satellites.len());
    }
    print_satellites(&satellites, args.output)
}

fn build_filter(args: &QueryArgs) -> anyhow::Result<SatelliteFilter> {
    let constellation = match (args.constellation, args.standalone) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    };

    let filter = SatelliteFilter {
        operator: args.operator.clone(),
        status: args.status.clone(),
        orbit_type: args.orbit_type.clone(),
        launch_after: args.launch_after.as_deref().map(parse_date).transpose()?,
        launch_before: args.launch_before.as_deref().map(parse_date).transpose()?,
        constellation,
        min_altitude: args.min_altitude,
        max_altitude: args.max_altitude,
    };
    filter.validate()?;
    Ok(filter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter_parses_dates() {
        let args = QueryArgs {
            launch_after: Some("2020-01-01".to_string()),
            standalone: true,
            ..Default::default()
        };
        let filter = build_filter(&args).unwrap();
        assert_eq!(filter.launch_after, Some(parse_date("2020-01-01").unwrap()));
        assert_eq!(filter.constellation, Some(false));
    }

    #[test]
    fn test_build_filter_rejects_bad_date() {
        let args = QueryArgs {
            launch_before: Some("soon".to_string()),
            ..Default::default()
        };
        assert!(build_filter(&args).is_err());
    }

    #[test]
    fn test_build_filter_rejects_inverted_altitude() {
        let args = QueryArgs {
            min_altitude: 1000.0,
            max_altitude: 10.0,
            ..Default::default()
        };
        assert!(build_filter(&args).is_err());
    }
}
