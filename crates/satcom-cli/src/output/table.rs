//! Table output formatting for satellites.

use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};

use satcom_core::Satellite;

const HEADERS: [&str; 7] = [
    "NAME",
    "OPERATOR",
    "STATUS",
    "ORBIT",
    "ALTITUDE (KM)",
    "LAUNCHED",
    "CONSTELLATION",
];

/// Render satellites as a bordered table.
pub fn satellites_table(satellites: &[Satellite]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(HEADERS);

    for sat in satellites {
        table.add_row(vec![
            sat.name.clone(),
            sat.operator.clone(),
            sat.status.clone(),
            sat.orbit_type.clone(),
            format_altitude(sat.altitude),
            sat.launch_date.clone(),
            if sat.constellation { "yes" } else { "no" }.to_string(),
        ]);
    }

    table.to_string()
}

fn format_altitude(altitude: f64) -> String {
    if altitude > 0.0 {
        format!("{:.0}", altitude)
    } else {
        "-".to_string()
    }
}
