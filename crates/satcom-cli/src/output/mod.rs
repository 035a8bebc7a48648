//! Output formatting helpers for the CLI.
//!
//! Record listings are printed either as JSON or as a table.

mod json;
mod table;

use satcom_core::Satellite;

use crate::cli::OutputFormat;

use json::satellites_json;
use table::satellites_table;

/// Print satellites to stdout in the requested format.
pub fn print_satellites(satellites: &[Satellite], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", satellites_json(satellites)?),
        OutputFormat::Table if satellites.is_empty() => println!("No satellites found."),
        OutputFormat::Table => println!("{}", satellites_table(satellites)),
    }
    Ok(())
}
