//! JSON output formatting for satellites.

use satcom_core::Satellite;

/// Render satellites as a pretty-printed JSON array.
pub fn satellites_json(satellites: &[Satellite]) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(satellites)?)
}
