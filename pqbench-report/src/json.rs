//! JSON Output

use crate::report::Report;

/// Version of the report layout, bumped on breaking changes
pub const REPORT_SCHEMA_VERSION: u32 = 1;

/// Generate a prettified JSON report.
pub fn generate_json_report(report: &Report) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}
