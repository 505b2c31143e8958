//! CSV Output
//!
//! Two tables in one document: algorithm rows, a blank line, then scenario
//! rows. Each table carries its own header.

use crate::report::Report;
use serde::Serialize;
use thiserror::Error;

/// CSV generation failure
#[derive(Debug, Error)]
pub enum CsvReportError {
    /// Record serialisation failed
    #[error("CSV serialization failed: {0}")]
    Csv(#[from] csv::Error),

    /// Writer could not be flushed
    #[error("CSV writer flush failed: {0}")]
    Flush(String),

    /// Output was not valid UTF-8
    #[error("CSV output is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

fn write_table<T: Serialize>(rows: &[T]) -> Result<String, CsvReportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| CsvReportError::Flush(e.to_string()))?;
    Ok(String::from_utf8(bytes)?)
}

/// Generate the CSV document for a report
pub fn generate_csv_report(report: &Report) -> Result<String, CsvReportError> {
    let mut out = write_table(&report.algorithm_rows())?;
    let scenarios = report.scenario_rows();
    if !scenarios.is_empty() {
        out.push('\n');
        out.push_str(&write_table(&scenarios)?);
    }
    Ok(out)
}
