#![warn(missing_docs)]
//! pqbench Report - Reporting and Export
//!
//! Generates output formats from a finished run:
//! - JSON (the full nested report)
//! - CSV (flat algorithm rows, a blank line, then flat scenario rows)
//!
//! Human-readable terminal output lives in the CLI.

mod csv_report;
mod json;
mod report;
mod rows;

pub use csv_report::{CsvReportError, generate_csv_report};
pub use json::{REPORT_SCHEMA_VERSION, generate_json_report};
pub use report::{AnalysisSection, FailureInfo, Report, ReportConfig, ReportMeta, ReportSummary};
pub use rows::{AlgorithmRow, ScenarioRow};

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable terminal output
    #[default]
    Human,
    /// Pretty-printed JSON
    Json,
    /// CSV for spreadsheets
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "human" | "text" => Ok(OutputFormat::Human),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parse() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("text".parse::<OutputFormat>(), Ok(OutputFormat::Human));
        assert!("html".parse::<OutputFormat>().is_err());
    }
}
