//! Analysis Outcome

use serde::{Deserialize, Serialize};

/// Result of an analysis that may lack the groups it needs
///
/// Insufficient data is a normal outcome, not an error: callers keep
/// rendering everything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisOutcome<T> {
    /// Analysis computed
    Ready(T),
    /// A required group was empty
    InsufficientData {
        /// What was missing
        reason: String,
    },
}

impl<T> AnalysisOutcome<T> {
    pub(crate) fn insufficient(reason: impl Into<String>) -> Self {
        AnalysisOutcome::InsufficientData {
            reason: reason.into(),
        }
    }

    /// The computed value, if any
    pub fn ready(&self) -> Option<&T> {
        match self {
            AnalysisOutcome::Ready(value) => Some(value),
            AnalysisOutcome::InsufficientData { .. } => None,
        }
    }

    /// Whether the analysis was computed
    pub fn is_ready(&self) -> bool {
        matches!(self, AnalysisOutcome::Ready(_))
    }

    /// Reason the analysis was skipped, if it was
    pub fn reason(&self) -> Option<&str> {
        match self {
            AnalysisOutcome::Ready(_) => None,
            AnalysisOutcome::InsufficientData { reason } => Some(reason),
        }
    }
}
