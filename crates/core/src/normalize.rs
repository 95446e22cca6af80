//! Pure mapping from provider payload fields to the closed status enums.
//!
//! Nothing here performs I/O; the daemon's provider clients decode responses
//! and hand the relevant fields to these functions.

use crate::model::{CicdStatus, QualityGateStatus};

/// GitHub Actions conclusion for a successful run.
pub const CONCLUSION_SUCCESS: &str = "success";

/// SonarCloud quality gate value for a passing gate.
pub const GATE_OK: &str = "OK";

/// Maps a workflow run conclusion.
///
/// `None` means the run has not concluded yet.
pub fn cicd_from_conclusion(conclusion: Option<&str>) -> CicdStatus {
    match conclusion {
        Some(CONCLUSION_SUCCESS) => CicdStatus::Passing,
        Some(_) => CicdStatus::Failing,
        None => CicdStatus::Pending,
    }
}

/// Maps a run conclusion, treating a run built from a different commit than
/// the current branch head as still pending.
///
/// `latest_sha` is `None` when the head check was skipped.
pub fn cicd_for_head(
    conclusion: Option<&str>,
    run_sha: Option<&str>,
    latest_sha: Option<&str>,
) -> CicdStatus {
    match latest_sha {
        Some(head) if run_sha != Some(head) => CicdStatus::Pending,
        _ => cicd_from_conclusion(conclusion),
    }
}

/// Maps a quality gate value. Any value other than `OK` is a failure.
pub fn quality_gate_from_value(value: Option<&str>) -> QualityGateStatus {
    match value {
        Some(GATE_OK) => QualityGateStatus::Passed,
        Some(_) => QualityGateStatus::Failed,
        None => QualityGateStatus::NotAvailable,
    }
}

/// Result of interpreting a coverage measure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CoverageValue {
    /// Parsed and clamped into `0..=100`.
    Measured(f64),
    /// No measure was returned.
    Missing,
    /// A measure was returned but is not a finite number.
    Unparsable,
}

impl CoverageValue {
    /// Percentage to publish; anything unmeasured collapses to `0`.
    pub fn percentage(self) -> f64 {
        match self {
            CoverageValue::Measured(p) => p,
            CoverageValue::Missing | CoverageValue::Unparsable => 0.0,
        }
    }
}

/// Interprets the first coverage measure value, if any.
pub fn coverage_from_measure(value: Option<&str>) -> CoverageValue {
    let Some(raw) = value else {
        return CoverageValue::Missing;
    };
    match raw.trim().parse::<f64>() {
        Ok(p) if p.is_finite() => CoverageValue::Measured(p.clamp(0.0, 100.0)),
        _ => CoverageValue::Unparsable,
    }
}
