//! Wire model of the status snapshot.

use serde::{Deserialize, Serialize};

/// Outcome of the latest workflow run on the mainline branch.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CicdStatus {
    /// Latest run concluded successfully.
    Passing,
    /// Latest run concluded with any non-success conclusion.
    Failing,
    /// Run still in progress, or it was not built from the current head.
    Pending,
    /// Not configured, or the provider could not be reached.
    NotAvailable,
}

/// Latest quality gate evaluation for the tracked project.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum QualityGateStatus {
    /// Gate reported `OK`.
    Passed,
    /// Gate reported anything else (`ERROR`, `WARN`, ...).
    Failed,
    /// Evaluation not finished yet.
    Pending,
    /// Not configured, or the provider could not be reached.
    NotAvailable,
}

/// CI/CD badge payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CicdResult {
    /// Normalized run outcome.
    pub status: CicdStatus,
    /// Latest run page, or the workflow list when there is no run to link.
    pub url: String,
}

/// Quality gate badge payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QualityGateResult {
    /// Normalized gate outcome.
    pub status: QualityGateStatus,
    /// Project dashboard.
    pub url: String,
}

/// Coverage badge payload.
///
/// `percentage` is always within `0..=100`. A value of `0` is also what the
/// fetcher reports when no measurement could be obtained.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoverageResult {
    /// Line coverage in percent.
    pub percentage: f64,
    /// Coverage measures page, or the CI page when coverage is unavailable.
    pub url: String,
}

/// Composite status served to the badge widget.
///
/// Every field is always populated; unavailable data is expressed with the
/// `not_available` / `0` sentinels rather than missing keys.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatusSnapshot {
    /// CI/CD badge.
    pub cicd: CicdResult,
    /// Quality gate badge.
    pub quality_gate: QualityGateResult,
    /// Coverage badge.
    pub test_coverage: CoverageResult,
}

/// Body returned with non-2xx responses from the status API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    /// Human-readable message; never carries upstream details.
    pub error: String,
}

impl CicdResult {
    /// Result with [`CicdStatus::NotAvailable`] linking to `url`.
    pub fn not_available(url: impl Into<String>) -> Self {
        Self {
            status: CicdStatus::NotAvailable,
            url: url.into(),
        }
    }
}

impl QualityGateResult {
    /// Result with [`QualityGateStatus::NotAvailable`] linking to `url`.
    pub fn not_available(url: impl Into<String>) -> Self {
        Self {
            status: QualityGateStatus::NotAvailable,
            url: url.into(),
        }
    }
}

impl CoverageResult {
    /// Zero coverage linking to `url`.
    pub fn unavailable(url: impl Into<String>) -> Self {
        Self {
            percentage: 0.0,
            url: url.into(),
        }
    }

    /// Replaces the percentage.
    pub fn with_percentage(mut self, percentage: f64) -> Self {
        self.percentage = percentage;
        self
    }

    /// True when a non-zero measurement was reported.
    pub fn is_measured(&self) -> bool {
        self.percentage > 0.0
    }
}
