//! Badge classification for rendering a snapshot.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{CicdStatus, CoverageResult, QualityGateStatus, StatusSnapshot};

/// Coverage at or above this is green.
pub const COVERAGE_GOOD: f64 = 90.0;
/// Coverage at or above this (and below [`COVERAGE_GOOD`]) is yellow.
pub const COVERAGE_FAIR: f64 = 70.0;

/// Colour family a badge is drawn with.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BadgeTone {
    /// Passing CI or good coverage.
    Green,
    /// Passed quality gate.
    Blue,
    /// Pending, or fair coverage.
    Yellow,
    /// Failing, or low coverage.
    Red,
    /// Nothing to report.
    Gray,
}

impl fmt::Display for BadgeTone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BadgeTone::Green => "green",
            BadgeTone::Blue => "blue",
            BadgeTone::Yellow => "yellow",
            BadgeTone::Red => "red",
            BadgeTone::Gray => "gray",
        };
        f.write_str(s)
    }
}

impl CicdStatus {
    /// Badge colour for this status.
    pub fn tone(self) -> BadgeTone {
        match self {
            CicdStatus::Passing => BadgeTone::Green,
            CicdStatus::Failing => BadgeTone::Red,
            CicdStatus::NotAvailable => BadgeTone::Gray,
            CicdStatus::Pending => BadgeTone::Yellow,
        }
    }

    /// Badge text for this status.
    pub fn label(self) -> &'static str {
        match self {
            CicdStatus::Passing => "passing",
            CicdStatus::Failing => "failing",
            CicdStatus::Pending => "pending",
            CicdStatus::NotAvailable => "not available",
        }
    }
}

impl QualityGateStatus {
    /// Badge colour for this status.
    pub fn tone(self) -> BadgeTone {
        match self {
            QualityGateStatus::Passed => BadgeTone::Blue,
            QualityGateStatus::Failed => BadgeTone::Red,
            QualityGateStatus::NotAvailable => BadgeTone::Gray,
            QualityGateStatus::Pending => BadgeTone::Yellow,
        }
    }

    /// Badge text for this status.
    pub fn label(self) -> &'static str {
        match self {
            QualityGateStatus::Passed => "passed",
            QualityGateStatus::Failed => "failed",
            QualityGateStatus::Pending => "pending",
            QualityGateStatus::NotAvailable => "not available",
        }
    }
}

impl CoverageResult {
    /// Green from [`COVERAGE_GOOD`], yellow from [`COVERAGE_FAIR`], red for
    /// anything else measured, gray when unmeasured.
    pub fn tone(&self) -> BadgeTone {
        if self.percentage >= COVERAGE_GOOD {
            BadgeTone::Green
        } else if self.percentage >= COVERAGE_FAIR {
            BadgeTone::Yellow
        } else if self.percentage > 0.0 {
            BadgeTone::Red
        } else {
            BadgeTone::Gray
        }
    }

    /// `"<n>%"`, or `"not available"` when unmeasured.
    pub fn label(&self) -> String {
        if self.is_measured() {
            format!("{}%", self.percentage)
        } else {
            "not available".to_string()
        }
    }
}

/// One rendered badge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    /// Badge caption, e.g. `CI/CD`.
    pub name: &'static str,
    /// Status text shown next to the caption.
    pub text: String,
    /// Colour.
    pub tone: BadgeTone,
    /// Link target.
    pub url: String,
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} [{}] {}", self.name, self.text, self.tone, self.url)
    }
}

/// Badges in widget order: CI/CD, quality gate, coverage.
pub fn badges(snapshot: &StatusSnapshot) -> [Badge; 3] {
    [
        Badge {
            name: "CI/CD",
            text: snapshot.cicd.status.label().to_string(),
            tone: snapshot.cicd.status.tone(),
            url: snapshot.cicd.url.clone(),
        },
        Badge {
            name: "Quality Gate",
            text: snapshot.quality_gate.status.label().to_string(),
            tone: snapshot.quality_gate.status.tone(),
            url: snapshot.quality_gate.url.clone(),
        },
        Badge {
            name: "Coverage",
            text: snapshot.test_coverage.label(),
            tone: snapshot.test_coverage.tone(),
            url: snapshot.test_coverage.url.clone(),
        },
    ]
}
