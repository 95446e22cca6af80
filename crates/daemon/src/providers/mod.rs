//! Upstream provider clients. Each fetcher is infallible: failures degrade to
//! the `not_available` / `0` sentinels.

pub mod github;
pub mod sonar;

pub use github::fetch_cicd_status;
pub use sonar::{fetch_quality_gate_status, fetch_test_coverage};
