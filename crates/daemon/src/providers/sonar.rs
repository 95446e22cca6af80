//! SonarCloud client for the quality gate and coverage badges.

use reqwest::Client;
use serde::Deserialize;
use statusboard_core::normalize::{coverage_from_measure, quality_gate_from_value, CoverageValue};
use statusboard_core::{CoverageResult, QualityGateResult};
use tracing::warn;

use crate::config::{GithubConfig, SonarConfig};
use crate::error::FetchError;
use crate::fetch::{degrade, fetch_json, Auth, ProviderRequest};

const ACCEPT_JSON: &str = "application/json";

#[derive(Debug, Deserialize)]
struct ProjectStatusResponse {
    #[serde(rename = "projectStatus", default)]
    project_status: Option<ProjectStatus>,
}

#[derive(Debug, Deserialize)]
struct ProjectStatus {
    #[serde(default)]
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MeasuresResponse {
    #[serde(default)]
    component: Option<Component>,
}

#[derive(Debug, Deserialize)]
struct Component {
    #[serde(default)]
    measures: Vec<Measure>,
}

#[derive(Debug, Deserialize)]
struct Measure {
    #[serde(default)]
    value: Option<String>,
}

/// Latest quality gate result. The link is always the project dashboard.
pub async fn fetch_quality_gate_status(client: &Client, config: &SonarConfig) -> QualityGateResult {
    let url = config.dashboard_url();
    let url = url.as_str();
    degrade(
        "SonarQube",
        "quality gate status",
        config.token.as_deref(),
        || QualityGateResult::not_available(url),
        |token| async move {
            let req = ProviderRequest::get(
                &format!("{}/qualitygates/project_status", config.api_base),
                &[("projectKey", config.project_key.as_str())],
                Auth::Bearer(token),
            )?
            .accept(ACCEPT_JSON);
            let body: ProjectStatusResponse = fetch_json(client, &req).await?;
            let value = body.project_status.and_then(|p| p.status);
            Ok::<_, FetchError>(QualityGateResult {
                status: quality_gate_from_value(value.as_deref()),
                url: url.to_string(),
            })
        },
    )
    .await
}

/// Coverage percentage for the project.
///
/// When the measurement cannot be fetched, the link falls back to the GitHub
/// actions page rather than the coverage page.
pub async fn fetch_test_coverage(
    client: &Client,
    config: &SonarConfig,
    github: &GithubConfig,
) -> CoverageResult {
    degrade(
        "SonarQube",
        "test coverage",
        config.token.as_deref(),
        || CoverageResult::unavailable(github.actions_url()),
        |token| async move {
            let req = ProviderRequest::get(
                &format!("{}/measures/component", config.api_base),
                &[
                    ("component", config.project_key.as_str()),
                    ("metricKeys", "coverage"),
                ],
                Auth::Bearer(token),
            )?
            .accept(ACCEPT_JSON);
            let body: MeasuresResponse = fetch_json(client, &req).await?;
            let value = body
                .component
                .and_then(|c| c.measures.into_iter().next())
                .and_then(|m| m.value);

            let coverage = coverage_from_measure(value.as_deref());
            if coverage == CoverageValue::Unparsable {
                warn!(value = ?value, "coverage measure is not a number");
            }
            Ok::<_, FetchError>(CoverageResult {
                percentage: coverage.percentage(),
                url: config.coverage_url(),
            })
        },
    )
    .await
}
