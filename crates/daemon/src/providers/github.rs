//! GitHub Actions client for the CI/CD badge.

use reqwest::Client;
use serde::Deserialize;
use statusboard_core::normalize::cicd_for_head;
use statusboard_core::{CicdResult, CicdStatus};
use tracing::debug;

use crate::config::GithubConfig;
use crate::error::FetchError;
use crate::fetch::{degrade, fetch_json, Auth, ProviderRequest};

const ACCEPT_V3: &str = "application/vnd.github.v3+json";

#[derive(Debug, Deserialize)]
struct CommitResponse {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct WorkflowRunsResponse {
    #[serde(default)]
    workflow_runs: Vec<WorkflowRun>,
}

#[derive(Debug, Deserialize)]
struct WorkflowRun {
    #[serde(default)]
    head_sha: Option<String>,
    #[serde(default)]
    conclusion: Option<String>,
    #[serde(default)]
    html_url: Option<String>,
}

/// Status of the latest workflow run on the configured branch.
///
/// With `verify_head_sha` set, a run that was not built from the current
/// branch head is reported as pending.
pub async fn fetch_cicd_status(client: &Client, config: &GithubConfig) -> CicdResult {
    let fallback_url = config.actions_url();
    degrade(
        "GitHub",
        "CI/CD status",
        config.token.as_deref(),
        || CicdResult::not_available(fallback_url.clone()),
        |token| latest_run(client, config, token, fallback_url.clone()),
    )
    .await
}

async fn latest_run(
    client: &Client,
    config: &GithubConfig,
    token: String,
    fallback_url: String,
) -> Result<CicdResult, FetchError> {
    let head_sha = if config.verify_head_sha {
        let req = ProviderRequest::get(&config.commit_url(), &[], Auth::Token(token.clone()))?
            .accept(ACCEPT_V3);
        let commit: CommitResponse = fetch_json(client, &req).await?;
        Some(commit.sha)
    } else {
        None
    };

    let req = ProviderRequest::get(
        &config.workflow_runs_url(),
        &[("branch", config.branch.as_str()), ("per_page", "1")],
        Auth::Token(token),
    )?
    .accept(ACCEPT_V3);
    let runs: WorkflowRunsResponse = fetch_json(client, &req).await?;

    let Some(run) = runs.workflow_runs.into_iter().next() else {
        debug!(workflow = %config.workflow, "no workflow runs");
        return Ok(CicdResult::not_available(fallback_url));
    };

    let status = cicd_for_head(
        run.conclusion.as_deref(),
        run.head_sha.as_deref(),
        head_sha.as_deref(),
    );
    if status == CicdStatus::Pending && run.conclusion.is_some() {
        debug!(run_sha = ?run.head_sha, head_sha = ?head_sha, "latest run is not for branch head");
    }

    Ok(CicdResult {
        status,
        url: run
            .html_url
            .filter(|u| !u.trim().is_empty())
            .unwrap_or(fallback_url),
    })
}
