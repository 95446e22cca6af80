use std::net::SocketAddr;
use std::time::Duration;

/// GitHub Actions settings for the CI/CD badge.
#[derive(Debug, Clone)]
pub struct GithubConfig {
    /// REST API base, e.g. `https://api.github.com`.
    pub api_base: String,
    /// Web base used for human-facing links, e.g. `https://github.com`.
    pub web_base: String,
    pub owner: String,
    pub repo: String,
    /// Workflow file name or numeric id.
    pub workflow: String,
    pub branch: String,
    pub token: Option<String>,
    /// Cross-check the run's commit against the branch head.
    pub verify_head_sha: bool,
}

impl GithubConfig {
    /// Actions page for the repository; the fallback link for every CI badge.
    pub fn actions_url(&self) -> String {
        format!("{}/{}/{}/actions", self.web_base, self.owner, self.repo)
    }

    pub fn commit_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/commits/{}",
            self.api_base, self.owner, self.repo, self.branch
        )
    }

    pub fn workflow_runs_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/actions/workflows/{}/runs",
            self.api_base, self.owner, self.repo, self.workflow
        )
    }
}

/// SonarCloud settings for the quality gate and coverage badges.
#[derive(Debug, Clone)]
pub struct SonarConfig {
    /// Web API base, e.g. `https://sonarcloud.io/api`.
    pub api_base: String,
    /// Web base, e.g. `https://sonarcloud.io`.
    pub web_base: String,
    pub project_key: String,
    pub token: Option<String>,
}

impl SonarConfig {
    pub fn dashboard_url(&self) -> String {
        format!("{}/dashboard?id={}", self.web_base, self.project_key)
    }

    pub fn coverage_url(&self) -> String {
        format!(
            "{}/component_measures?id={}&metric=coverage",
            self.web_base, self.project_key
        )
    }
}

/// Everything the provider clients need. Built once at startup and shared
/// read-only.
#[derive(Debug, Clone)]
pub struct StatusConfig {
    pub github: GithubConfig,
    pub sonar: SonarConfig,
    /// Per-request timeout for upstream calls; `None` waits indefinitely.
    pub upstream_timeout: Option<Duration>,
}

#[derive(Debug, Clone)]
pub struct DaemonConfig {
    pub listen: SocketAddr,
    pub status: StatusConfig,
    /// When set, status responses carry `Cache-Control: public, max-age=N`.
    pub cache_max_age_seconds: Option<u64>,
    /// Origin allowed to read the status API cross-origin.
    pub allow_origin: Option<String>,
}

/// Empty or whitespace-only tokens count as not configured.
pub fn normalize_token(token: Option<String>) -> Option<String> {
    token
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

pub fn normalize_base(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
