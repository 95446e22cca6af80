use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::http::HeaderValue;
use clap::Parser;
use statusboard_daemon::{
    aggregator::ProviderStatusSource,
    api,
    config::{normalize_base, normalize_token, DaemonConfig, GithubConfig, SonarConfig, StatusConfig},
};
use tokio::signal;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Debug, Parser)]
#[command(name = "statusboard-daemon", version, about = "CI and code-quality status proxy for the portfolio badges")]
struct Cli {
    /// Where the HTTP API will listen, e.g. 127.0.0.1:8080
    #[arg(long, env = "STATUSBOARD_LISTEN", default_value = "127.0.0.1:8080")]
    listen: String,

    /// GitHub token. Without it the CI/CD badge reports not_available.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    github_token: Option<String>,

    #[arg(long, env = "REPO_OWNER", default_value = "gimhanr9")]
    repo_owner: String,

    #[arg(long, env = "REPO_NAME", default_value = "portfolio-nextjs")]
    repo_name: String,

    /// Workflow file name (or id) whose runs drive the CI/CD badge.
    #[arg(long, env = "GITHUB_WORKFLOW_FILE", default_value = "ci.yml")]
    workflow: String,

    #[arg(long, env = "GITHUB_BRANCH", default_value = "main")]
    branch: String,

    /// Trust the latest run even when it was built from an older commit.
    #[arg(long, default_value_t = false)]
    no_verify_head_sha: bool,

    #[arg(long, env = "GITHUB_API_URL", default_value = "https://api.github.com")]
    github_api: String,

    #[arg(long, env = "GITHUB_WEB_URL", default_value = "https://github.com")]
    github_web: String,

    /// SonarCloud token. Without it the quality gate and coverage badges report not_available.
    #[arg(long, env = "SONAR_TOKEN", hide_env_values = true)]
    sonar_token: Option<String>,

    #[arg(long, env = "SONAR_PROJECT_KEY", default_value = "gimhanr9_portfolio-nextjs")]
    sonar_project_key: String,

    #[arg(long, env = "SONAR_API_URL", default_value = "https://sonarcloud.io/api")]
    sonar_api: String,

    #[arg(long, env = "SONAR_WEB_URL", default_value = "https://sonarcloud.io")]
    sonar_web: String,

    /// Timeout for each upstream call in seconds; 0 disables it.
    #[arg(long, env = "STATUSBOARD_UPSTREAM_TIMEOUT", default_value_t = 10)]
    upstream_timeout_seconds: u64,

    /// Adds `Cache-Control: public, max-age=N` to status responses.
    #[arg(long, env = "STATUSBOARD_CACHE_MAX_AGE")]
    cache_max_age_seconds: Option<u64>,

    /// Origin allowed to call the status API cross-origin, e.g. https://example.com
    #[arg(long, env = "STATUSBOARD_ALLOW_ORIGIN")]
    allow_origin: Option<String>,

    /// Log level (env-filter syntax).
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    log: String,
}

impl Cli {
    fn into_config(self) -> anyhow::Result<DaemonConfig> {
        let listen: SocketAddr = self
            .listen
            .parse()
            .with_context(|| format!("invalid listen address {}", self.listen))?;

        let github = GithubConfig {
            api_base: normalize_base(&self.github_api),
            web_base: normalize_base(&self.github_web),
            owner: self.repo_owner,
            repo: self.repo_name,
            workflow: self.workflow,
            branch: self.branch,
            token: normalize_token(self.github_token),
            verify_head_sha: !self.no_verify_head_sha,
        };
        let sonar = SonarConfig {
            api_base: normalize_base(&self.sonar_api),
            web_base: normalize_base(&self.sonar_web),
            project_key: self.sonar_project_key,
            token: normalize_token(self.sonar_token),
        };
        let upstream_timeout = (self.upstream_timeout_seconds > 0)
            .then(|| Duration::from_secs(self.upstream_timeout_seconds));

        Ok(DaemonConfig {
            listen,
            status: StatusConfig {
                github,
                sonar,
                upstream_timeout,
            },
            cache_max_age_seconds: self.cache_max_age_seconds,
            allow_origin: self.allow_origin,
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    fmt()
        .with_target(false)
        .with_env_filter(EnvFilter::new(&cli.log))
        .init();

    let config = cli.into_config()?;
    info!(
        listen = %config.listen,
        repo = %format!("{}/{}", config.status.github.owner, config.status.github.repo),
        github_configured = config.status.github.token.is_some(),
        sonar_project = %config.status.sonar.project_key,
        sonar_configured = config.status.sonar.token.is_some(),
        "starting statusboard daemon"
    );

    let allow_origin = config
        .allow_origin
        .as_deref()
        .map(HeaderValue::from_str)
        .transpose()
        .context("invalid --allow-origin")?;

    let source = ProviderStatusSource::new(Arc::new(config.status.clone()))
        .context("build upstream http client")?;
    let state = api::AppState::new(Arc::new(source), config.cache_max_age_seconds);
    let app = api::router(state, allow_origin);

    let listener = tokio::net::TcpListener::bind(config.listen)
        .await
        .with_context(|| format!("bind {}", config.listen))?;
    info!("listening on http://{}", config.listen);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = signal::ctrl_c().await;
    info!("shutdown requested");
}
