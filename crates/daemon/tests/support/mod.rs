//! In-process stand-in for the GitHub and SonarCloud APIs.
#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use serde_json::Value;
use statusboard_daemon::config::{GithubConfig, SonarConfig, StatusConfig};

pub const GITHUB_TOKEN: &str = "test-github-token";
pub const SONAR_TOKEN: &str = "test-sonar-token";

pub const COMMIT_PATH: &str = "/repos/test-owner/test-repo/commits/main";
pub const RUNS_PATH: &str = "/repos/test-owner/test-repo/actions/workflows/ci.yml/runs";
pub const GATE_PATH: &str = "/api/qualitygates/project_status";
pub const MEASURES_PATH: &str = "/api/measures/component";

pub const ACTIONS_URL: &str = "https://github.com/test-owner/test-repo/actions";
pub const DASHBOARD_URL: &str = "https://sonarcloud.io/dashboard?id=test-project-key";
pub const COVERAGE_URL: &str =
    "https://sonarcloud.io/component_measures?id=test-project-key&metric=coverage";

/// A request the fake upstream received.
#[derive(Debug, Clone)]
pub struct Hit {
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub accept: Option<String>,
}

#[derive(Clone, Default)]
struct Shared {
    replies: Arc<Mutex<HashMap<String, (StatusCode, String)>>>,
    hits: Arc<Mutex<Vec<Hit>>>,
}

pub struct FakeUpstream {
    pub base: String,
    shared: Shared,
}

impl FakeUpstream {
    pub async fn start() -> Self {
        let shared = Shared::default();
        let app = Router::new().fallback(answer).with_state(shared.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base: format!("http://{addr}"),
            shared,
        }
    }

    pub fn ok(&self, path: &str, body: Value) -> &Self {
        self.reply(path, StatusCode::OK, body.to_string())
    }

    pub fn reply(&self, path: &str, status: StatusCode, body: impl Into<String>) -> &Self {
        self.shared
            .replies
            .lock()
            .unwrap()
            .insert(path.to_string(), (status, body.into()));
        self
    }

    pub fn hits(&self) -> Vec<Hit> {
        self.shared.hits.lock().unwrap().clone()
    }

    pub fn hit_paths(&self) -> Vec<String> {
        self.hits().into_iter().map(|h| h.path).collect()
    }

    /// Config pointing both providers at this server, with both tokens set.
    pub fn config(&self) -> StatusConfig {
        config_for(&self.base, Some(GITHUB_TOKEN), Some(SONAR_TOKEN))
    }
}

async fn answer(State(shared): State<Shared>, uri: Uri, headers: HeaderMap) -> Response {
    let text = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    shared.hits.lock().unwrap().push(Hit {
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        authorization: text(header::AUTHORIZATION),
        accept: text(header::ACCEPT),
    });

    let reply = shared.replies.lock().unwrap().get(uri.path()).cloned();
    match reply {
        Some((status, body)) => {
            (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

pub fn config_for(base: &str, github_token: Option<&str>, sonar_token: Option<&str>) -> StatusConfig {
    StatusConfig {
        github: GithubConfig {
            api_base: base.to_string(),
            web_base: "https://github.com".into(),
            owner: "test-owner".into(),
            repo: "test-repo".into(),
            workflow: "ci.yml".into(),
            branch: "main".into(),
            token: github_token.map(str::to_string),
            verify_head_sha: true,
        },
        sonar: SonarConfig {
            api_base: format!("{base}/api"),
            web_base: "https://sonarcloud.io".into(),
            project_key: "test-project-key".into(),
            token: sonar_token.map(str::to_string),
        },
        upstream_timeout: None,
    }
}

/// Base URL of a port nothing listens on.
pub async fn unreachable_base() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

/// Base URL of a server that accepts connections but never answers.
pub async fn silent_base() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    format!("http://{addr}")
}

pub fn client() -> reqwest::Client {
    reqwest::Client::new()
}

pub fn run(head_sha: &str, conclusion: Option<&str>, html_url: &str) -> Value {
    serde_json::json!({
        "workflow_runs": [{
            "head_sha": head_sha,
            "conclusion": conclusion,
            "html_url": html_url,
        }]
    })
}
