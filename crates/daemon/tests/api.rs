//! HTTP contract of the status endpoint.

mod support;

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::HeaderValue;
use serde_json::{json, Value};
use statusboard_core::{
    CicdResult, CicdStatus, CoverageResult, QualityGateResult, QualityGateStatus, StatusSnapshot,
};
use statusboard_daemon::aggregator::{ProviderStatusSource, StatusSource};
use statusboard_daemon::api::{self, AppState};
use support::*;

struct FixedSource;

#[async_trait]
impl StatusSource for FixedSource {
    async fn cicd(&self) -> CicdResult {
        CicdResult {
            status: CicdStatus::Failing,
            url: "https://github.com/test-owner/test-repo/actions/runs/9".into(),
        }
    }

    async fn quality_gate(&self) -> QualityGateResult {
        QualityGateResult {
            status: QualityGateStatus::Passed,
            url: DASHBOARD_URL.into(),
        }
    }

    async fn test_coverage(&self) -> CoverageResult {
        CoverageResult::unavailable(ACTIONS_URL)
    }
}

struct BrokenSource;

#[async_trait]
impl StatusSource for BrokenSource {
    async fn cicd(&self) -> CicdResult {
        panic!("aggregation bug");
    }

    async fn quality_gate(&self) -> QualityGateResult {
        QualityGateResult::not_available(DASHBOARD_URL)
    }

    async fn test_coverage(&self) -> CoverageResult {
        CoverageResult::unavailable(ACTIONS_URL)
    }
}

async fn serve(state: AppState, allow_origin: Option<HeaderValue>) -> String {
    let app = api::router(state, allow_origin);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn test_status_endpoint_returns_snapshot() {
    let base = serve(AppState::new(Arc::new(FixedSource), None), None).await;

    let resp = client()
        .get(format!("{base}/api/app-status"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert!(resp.headers().get("cache-control").is_none());

    let body: Value = resp.json().await.unwrap();
    assert_eq!(
        body,
        json!({
            "cicd": {
                "status": "failing",
                "url": "https://github.com/test-owner/test-repo/actions/runs/9"
            },
            "qualityGate": { "status": "passed", "url": DASHBOARD_URL },
            "testCoverage": { "percentage": 0.0, "url": ACTIONS_URL }
        })
    );
}

#[tokio::test]
async fn test_status_endpoint_panic_is_500() {
    let base = serve(AppState::new(Arc::new(BrokenSource), None), None).await;

    let resp = client()
        .get(format!("{base}/api/app-status"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 500);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "error": api::STATUS_ERROR_MESSAGE }));
}

#[tokio::test]
async fn test_cache_header_when_configured() {
    let base = serve(AppState::new(Arc::new(FixedSource), Some(60)), None).await;

    let resp = client()
        .get(format!("{base}/api/app-status"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("cache-control").unwrap(),
        "public, max-age=60"
    );
}

#[tokio::test]
async fn test_cors_allows_configured_origin() {
    let origin = HeaderValue::from_static("https://portfolio.example");
    let base = serve(AppState::new(Arc::new(FixedSource), None), Some(origin)).await;

    let resp = client()
        .get(format!("{base}/api/app-status"))
        .header("origin", "https://portfolio.example")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("access-control-allow-origin").unwrap(),
        "https://portfolio.example"
    );
}

#[tokio::test]
async fn test_healthz() {
    let base = serve(AppState::new(Arc::new(FixedSource), None), None).await;

    let resp = client().get(format!("{base}/healthz")).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "ok");
}

#[tokio::test]
async fn test_unconfigured_daemon_still_answers_200() {
    let upstream = FakeUpstream::start().await;
    let config = config_for(&upstream.base, Some(""), None);
    let source = ProviderStatusSource::new(Arc::new(config)).unwrap();
    let base = serve(AppState::new(Arc::new(source), None), None).await;

    let resp = client()
        .get(format!("{base}/api/app-status"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let snapshot: StatusSnapshot = resp.json().await.unwrap();
    assert_eq!(snapshot.cicd, CicdResult::not_available(ACTIONS_URL));
    assert_eq!(snapshot.quality_gate, QualityGateResult::not_available(DASHBOARD_URL));
    assert_eq!(snapshot.test_coverage, CoverageResult::unavailable(ACTIONS_URL));
    assert!(upstream.hits().is_empty());
}

#[tokio::test]
async fn test_mixed_upstream_outcomes_yield_full_body() {
    let upstream = FakeUpstream::start().await;
    upstream
        .ok(COMMIT_PATH, json!({ "sha": "sha-1" }))
        .ok(RUNS_PATH, run("sha-1", None, "https://x/actions/runs/2"))
        .ok(GATE_PATH, json!({ "projectStatus": { "status": "WARN" } }));
    let source = ProviderStatusSource::new(Arc::new(upstream.config())).unwrap();
    let base = serve(AppState::new(Arc::new(source), None), None).await;

    let body: Value = client()
        .get(format!("{base}/api/app-status"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["cicd"]["status"], "pending");
    assert_eq!(body["cicd"]["url"], "https://x/actions/runs/2");
    assert_eq!(body["qualityGate"]["status"], "failed");
    assert_eq!(body["testCoverage"]["percentage"], 0.0);
    assert_eq!(body["testCoverage"]["url"], ACTIONS_URL);
}
