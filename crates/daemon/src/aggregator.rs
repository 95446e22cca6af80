use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use statusboard_core::{CicdResult, CoverageResult, QualityGateResult, StatusSnapshot};

use crate::config::StatusConfig;
use crate::providers;

/// Source of the three badge results. Implementations must not fail; each
/// method returns its own sentinel when data is unavailable.
#[async_trait]
pub trait StatusSource: Send + Sync {
    async fn cicd(&self) -> CicdResult;
    async fn quality_gate(&self) -> QualityGateResult;
    async fn test_coverage(&self) -> CoverageResult;
}

/// Queries GitHub and SonarCloud with a shared HTTP client.
pub struct ProviderStatusSource {
    client: Client,
    config: Arc<StatusConfig>,
}

impl ProviderStatusSource {
    pub fn new(config: Arc<StatusConfig>) -> reqwest::Result<Self> {
        let client = crate::fetch::build_client(&config)?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl StatusSource for ProviderStatusSource {
    async fn cicd(&self) -> CicdResult {
        providers::fetch_cicd_status(&self.client, &self.config.github).await
    }

    async fn quality_gate(&self) -> QualityGateResult {
        providers::fetch_quality_gate_status(&self.client, &self.config.sonar).await
    }

    async fn test_coverage(&self) -> CoverageResult {
        providers::fetch_test_coverage(&self.client, &self.config.sonar, &self.config.github)
            .await
    }
}

/// Runs the three lookups concurrently and assembles the snapshot.
pub async fn collect_snapshot(source: &dyn StatusSource) -> StatusSnapshot {
    let (cicd, quality_gate, test_coverage) = tokio::join!(
        source.cicd(),
        source.quality_gate(),
        source.test_coverage()
    );
    StatusSnapshot {
        cicd,
        quality_gate,
        test_coverage,
    }
}
