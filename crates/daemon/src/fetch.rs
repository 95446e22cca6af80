//! Shared request plumbing for the provider clients.
//!
//! Every provider call goes through [`fetch_json`] (request descriptor, 2xx
//! check, typed decode) and is wrapped in [`degrade`], which owns the
//! "token missing" and "call failed" fallbacks so the clients only describe
//! requests and map payloads.

use std::future::Future;

use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, error, info};

use crate::config::StatusConfig;
use crate::error::FetchError;

const USER_AGENT: &str = concat!("statusboard/", env!("CARGO_PKG_VERSION"));

/// Authorization scheme for a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Auth {
    /// `Authorization: token <t>` (GitHub).
    Token(String),
    /// `Authorization: Bearer <t>` (SonarCloud).
    Bearer(String),
}

impl Auth {
    pub fn header_value(&self) -> String {
        match self {
            Auth::Token(t) => format!("token {t}"),
            Auth::Bearer(t) => format!("Bearer {t}"),
        }
    }
}

/// One outbound GET.
#[derive(Debug, Clone)]
pub struct ProviderRequest {
    pub url: Url,
    pub auth: Auth,
    pub accept: Option<&'static str>,
}

impl ProviderRequest {
    pub fn get(url: &str, params: &[(&str, &str)], auth: Auth) -> Result<Self, FetchError> {
        let parsed = if params.is_empty() {
            Url::parse(url)
        } else {
            Url::parse_with_params(url, params)
        };
        let url = parsed.map_err(|e| FetchError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            url,
            auth,
            accept: None,
        })
    }

    pub fn accept(mut self, accept: &'static str) -> Self {
        self.accept = Some(accept);
        self
    }
}

/// HTTP client shared by all provider calls.
pub fn build_client(config: &StatusConfig) -> reqwest::Result<Client> {
    let mut builder = Client::builder().user_agent(USER_AGENT);
    if let Some(timeout) = config.upstream_timeout {
        builder = builder.timeout(timeout);
    }
    builder.build()
}

/// Sends the request and decodes a 2xx JSON body.
pub async fn fetch_json<T: DeserializeOwned>(
    client: &Client,
    req: &ProviderRequest,
) -> Result<T, FetchError> {
    debug!(url = %req.url, "provider request");

    let mut builder = client
        .get(req.url.clone())
        .header(AUTHORIZATION, req.auth.header_value());
    if let Some(accept) = req.accept {
        builder = builder.header(ACCEPT, accept);
    }

    let resp = builder.send().await.map_err(FetchError::Transport)?;
    let status = resp.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            code: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
        });
    }
    resp.json::<T>().await.map_err(FetchError::Decode)
}

/// Runs `fetch` with the configured token, absorbing every failure.
///
/// No call is made when the token is absent. Errors are logged and replaced
/// by `fallback`; this function never fails.
pub async fn degrade<R, F, Fut>(
    provider: &'static str,
    what: &'static str,
    token: Option<&str>,
    fallback: impl FnOnce() -> R,
    fetch: F,
) -> R
where
    F: FnOnce(String) -> Fut,
    Fut: Future<Output = Result<R, FetchError>>,
{
    let Some(token) = token.filter(|t| !t.trim().is_empty()) else {
        info!(provider, "{provider} token is not configured");
        return fallback();
    };

    match fetch(token.to_string()).await {
        Ok(result) => result,
        Err(e) => {
            error!(provider, error = %e, timeout = e.is_timeout(), "error fetching {what}: {e}");
            fallback()
        }
    }
}
