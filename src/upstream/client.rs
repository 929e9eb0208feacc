//! reqwest-backed `LegalService`.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;
use tracing::{debug, warn};

use super::{upstream_message, LegalService, UpstreamCall, UpstreamMethod};
use crate::auth::USER_ID_HEADER;
use crate::error::UpstreamError;

/// HTTP client for the RAG service, shared by every request.
#[derive(Debug, Clone)]
pub struct HttpLegalService {
    client: Client,
    base_url: Url,
}

impl HttpLegalService {
    /// Builds a client for `base_url` whose calls give up after `timeout`.
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("invalid RAG service URL: {base_url}"))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("RAG service URL cannot be used as a base: {base_url}");
        }
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build upstream HTTP client")?;

        Ok(Self { client, base_url })
    }

    fn url_for(&self, call: &UpstreamCall) -> Result<Url, UpstreamError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| UpstreamError {
                status: None,
                message: Some("RAG service URL cannot be a base".to_string()),
            })?;
            segments.pop_if_empty().extend(call.segments.iter());
        }
        Ok(url)
    }
}

#[async_trait]
impl LegalService for HttpLegalService {
    async fn forward(&self, call: &UpstreamCall, user_id: &str) -> Result<Value, UpstreamError> {
        let url = self.url_for(call)?;
        debug!(%url, "Forwarding to RAG service");

        let mut request = match call.method {
            UpstreamMethod::Get => self.client.get(url),
            UpstreamMethod::Post => self.client.post(url),
        }
        .header(USER_ID_HEADER, user_id);

        if !call.query.is_empty() {
            request = request.query(&call.query);
        }
        if let Some(body) = &call.body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            warn!(path = %call.path(), error = %e, "RAG service unreachable");
            UpstreamError {
                status: None,
                message: Some(if e.is_timeout() {
                    "RAG service timed out".to_string()
                } else {
                    format!("RAG service unreachable: {e}")
                }),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<Value>()
                .await
                .ok()
                .and_then(|body| upstream_message(&body));
            return Err(UpstreamError {
                status: Some(status.as_u16()),
                message,
            });
        }

        response.json::<Value>().await.map_err(|e| UpstreamError {
            status: None,
            message: Some(format!("RAG service returned invalid JSON: {e}")),
        })
    }
}
