use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use reqwest::Url;
use tracing::debug;

use crate::request::TaskRequest;
use crate::response::TaskResponse;

use super::TaskClient;

/// Longest slice of a bad body quoted back in an error message.
const MAX_BODY_IN_ERROR: usize = 200;

/// POSTs tasks as JSON to a fixed endpoint. No auth, no retries, no timeout.
pub struct HttpTaskClient {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpTaskClient {
    pub fn new(endpoint: &str) -> Result<Self> {
        let url = Url::parse(endpoint).with_context(|| format!("invalid endpoint: {endpoint}"))?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!("unsupported endpoint scheme: {}", url.scheme());
        }
        Ok(Self {
            endpoint: endpoint.to_string(),
            client: reqwest::Client::new(),
        })
    }
}

#[async_trait]
impl TaskClient for HttpTaskClient {
    async fn submit(&self, request: &TaskRequest) -> Result<TaskResponse> {
        debug!(
            endpoint = %self.endpoint,
            user_id = %request.user_id,
            use_tools = request.use_tools,
            "submitting task"
        );

        let resp = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .with_context(|| format!("request to {} failed", self.endpoint))?;

        let status = resp.status();
        debug!(%status, "server replied");

        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            bail!("server returned {}: {}", status, truncate(&text));
        }

        let body = resp.text().await.context("failed to read response body")?;
        let value: serde_json::Value = serde_json::from_str(&body)
            .with_context(|| format!("server sent invalid JSON: {}", truncate(&body)))?;

        Ok(TaskResponse::new(value))
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn truncate(text: &str) -> &str {
    let text = text.trim();
    match text.char_indices().nth(MAX_BODY_IN_ERROR) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
