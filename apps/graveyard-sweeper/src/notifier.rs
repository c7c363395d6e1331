//! Webhook notifier for successful moves.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use graveyard_engine::prelude::*;

use crate::directory::{request_error, status_error};

const PUBLISH_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Serialize)]
struct WebhookMessage<'a> {
    subject: &'a str,
    message: &'a str,
}

/// Posts `{subject, message}` JSON to a configured webhook URL.
///
/// Delivery is best-effort; the engine logs and swallows any error this
/// returns.
pub struct WebhookNotifier {
    client: Client,
    url: String,
}

impl WebhookNotifier {
    pub fn new(url: impl Into<String>) -> EngineResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(PUBLISH_TIMEOUT_SECS))
            .build()
            .map_err(|e| EngineError::directory_with_source("failed to build HTTP client", e))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn publish(&self, subject: &str, message: &str) -> EngineResult<()> {
        let response = self
            .client
            .post(&self.url)
            .json(&WebhookMessage { subject, message })
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(status_error(status, "publish notification"));
        }
        Ok(())
    }
}
