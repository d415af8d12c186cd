// =============================================================================
// Notifiers — Fan-out delivery of signal messages
// =============================================================================
//
// The engine hands every signal to a `Notifier` as a `(title, message)` pair
// and moves on; delivery is best-effort and never blocks or fails a polling
// cycle.  `NotifierStack` tries its channels in order until one accepts the
// message, so a dead webhook degrades to console output instead of silence.

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{debug, warn};

/// A notification channel. Implementations must be cheap to call once per
/// polling cycle per index.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, title: &str, message: &str) -> Result<()>;
}

// =============================================================================
// Console
// =============================================================================

/// Prints the notification to stdout and rings the terminal bell.
///
/// Always succeeds; this is the channel of last resort.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

#[async_trait]
impl Notifier for ConsoleNotifier {
    async fn send(&self, title: &str, message: &str) -> Result<()> {
        println!("\n\u{1F514} {title}\n{message}\n\u{0007}");
        Ok(())
    }
}

// =============================================================================
// Webhook
// =============================================================================

/// POSTs the notification as JSON to a configured URL (chat webhook, home
/// automation hook, anything that accepts `{title, text}`).
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    url: String,
    client: reqwest::Client,
}

impl WebhookNotifier {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(10))
                .build()
                .expect("failed to build reqwest client for WebhookNotifier"),
        }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn send(&self, title: &str, message: &str) -> Result<()> {
        let body = serde_json::json!({
            "title": title,
            "text": message,
        });

        let resp = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .with_context(|| format!("POST to webhook {} failed", self.url))?;

        let status = resp.status();
        if !status.is_success() {
            anyhow::bail!("webhook {} returned {}", self.url, status);
        }

        debug!(url = %self.url, "webhook notification delivered");
        Ok(())
    }
}

// =============================================================================
// Stack
// =============================================================================

/// Tries each channel in order and stops at the first success.
pub struct NotifierStack {
    channels: Vec<Box<dyn Notifier>>,
}

impl NotifierStack {
    pub fn new(channels: Vec<Box<dyn Notifier>>) -> Self {
        Self { channels }
    }
}

#[async_trait]
impl Notifier for NotifierStack {
    async fn send(&self, title: &str, message: &str) -> Result<()> {
        for channel in &self.channels {
            match channel.send(title, message).await {
                Ok(()) => return Ok(()),
                Err(e) => warn!(error = %e, "notification channel failed, trying next"),
            }
        }
        anyhow::bail!("all notification channels failed")
    }
}
