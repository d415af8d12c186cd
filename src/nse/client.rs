// =============================================================================
// NSE REST API Client — Public option-chain endpoints
// =============================================================================
//
// The option-chain endpoints are public but sit behind bot protection that
// rejects bare requests: every call needs browser-like headers and the
// session cookies handed out by the site root.  `prime()` performs that
// warm-up GET; the cookie store on the underlying client carries the result
// into subsequent API calls.
// =============================================================================

use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::{debug, instrument};

/// Headers NSE expects on API traffic.
const USER_AGENT: &str = "Mozilla/5.0";
const ACCEPT: &str = "application/json";
const REFERER: &str = "https://www.nseindia.com";

/// NSE REST client for index option chains.
#[derive(Debug, Clone)]
pub struct NseClient {
    base_url: String,
    client: reqwest::Client,
}

impl NseClient {
    /// Create a new client with browser-like default headers and an enabled
    /// cookie store.
    pub fn new() -> Self {
        Self::with_base_url("https://www.nseindia.com")
    }

    /// Create a client against a non-default base URL (tests, mirrors).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let mut default_headers = HeaderMap::new();
        default_headers.insert("User-Agent", HeaderValue::from_static(USER_AGENT));
        default_headers.insert("Accept", HeaderValue::from_static(ACCEPT));
        default_headers.insert("Referer", HeaderValue::from_static(REFERER));

        let client = reqwest::Client::builder()
            .default_headers(default_headers)
            .cookie_store(true)
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("failed to build reqwest client");

        Self {
            base_url: base_url.into(),
            client,
        }
    }

    /// Warm up the session by hitting the site root. NSE sets the cookies
    /// the API endpoints require.
    #[instrument(skip(self), name = "nse::prime")]
    pub async fn prime(&self) -> Result<()> {
        self.client
            .get(&self.base_url)
            .send()
            .await
            .context("session warm-up GET failed")?;

        debug!("session primed");
        Ok(())
    }

    /// GET the option chain for `symbol` and `expiry`.
    ///
    /// Returns the raw JSON payload after verifying it carries a `records`
    /// envelope; callers decide whether to cache or deserialise further.
    #[instrument(skip(self), name = "nse::fetch_chain")]
    pub async fn fetch_chain(&self, symbol: &str, expiry: &str) -> Result<serde_json::Value> {
        let url = format!(
            "{}/api/option-chain-v3?type=Indices&symbol={}&expiry={}",
            self.base_url, symbol, expiry
        );

        let body = self.get_json(&url).await?;

        if body.get("records").is_none() {
            anyhow::bail!("option chain response for {symbol} has no 'records' envelope");
        }

        debug!(symbol, expiry, "option chain fetched");
        Ok(body)
    }

    /// GET the option-chain landing payload for `symbol` (no expiry filter).
    /// Used to discover the current expiry list.
    #[instrument(skip(self), name = "nse::fetch_expiries")]
    pub async fn fetch_expiries(&self, symbol: &str) -> Result<Vec<String>> {
        let url = format!(
            "{}/api/option-chain-v3?type=Indices&symbol={}",
            self.base_url, symbol
        );

        let body = self.get_json(&url).await?;

        let expiries: Vec<String> = body["records"]["expiryDates"]
            .as_array()
            .context("expiry response missing 'records.expiryDates'")?
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect();

        debug!(symbol, count = expiries.len(), "expiry dates fetched");
        Ok(expiries)
    }

    // -------------------------------------------------------------------------
    // Internal helpers
    // -------------------------------------------------------------------------

    async fn get_json(&self, url: &str) -> Result<serde_json::Value> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("GET {url} failed"))?;

        let status = resp.status();
        let body: serde_json::Value = resp
            .json()
            .await
            .with_context(|| format!("failed to parse response from {url}"))?;

        if !status.is_success() {
            anyhow::bail!("NSE returned {} for {}: {}", status, url, body);
        }

        Ok(body)
    }
}

impl Default for NseClient {
    fn default() -> Self {
        Self::new()
    }
}
