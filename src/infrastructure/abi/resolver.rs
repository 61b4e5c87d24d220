//! Remote ABI resolution via a block-explorer "getabi" API

use std::time::Duration;

use alloy_json_abi::JsonAbi;
use serde::Deserialize;
use tracing::debug;

use crate::domain::abi::parse_abi;
use crate::error::{BalanceError, Result};

/// Default explorer endpoint (Etherscan-compatible)
pub const DEFAULT_EXPLORER_URL: &str = "https://api.etherscan.io/api";

/// Explorer API envelope: `result` holds the ABI as a JSON-encoded string
#[derive(Debug, Deserialize)]
struct ExplorerResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    result: serde_json::Value,
}

/// Block-explorer ABI client
///
/// One GET per lookup. Nothing is cached: asking twice fetches twice.
#[derive(Debug, Clone)]
pub struct AbiResolver {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl AbiResolver {
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BalanceError::Config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
            api_key,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch and parse the ABI published for `address`
    pub async fn lookup_abi(&self, address: &str) -> Result<JsonAbi> {
        let body = self.fetch_getabi(address).await?;
        extract_abi(&body)
    }

    async fn fetch_getabi(&self, address: &str) -> Result<String> {
        debug!(endpoint = %self.endpoint, address, "getabi");

        let mut request = self.http.get(&self.endpoint).query(&[
            ("module", "contract"),
            ("action", "getabi"),
            ("address", address),
        ]);
        if let Some(key) = &self.api_key {
            request = request.query(&[("apikey", key.as_str())]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| BalanceError::Network(format!("ABI request failed: {e}")))?
            .error_for_status()
            .map_err(|e| BalanceError::Network(format!("ABI request failed: {e}")))?;

        response
            .text()
            .await
            .map_err(|e| BalanceError::Network(format!("failed to read ABI response: {e}")))
    }
}

/// Parse the ABI out of an explorer envelope.
fn extract_abi(body: &str) -> Result<JsonAbi> {
    let envelope: ExplorerResponse = serde_json::from_str(body)
        .map_err(|e| BalanceError::Decode(format!("explorer response is not valid JSON: {e}")))?;

    let serde_json::Value::String(result) = envelope.result else {
        return Err(BalanceError::Decode(format!(
            "explorer response has no string `result` (status {:?}, message {:?})",
            envelope.status, envelope.message
        )));
    };

    parse_abi(&result).map_err(|err| {
        // Explorers report failures with status "0" and a human-readable result.
        if envelope.status.as_deref() == Some("0") {
            BalanceError::Decode(format!(
                "explorer returned {}: {result} ({err})",
                envelope.message.as_deref().unwrap_or("an error")
            ))
        } else {
            err
        }
    })
}
