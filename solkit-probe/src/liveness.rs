//! Liveness calls against a single RPC endpoint.
//!
//! A candidate is live when it answers `eth_blockNumber` over HTTP POST with
//! a success status and a block number greater than zero.

use async_trait::async_trait;
use ethers_core::types::U256;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{ProbeError, Result};

/// A single liveness call. Implementations must not enforce the probe
/// timeout themselves; the prober races every call against it.
#[async_trait]
pub trait LivenessCheck: Send + Sync {
    /// Current block number reported by `url`, non-zero on success.
    async fn block_number(&self, url: &str) -> Result<U256>;
}

/// JSON-RPC request body for the liveness call.
pub fn block_number_request() -> Value {
    json!({
        "id": 1,
        "jsonrpc": "2.0",
        "method": "eth_blockNumber",
    })
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<Value>,
}

/// Parse an `eth_blockNumber` result into a non-zero block number.
///
/// Accepts hex quantities (`"0x10"`), decimal strings and JSON numbers.
pub fn parse_block_number(result: &Value) -> Result<U256> {
    let invalid = || ProbeError::InvalidBlockNumber(result.to_string());

    let block = match result {
        Value::String(s) => {
            let s = s.trim();
            match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
                Some(hex) => U256::from_str_radix(hex, 16).map_err(|_| invalid())?,
                None => U256::from_dec_str(s).map_err(|_| invalid())?,
            }
        }
        Value::Number(n) => n.as_u64().map(U256::from).ok_or_else(invalid)?,
        _ => return Err(invalid()),
    };

    if block.is_zero() {
        return Err(invalid());
    }
    Ok(block)
}

/// Liveness check over HTTP JSON-RPC.
#[derive(Debug, Clone, Default)]
pub struct HttpLivenessCheck {
    client: reqwest::Client,
}

impl HttpLivenessCheck {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reuse an existing HTTP client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl LivenessCheck for HttpLivenessCheck {
    async fn block_number(&self, url: &str) -> Result<U256> {
        let response = self
            .client
            .post(url)
            .header(ACCEPT, "application/json")
            .json(&block_number_request())
            .send()
            .await
            .map_err(|e| ProbeError::RpcError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProbeError::HttpStatus(status.as_u16()));
        }

        let body: RpcResponse = response
            .json()
            .await
            .map_err(|e| ProbeError::RpcError(format!("Invalid JSON-RPC response: {}", e)))?;

        match (body.result, body.error) {
            (Some(result), _) => parse_block_number(&result),
            (None, Some(error)) => Err(ProbeError::RpcError(error.to_string())),
            (None, None) => Err(ProbeError::InvalidBlockNumber("missing result".to_string())),
        }
    }
}
