//! Error types for feed fetching and liveness probing.
//!
//! Feed errors are fatal for a pipeline run. Every other variant describes
//! a single RPC candidate failing and is absorbed by the prober.

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while fetching feeds or probing endpoints.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// A remote metadata feed could not be fetched or decoded.
    #[error("Failed to fetch {feed} feed from {url}: {reason}")]
    Feed {
        /// Which feed failed ("chain list" or "TVL")
        feed: &'static str,
        /// Feed URL
        url: String,
        /// Transport, status or decode message
        reason: String,
    },

    /// RPC transport or network error.
    #[error("RPC error: {0}")]
    RpcError(String),

    /// RPC endpoint answered with a non-success HTTP status.
    #[error("RPC returned HTTP {0}")]
    HttpStatus(u16),

    /// The `eth_blockNumber` result was missing, malformed or zero.
    #[error("Invalid block number: {0}")]
    InvalidBlockNumber(String),

    /// The liveness call did not settle in time.
    #[error("RPC timeout after {0:?}")]
    Timeout(Duration),

    /// Error from solkit-core.
    #[error("Core error: {0}")]
    Core(#[from] solkit_core::SolkitError),
}

impl ProbeError {
    /// Whether this error aborts a pipeline run.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ProbeError::Feed { .. } | ProbeError::Core(_))
    }
}

/// Result type alias for probe operations.
pub type Result<T> = std::result::Result<T, ProbeError>;
