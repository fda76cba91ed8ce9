//! Probe configuration.
//!
//! Defaults can be overridden through `SOLKIT_PROBE_TIMEOUT_MS` and
//! `SOLKIT_PROBE_CONCURRENCY`. Unparseable or zero values are ignored.

use std::time::Duration;

/// Per-URL timeout used by the prober when nothing else is configured.
pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 3000;

/// Per-URL timeout used by the network generation pipeline.
pub const PIPELINE_PROBE_TIMEOUT_MS: u64 = 5000;

/// Lower bound of the worker pool size.
pub const MIN_CONCURRENCY: usize = 8;

/// Worker pool and timeout settings for one probing run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeConfig {
    /// Maximum number of liveness calls in flight at once.
    pub concurrency: usize,
    /// Time allowed for a single liveness call.
    pub timeout: Duration,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            timeout: Duration::from_millis(DEFAULT_PROBE_TIMEOUT_MS),
        }
    }
}

impl ProbeConfig {
    /// Pipeline defaults with environment overrides applied.
    pub fn from_env() -> Self {
        let timeout_ms = env_positive("SOLKIT_PROBE_TIMEOUT_MS").unwrap_or(PIPELINE_PROBE_TIMEOUT_MS);
        let concurrency = env_positive("SOLKIT_PROBE_CONCURRENCY")
            .map(|n| n as usize)
            .unwrap_or_else(default_concurrency);
        Self {
            concurrency,
            timeout: Duration::from_millis(timeout_ms),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the pool size; zero is clamped to one.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }
}

/// `max(8, available CPUs)`.
pub fn default_concurrency() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .max(MIN_CONCURRENCY)
}

fn env_positive(name: &str) -> Option<u64> {
    std::env::var(name)
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .filter(|v| *v > 0)
}
