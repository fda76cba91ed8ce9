//! Concurrent RPC liveness prober.
//!
//! Every candidate URL of every chain becomes one probe task. All tasks of a
//! run share a single semaphore, so no more than `concurrency` liveness calls
//! are in flight at once. Within a chain the tasks race: the first task to
//! flip the chain's `finished` flag owns the winning URL, queued siblings
//! skip their network call, and in-flight siblings are aborted.

use solkit_core::{ProbeOutcome, VerifiableChain};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::config::ProbeConfig;
use crate::error::ProbeError;
use crate::liveness::{HttpLivenessCheck, LivenessCheck};

/// Shared per-chain race state.
///
/// Only two transitions are allowed: `try_finish` (false to true, once)
/// and `record_failure` (monotonic increment).
#[derive(Debug)]
pub struct ChainProbeState {
    finished: AtomicBool,
    error_count: AtomicUsize,
    max_error_count: usize,
}

impl ChainProbeState {
    pub fn new(max_error_count: usize) -> Self {
        Self {
            finished: AtomicBool::new(false),
            error_count: AtomicUsize::new(0),
            max_error_count,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::Acquire)
    }

    /// Claim the chain's single winner slot. Returns `true` for exactly one caller.
    pub fn try_finish(&self) -> bool {
        self.finished
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Count one failed candidate and return the new total.
    pub fn record_failure(&self) -> usize {
        self.error_count.fetch_add(1, Ordering::AcqRel) + 1
    }

    pub fn error_count(&self) -> usize {
        self.error_count.load(Ordering::Acquire)
    }

    pub fn max_error_count(&self) -> usize {
        self.max_error_count
    }

    /// Every candidate has failed.
    pub fn is_exhausted(&self) -> bool {
        self.error_count() >= self.max_error_count
    }
}

/// One candidate URL scheduled on the shared pool.
struct ProbeTask {
    url: String,
    timeout: Duration,
    state: Arc<ChainProbeState>,
    checker: Arc<dyn LivenessCheck>,
    pool: Arc<Semaphore>,
}

impl ProbeTask {
    async fn run(self) -> Option<String> {
        let permit = match self.pool.acquire().await {
            Ok(permit) => permit,
            Err(_) => return self.fail(ProbeError::RpcError("worker pool closed".to_string())),
        };

        if self.state.is_finished() {
            debug!("Skipping {}: chain already has a live endpoint", self.url);
            return None;
        }

        let started = Instant::now();
        let result = tokio::time::timeout(self.timeout, self.checker.block_number(&self.url)).await;

        let winner = match result {
            Ok(Ok(block)) if self.state.try_finish() => {
                debug!(
                    "{} is live at block {} ({}ms)",
                    self.url,
                    block,
                    started.elapsed().as_millis()
                );
                Some(self.url.clone())
            }
            Ok(Ok(_)) => None,
            Ok(Err(e)) => self.fail(e),
            Err(_) => self.fail(ProbeError::Timeout(self.timeout)),
        };
        // Free the slot before the driver drains the rest of the chain.
        drop(permit);
        winner
    }

    fn fail(&self, error: ProbeError) -> Option<String> {
        let failures = self.state.record_failure();
        debug!(
            "{} failed ({}/{}): {}",
            self.url,
            failures,
            self.state.max_error_count(),
            error
        );
        None
    }
}

/// Bounded-concurrency liveness prober.
#[derive(Clone)]
pub struct LivenessProber {
    checker: Arc<dyn LivenessCheck>,
    pool: Arc<Semaphore>,
    config: ProbeConfig,
}

impl LivenessProber {
    /// Create a prober with its own worker pool.
    pub fn new(checker: Arc<dyn LivenessCheck>, config: ProbeConfig) -> Self {
        Self {
            checker,
            pool: Arc::new(Semaphore::new(config.concurrency.max(1))),
            config,
        }
    }

    /// Prober issuing real HTTP JSON-RPC calls.
    pub fn http(config: ProbeConfig) -> Self {
        Self::new(Arc::new(HttpLivenessCheck::new()), config)
    }

    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    /// Probe every chain concurrently. Outcomes follow the input order.
    pub async fn probe_all(&self, chains: &[VerifiableChain]) -> Vec<ProbeOutcome> {
        let candidates: usize = chains.iter().map(|c| c.rpc_urls.len()).sum();
        info!(
            "Probing {} candidates across {} chains ({} workers, {}ms timeout)",
            candidates,
            chains.len(),
            self.config.concurrency,
            self.config.timeout.as_millis()
        );

        let outcomes =
            futures::future::join_all(chains.iter().map(|chain| self.probe_chain(chain))).await;

        let live = outcomes.iter().filter(|o| o.url.is_some()).count();
        info!("{}/{} chains have a live endpoint", live, outcomes.len());
        outcomes
    }

    /// Race the candidates of a single chain.
    pub async fn probe_chain(&self, chain: &VerifiableChain) -> ProbeOutcome {
        ProbeOutcome {
            network: chain.network.clone(),
            chain_id: chain.chain_id,
            url: self.race(&chain.network, &chain.rpc_urls).await,
        }
    }

    async fn race(&self, network: &str, urls: &[String]) -> Option<String> {
        if urls.is_empty() {
            debug!("{} has no https candidates", network);
            return None;
        }

        let state = Arc::new(ChainProbeState::new(urls.len()));
        let mut tasks = JoinSet::new();
        for url in urls {
            let task = ProbeTask {
                url: url.clone(),
                timeout: self.config.timeout,
                state: state.clone(),
                checker: self.checker.clone(),
                pool: self.pool.clone(),
            };
            tasks.spawn(task.run());
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Some(url)) => {
                    tasks.abort_all();
                    debug!("{} resolved to {}", network, url);
                    return Some(url);
                }
                Ok(None) => {}
                Err(e) => {
                    warn!("Probe task for {} did not complete: {}", network, e);
                    state.record_failure();
                }
            }
        }

        debug!(
            "{} exhausted: {}/{} candidates failed",
            network,
            state.error_count(),
            state.max_error_count()
        );
        None
    }
}
