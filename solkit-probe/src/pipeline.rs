//! Network registry generation pipeline.
//!
//! Aggregate → filter → probe → build registry → env template, in one place.
//! Callers can restrict the run to a subset of networks, skip aggregation by
//! supplying an already filtered chain list, and opt into env emission.

use solkit_core::{
    build_registry, pick_networks, ChainDescriptor, EnvTemplate, LocalDatasets, NetworkRegistry,
    ProbeOutcome, VerifiableChain, VerificationTable, WarningLog,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::ProbeConfig;
use crate::error::Result;
use crate::feed::FeedClient;
use crate::liveness::{HttpLivenessCheck, LivenessCheck};
use crate::prober::LivenessProber;

/// Options for one pipeline run.
#[derive(Debug, Clone, Default)]
pub struct PipelineOptions {
    /// Network names to keep; empty keeps every supported network.
    pub pick_networks: Vec<String>,
    /// Also produce the `.env` template.
    pub with_env: bool,
    /// Per-URL timeout overriding the pipeline's configuration.
    pub timeout: Option<Duration>,
    /// Pre-filtered chains; when set the feeds are not fetched.
    pub chains: Option<Vec<VerifiableChain>>,
}

impl PipelineOptions {
    pub fn pick<I, S>(mut self, networks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pick_networks = networks.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_env(mut self, with_env: bool) -> Self {
        self.with_env = with_env;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn chains(mut self, chains: Vec<VerifiableChain>) -> Self {
        self.chains = Some(chains);
        self
    }
}

/// Artifacts of one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub registry: NetworkRegistry,
    pub warnings: WarningLog,
    pub env: Option<EnvTemplate>,
    /// Per-chain probe results, in probing order.
    pub outcomes: Vec<ProbeOutcome>,
}

impl PipelineOutput {
    /// Whether `network` resolved to an endpoint that answered.
    pub fn is_live(&self, network: &str) -> bool {
        self.registry.get(network).map_or(false, |entry| {
            self.outcomes
                .iter()
                .any(|o| o.network == network && o.url.as_deref() == Some(entry.url.as_str()))
        })
    }

    /// Registry networks backed by a live endpoint.
    pub fn live_count(&self) -> usize {
        self.registry
            .networks()
            .filter(|network| self.is_live(network))
            .count()
    }
}

/// Aggregation, filtering and probing wired together.
pub struct Pipeline {
    feed: FeedClient,
    checker: Arc<dyn LivenessCheck>,
    config: ProbeConfig,
    table: VerificationTable,
    local: LocalDatasets,
}

impl Pipeline {
    /// Pipeline over the bundled local datasets and built-in verification table.
    pub fn new(feed: FeedClient, checker: Arc<dyn LivenessCheck>, config: ProbeConfig) -> Result<Self> {
        Ok(Self {
            feed,
            checker,
            config,
            table: VerificationTable::default(),
            local: LocalDatasets::bundled()?.clone(),
        })
    }

    /// Production wiring: environment-configured feeds, HTTP liveness calls.
    pub fn from_env() -> Result<Self> {
        Self::new(
            FeedClient::from_env()?,
            Arc::new(HttpLivenessCheck::new()),
            ProbeConfig::from_env(),
        )
    }

    /// Replace the verification table.
    pub fn with_table(mut self, table: VerificationTable) -> Self {
        self.table = table;
        self
    }

    /// Replace the probe configuration.
    pub fn with_config(mut self, config: ProbeConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the local datasets.
    pub fn with_local(mut self, local: LocalDatasets) -> Self {
        self.local = local;
        self
    }

    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    pub fn table(&self) -> &VerificationTable {
        &self.table
    }

    /// Every remote chain merged with local data, ordered by TVL.
    pub async fn chain_infos(&self) -> Result<Vec<ChainDescriptor>> {
        self.feed.aggregate(&self.local).await
    }

    /// Chains supported by the verification service.
    pub async fn verifiable_chains(&self) -> Result<Vec<VerifiableChain>> {
        let chains = self.chain_infos().await?;
        let verifiable = self.table.filter(&chains);
        info!(
            "{} of {} chains are supported by the verification service",
            verifiable.len(),
            chains.len()
        );
        Ok(verifiable)
    }

    /// Run the pipeline end to end.
    ///
    /// Only a feed failure is returned as an error. Chains without a live
    /// endpoint fall back to their first candidate and add a warning.
    pub async fn run(&self, options: &PipelineOptions) -> Result<PipelineOutput> {
        let chains = match &options.chains {
            Some(chains) => chains.clone(),
            None => self.verifiable_chains().await?,
        };
        let chains = pick_networks(chains, options.pick_networks.as_slice());

        let mut config = self.config.clone();
        if let Some(timeout) = options.timeout {
            config.timeout = timeout;
        }
        let prober = LivenessProber::new(self.checker.clone(), config);
        let outcomes = prober.probe_all(&chains).await;

        let (registry, warnings) = build_registry(&chains, &outcomes);
        if !warnings.is_empty() {
            warn!("{} networks have no live endpoint", warnings.len());
        }
        for line in warnings.lines() {
            debug!("{}", line);
        }

        let env = options
            .with_env
            .then(|| EnvTemplate::from_registry(&registry));

        Ok(PipelineOutput {
            registry,
            warnings,
            env,
            outcomes,
        })
    }
}
