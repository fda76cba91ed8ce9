//! Network registry assembly.
//!
//! Turns per-chain probe outcomes into the `hardhat.network.json` shape,
//! falling back to a chain's first unfiltered candidate when nothing
//! answered the liveness probe.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::types::VerifiableChain;

/// Result of probing one chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub network: String,
    pub chain_id: u64,
    /// Winning URL, `None` when every candidate failed or timed out.
    pub url: Option<String>,
}

/// Registry entry for one network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkEntry {
    pub chain_id: u64,
    pub url: String,
}

/// Network name to validated chain id and RPC URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NetworkRegistry(BTreeMap<String, NetworkEntry>);

impl NetworkRegistry {
    pub fn insert(&mut self, network: impl Into<String>, entry: NetworkEntry) {
        self.0.insert(network.into(), entry);
    }

    pub fn get(&self, network: &str) -> Option<&NetworkEntry> {
        self.0.get(network)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Network names in registry order.
    pub fn networks(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &NetworkEntry)> {
        self.0.iter().map(|(network, entry)| (network.as_str(), entry))
    }

    /// Pretty JSON document written to `hardhat.network.json`.
    pub fn to_json_pretty(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Human-readable lines for chains that fell back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WarningLog(Vec<String>);

impl WarningLog {
    pub fn push(&mut self, line: String) {
        self.0.push(line);
    }

    pub fn lines(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// All lines, each terminated with `\r\n`.
    pub fn render(&self) -> String {
        self.0.iter().map(|line| format!("{}\r\n", line)).collect()
    }
}

/// Warning line for a chain that had no live endpoint.
pub fn fallback_warning(network: &str, url: &str) -> String {
    format!("BAD NETWORK: {}, using default: {}", network, url)
}

/// Collect probe outcomes into a fully populated registry.
///
/// Every network gets one entry; a network listed twice keeps its first
/// chain. Networks without a winner use their first unfiltered candidate
/// and add one warning line.
pub fn build_registry(
    chains: &[VerifiableChain],
    outcomes: &[ProbeOutcome],
) -> (NetworkRegistry, WarningLog) {
    let winners: HashMap<&str, &str> = outcomes
        .iter()
        .filter_map(|o| o.url.as_deref().map(|url| (o.network.as_str(), url)))
        .collect();

    let mut registry = NetworkRegistry::default();
    let mut warnings = WarningLog::default();
    for chain in chains {
        if registry.get(&chain.network).is_some() {
            continue;
        }
        let url = match winners.get(chain.network.as_str()) {
            Some(url) => url.to_string(),
            None => {
                let fallback = chain
                    .fallback_url()
                    .or_else(|| chain.rpc_urls.first().map(String::as_str))
                    .unwrap_or_default()
                    .to_string();
                warnings.push(fallback_warning(&chain.network, &fallback));
                fallback
            }
        };
        registry.insert(
            chain.network.clone(),
            NetworkEntry {
                chain_id: chain.chain_id,
                url,
            },
        );
    }
    (registry, warnings)
}
