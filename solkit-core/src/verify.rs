//! Verification service chain table and candidate filtering.

use std::collections::{HashMap, HashSet};

use crate::types::{ChainDescriptor, VerifiableChain};

/// A chain the verification service knows how to verify on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifyChain {
    pub network: &'static str,
    pub chain_id: u64,
}

const fn chain(network: &'static str, chain_id: u64) -> VerifyChain {
    VerifyChain { network, chain_id }
}

/// Built-in chains of the hardhat verification plugin.
pub const BUILTIN_CHAINS: &[VerifyChain] = &[
    chain("mainnet", 1),
    chain("goerli", 5),
    chain("optimisticEthereum", 10),
    chain("bsc", 56),
    chain("sokol", 77),
    chain("bscTestnet", 97),
    chain("xdai", 100),
    chain("gnosis", 100),
    chain("heco", 128),
    chain("polygon", 137),
    chain("opera", 250),
    chain("hecoTestnet", 256),
    chain("optimisticGoerli", 420),
    chain("polygonZkEVM", 1101),
    chain("moonbeam", 1284),
    chain("moonriver", 1285),
    chain("moonbaseAlpha", 1287),
    chain("polygonZkEVMTestnet", 1442),
    chain("ftmTestnet", 4002),
    chain("base", 8453),
    chain("chiado", 10200),
    chain("holesky", 17000),
    chain("arbitrumOne", 42161),
    chain("celo", 42220),
    chain("avalancheFujiTestnet", 43113),
    chain("avalanche", 43114),
    chain("celoAlfajores", 44787),
    chain("linea", 59144),
    chain("polygonMumbai", 80001),
    chain("baseGoerli", 84531),
    chain("baseSepolia", 84532),
    chain("arbitrumTestnet", 421611),
    chain("arbitrumGoerli", 421613),
    chain("arbitrumSepolia", 421614),
    chain("scroll", 534352),
    chain("sepolia", 11155111),
    chain("optimisticSepolia", 11155420),
    chain("aurora", 1313161554),
    chain("auroraTestnet", 1313161555),
    chain("harmony", 1666600000),
    chain("harmonyTest", 1666700000),
];

/// Chain id to canonical network name lookup.
///
/// When the source list repeats a chain id, the later name wins.
#[derive(Debug, Clone)]
pub struct VerificationTable {
    networks: HashMap<u64, &'static str>,
}

impl Default for VerificationTable {
    fn default() -> Self {
        Self::new(BUILTIN_CHAINS)
    }
}

impl VerificationTable {
    /// Build a table from a chain list.
    pub fn new(chains: &[VerifyChain]) -> Self {
        let networks = chains
            .iter()
            .map(|chain| (chain.chain_id, chain.network))
            .collect();
        Self { networks }
    }

    /// Canonical network name for a chain id.
    pub fn network(&self, chain_id: u64) -> Option<&'static str> {
        self.networks.get(&chain_id).copied()
    }

    /// All supported networks, ordered by chain id.
    pub fn networks(&self) -> Vec<VerifyChain> {
        let mut chains: Vec<VerifyChain> = self
            .networks
            .iter()
            .map(|(chain_id, network)| chain(*network, *chain_id))
            .collect();
        chains.sort_by_key(|c| c.chain_id);
        chains
    }

    /// Keep supported chains with at least one candidate, one per chain id.
    ///
    /// Probe candidates are restricted to `https` URLs. A chain whose
    /// candidates are all non-https stays in the output with no probe
    /// candidates so the registry can still fall back to its first URL.
    pub fn filter(&self, chains: &[ChainDescriptor]) -> Vec<VerifiableChain> {
        let mut seen = HashSet::new();
        chains
            .iter()
            .filter(|chain| !chain.rpc.is_empty())
            .filter_map(|chain| {
                let network = self.network(chain.chain_id)?;
                if !seen.insert(chain.chain_id) {
                    return None;
                }
                let original_rpc_urls = chain.rpc_urls();
                Some(VerifiableChain {
                    network: network.to_string(),
                    chain_id: chain.chain_id,
                    rpc_urls: https_only(&original_rpc_urls),
                    original_rpc_urls,
                })
            })
            .collect()
    }
}

/// Candidates usable for liveness probing.
pub fn https_only(urls: &[String]) -> Vec<String> {
    urls.iter()
        .filter(|url| url.starts_with("https"))
        .cloned()
        .collect()
}

/// Restrict chains to a caller-selected set of network names.
///
/// An empty selection keeps every chain.
pub fn pick_networks<S: AsRef<str>>(chains: Vec<VerifiableChain>, names: &[S]) -> Vec<VerifiableChain> {
    if names.is_empty() {
        return chains;
    }
    chains
        .into_iter()
        .filter(|chain| names.iter().any(|name| name.as_ref() == chain.network))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RpcEntry;

    fn descriptor(chain_id: u64, urls: &[&str]) -> ChainDescriptor {
        ChainDescriptor {
            chain_id,
            name: format!("chain-{}", chain_id),
            rpc: urls.iter().map(|u| RpcEntry::Url(u.to_string())).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_duplicate_chain_id_keeps_last_name() {
        let table = VerificationTable::default();
        assert_eq!(table.network(100), Some("gnosis"));
        assert_eq!(table.network(1), Some("mainnet"));
    }

    #[test]
    fn test_unsupported_and_empty_chains_dropped() {
        let table = VerificationTable::default();
        let chains = [
            descriptor(1, &["https://eth.example"]),
            descriptor(999_999, &["https://unknown.example"]),
            descriptor(56, &[]),
        ];
        let out = table.filter(&chains);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].network, "mainnet");
    }

    #[test]
    fn test_repeated_chain_id_yields_one_network() {
        let table = VerificationTable::default();
        let chains = [
            descriptor(1, &["https://first.example"]),
            descriptor(1, &["https://second.example"]),
        ];
        let out = table.filter(&chains);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].rpc_urls, vec!["https://first.example"]);
    }

    #[test]
    fn test_non_https_candidates_removed() {
        let table = VerificationTable::default();
        let chains = [descriptor(
            1,
            &["wss://eth.example", "https://eth.example", "http://plain.example"],
        )];
        let out = table.filter(&chains);
        assert_eq!(out[0].rpc_urls, vec!["https://eth.example"]);
        assert_eq!(out[0].original_rpc_urls.len(), 3);
    }

    #[test]
    fn test_all_non_https_kept_with_fallback() {
        let table = VerificationTable::default();
        let chains = [descriptor(10, &["wss://op.example", "http://op.example"])];
        let out = table.filter(&chains);
        assert_eq!(out.len(), 1);
        assert!(out[0].rpc_urls.is_empty());
        assert_eq!(out[0].fallback_url(), Some("wss://op.example"));
    }

    #[test]
    fn test_pick_networks() {
        let table = VerificationTable::default();
        let chains = table.filter(&[
            descriptor(1, &["https://eth.example"]),
            descriptor(137, &["https://polygon.example"]),
        ]);
        let picked = pick_networks(chains.clone(), &["polygon"][..]);
        assert_eq!(picked.len(), 1);
        assert_eq!(picked[0].chain_id, 137);

        let none: [&str; 0] = [];
        assert_eq!(pick_networks(chains, &none[..]).len(), 2);
    }

    #[test]
    fn test_networks_sorted_by_chain_id() {
        let networks = VerificationTable::default().networks();
        assert_eq!(networks[0].network, "mainnet");
        assert!(networks.windows(2).all(|w| w[0].chain_id < w[1].chain_id));
    }
}
