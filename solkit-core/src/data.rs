//! Static datasets bundled with solkit.
//!
//! Two chainlist-derived tables travel with the binary: extra RPC endpoints
//! keyed by chain id, and the chain id to TVL slug mapping. They are parsed
//! once on first use.

use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::HashMap;

use crate::error::{Result, SolkitError};
use crate::types::RpcEntry;

const EXTRA_RPCS_JSON: &str = include_str!("../data/extra_rpcs.json");
const CHAIN_IDS_JSON: &str = include_str!("../data/chain_ids.json");

static BUNDLED: Lazy<Result<LocalDatasets>> =
    Lazy::new(|| LocalDatasets::from_json(EXTRA_RPCS_JSON, CHAIN_IDS_JSON));

/// Extra RPC endpoints known locally for one chain.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocalRpcs {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub rpcs: Vec<RpcEntry>,
}

/// Local fallback data merged into the remote chain list.
#[derive(Debug, Clone, Default)]
pub struct LocalDatasets {
    extra_rpcs: HashMap<u64, LocalRpcs>,
    chain_slugs: HashMap<u64, String>,
}

impl LocalDatasets {
    /// Datasets compiled into the crate.
    pub fn bundled() -> Result<&'static LocalDatasets> {
        BUNDLED.as_ref().map_err(Clone::clone)
    }

    /// Build datasets from in-memory tables.
    pub fn new(extra_rpcs: HashMap<u64, LocalRpcs>, chain_slugs: HashMap<u64, String>) -> Self {
        Self {
            extra_rpcs,
            chain_slugs,
        }
    }

    /// Parse both datasets from their JSON documents.
    pub fn from_json(extra_rpcs: &str, chain_ids: &str) -> Result<Self> {
        let extra_rpcs = serde_json::from_str(extra_rpcs).map_err(|e| SolkitError::Dataset {
            name: "extra_rpcs.json",
            reason: e.to_string(),
        })?;
        let chain_slugs = serde_json::from_str(chain_ids).map_err(|e| SolkitError::Dataset {
            name: "chain_ids.json",
            reason: e.to_string(),
        })?;
        Ok(Self::new(extra_rpcs, chain_slugs))
    }

    /// Local RPC entries for a chain, empty when none are known.
    pub fn extra_rpcs(&self, chain_id: u64) -> &[RpcEntry] {
        self.extra_rpcs
            .get(&chain_id)
            .map(|local| local.rpcs.as_slice())
            .unwrap_or(&[])
    }

    /// TVL slug for a chain.
    pub fn slug(&self, chain_id: u64) -> Option<&str> {
        self.chain_slugs.get(&chain_id).map(String::as_str)
    }
}
