//! Chain data aggregation.
//!
//! Fuses the remote chain list with the TVL ranking feed and the bundled
//! local RPC table. Fetching is the caller's job; this module only merges.

use std::collections::{HashMap, HashSet};

use crate::data::LocalDatasets;
use crate::types::{ChainDescriptor, ChainInfo, LlamaTvl, RpcEntry};

/// Substrings marking a templated URL whose API key was never filled in.
pub const CREDENTIAL_PLACEHOLDERS: [&str; 2] = ["${INFURA_API_KEY}", "${ALCHEMY_API_KEY}"];

/// Strip exactly one trailing `/`.
pub fn normalize_url(url: &str) -> &str {
    url.strip_suffix('/').unwrap_or(url)
}

/// Whether a URL still carries an unresolved credential placeholder.
pub fn has_credential_placeholder(url: &str) -> bool {
    CREDENTIAL_PLACEHOLDERS
        .iter()
        .any(|token| url.contains(token))
}

/// Merge remote and local RPC entries into a unique candidate list.
///
/// Remote entries come first. URLs are normalized before deduplication,
/// the first occurrence wins (metadata included), and templated URLs are
/// dropped.
pub fn merge_candidates<'a, R, L>(remote: R, local: L) -> Vec<RpcEntry>
where
    R: IntoIterator<Item = &'a RpcEntry>,
    L: IntoIterator<Item = &'a RpcEntry>,
{
    let mut seen = HashSet::new();
    let mut entries = Vec::new();
    for entry in remote.into_iter().chain(local) {
        let url = normalize_url(entry.url());
        if has_credential_placeholder(url) || !seen.insert(url.to_string()) {
            continue;
        }
        entries.push(entry.with_url(url));
    }
    entries
}

/// Index the TVL feed by lower-cased chain name.
pub fn tvl_index(tvls: &[LlamaTvl]) -> HashMap<String, f64> {
    tvls.iter()
        .map(|entry| (entry.name.to_lowercase(), entry.tvl))
        .collect()
}

/// Build the descriptor for one remote chain.
pub fn combine(info: ChainInfo, tvls: &HashMap<String, f64>, local: &LocalDatasets) -> ChainDescriptor {
    let rpc = merge_candidates(&info.rpc, local.extra_rpcs(info.chain_id));
    let ranked = local
        .slug(info.chain_id)
        .and_then(|slug| tvls.get(slug).map(|tvl| (slug.to_string(), *tvl)));
    let (chain_slug, tvl) = match ranked {
        Some((slug, tvl)) => (Some(slug), Some(tvl)),
        None => (None, None),
    };

    // Ranking fields are ours; never echo the feed's.
    let mut extra = info.extra;
    extra.remove("tvl");
    extra.remove("chainSlug");

    ChainDescriptor {
        chain_id: info.chain_id,
        name: info.name,
        chain: info.chain,
        short_name: info.short_name,
        info_url: info.info_url,
        native_currency: info.native_currency,
        rpc,
        tvl,
        chain_slug,
        extra,
    }
}

/// Merge every remote chain and order the result by descending TVL.
///
/// A chain id listed more than once keeps its first record. Chains without
/// TVL rank as zero; ties keep feed order.
pub fn aggregate(chains: Vec<ChainInfo>, tvls: &[LlamaTvl], local: &LocalDatasets) -> Vec<ChainDescriptor> {
    let index = tvl_index(tvls);
    let mut seen = HashSet::new();
    let mut descriptors: Vec<ChainDescriptor> = chains
        .into_iter()
        .filter(|info| seen.insert(info.chain_id))
        .map(|info| combine(info, &index, local))
        .collect();
    descriptors.sort_by(|a, b| b.rank().total_cmp(&a.rank()));
    descriptors
}
