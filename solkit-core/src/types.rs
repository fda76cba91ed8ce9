//! Chain metadata types.
//!
//! Remote feed shapes (`ChainInfo`, `LlamaTvl`) mirror the public JSON
//! documents and ignore fields solkit does not use. `ChainDescriptor` and
//! `VerifiableChain` are produced by the aggregation and filter stages.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One RPC entry as it appears in chain lists.
///
/// Chain lists mix bare URL strings with objects carrying tracking
/// metadata; both decode into this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RpcEntry {
    /// A bare URL string.
    Url(String),
    /// A URL with privacy metadata.
    Detailed {
        url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tracking: Option<String>,
        #[serde(
            default,
            rename = "trackingDetails",
            skip_serializing_if = "Option::is_none"
        )]
        tracking_details: Option<String>,
        #[serde(
            default,
            rename = "isOpenSource",
            skip_serializing_if = "Option::is_none"
        )]
        is_open_source: Option<bool>,
    },
}

impl RpcEntry {
    /// The endpoint URL, whatever the entry shape.
    pub fn url(&self) -> &str {
        match self {
            RpcEntry::Url(url) => url,
            RpcEntry::Detailed { url, .. } => url,
        }
    }

    /// Same entry pointing at `url`, metadata kept.
    pub fn with_url(&self, url: &str) -> RpcEntry {
        match self {
            RpcEntry::Url(_) => RpcEntry::Url(url.to_string()),
            RpcEntry::Detailed {
                tracking,
                tracking_details,
                is_open_source,
                ..
            } => RpcEntry::Detailed {
                url: url.to_string(),
                tracking: tracking.clone(),
                tracking_details: tracking_details.clone(),
                is_open_source: *is_open_source,
            },
        }
    }
}

/// Native currency of a chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// A chain object from the remote chain list feed.
///
/// Fields solkit does not interpret (`networkId`, `explorers`, `icon`, ...)
/// are kept in `extra` and written back out unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainInfo {
    pub chain_id: u64,
    pub name: String,
    #[serde(default)]
    pub chain: Option<String>,
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default, rename = "infoURL")]
    pub info_url: Option<String>,
    #[serde(default)]
    pub rpc: Vec<RpcEntry>,
    #[serde(default)]
    pub native_currency: Option<NativeCurrency>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An entry from the TVL ranking feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlamaTvl {
    pub name: String,
    #[serde(default)]
    pub tvl: f64,
    #[serde(default, rename = "chainId")]
    pub chain_id: Option<serde_json::Value>,
    #[serde(default)]
    pub gecko_id: Option<String>,
    #[serde(default, rename = "tokenSymbol")]
    pub token_symbol: Option<String>,
}

/// A chain after merging remote and local RPC candidates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainDescriptor {
    pub chain_id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    #[serde(default, rename = "infoURL", skip_serializing_if = "Option::is_none")]
    pub info_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native_currency: Option<NativeCurrency>,
    /// Candidate RPC entries, unique by URL, in merge order.
    #[serde(default)]
    pub rpc: Vec<RpcEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tvl: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_slug: Option<String>,
    /// Feed fields passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ChainDescriptor {
    /// TVL used for ordering; chains without one rank as zero.
    pub fn rank(&self) -> f64 {
        self.tvl.unwrap_or(0.0)
    }

    /// Candidate URLs in merge order.
    pub fn rpc_urls(&self) -> Vec<String> {
        self.rpc.iter().map(|entry| entry.url().to_string()).collect()
    }
}

/// A chain supported by the verification service, ready for probing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiableChain {
    /// Canonical network name from the verification table.
    pub network: String,
    pub chain_id: u64,
    /// Probe candidates (https only).
    #[serde(rename = "rpcs")]
    pub rpc_urls: Vec<String>,
    /// Unfiltered candidates, first one is the fallback.
    #[serde(rename = "originalRpcs")]
    pub original_rpc_urls: Vec<String>,
}

impl VerifiableChain {
    /// First unfiltered candidate, used when no candidate answers.
    pub fn fallback_url(&self) -> Option<&str> {
        self.original_rpc_urls.first().map(String::as_str)
    }
}

impl From<&VerifiableChain> for ChainDescriptor {
    fn from(chain: &VerifiableChain) -> Self {
        ChainDescriptor {
            chain_id: chain.chain_id,
            name: chain.network.clone(),
            rpc: chain
                .original_rpc_urls
                .iter()
                .cloned()
                .map(RpcEntry::Url)
                .collect(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rpc_entry_decodes_both_shapes() {
        let entries: Vec<RpcEntry> = serde_json::from_str(
            r#"["https://a.example", {"url": "https://b.example", "tracking": "none"}]"#,
        )
        .unwrap();
        assert_eq!(entries[0].url(), "https://a.example");
        assert_eq!(entries[1].url(), "https://b.example");
    }

    #[test]
    fn test_chain_info_tolerates_extra_fields() {
        let info: ChainInfo = serde_json::from_str(
            r#"{"chainId": 1, "name": "Ethereum Mainnet", "rpc": [], "faucets": [], "slip44": 60}"#,
        )
        .unwrap();
        assert_eq!(info.chain_id, 1);
        assert!(info.rpc.is_empty());
    }

    #[test]
    fn test_rank_defaults_to_zero() {
        let chain = ChainDescriptor {
            chain_id: 5,
            name: "Goerli".into(),
            ..Default::default()
        };
        assert_eq!(chain.rank(), 0.0);
    }

    #[test]
    fn test_unknown_chain_fields_kept() {
        let info: ChainInfo = serde_json::from_str(
            r#"{"chainId": 1, "name": "Ethereum Mainnet", "infoURL": "https://ethereum.org", "networkId": 1, "icon": "ethereum"}"#,
        )
        .unwrap();
        assert_eq!(info.info_url.as_deref(), Some("https://ethereum.org"));
        assert_eq!(info.extra["networkId"], 1);
        assert_eq!(info.extra["icon"], "ethereum");
        assert!(!info.extra.contains_key("infoURL"));
    }

    #[test]
    fn test_with_url_keeps_metadata() {
        let entry = RpcEntry::Detailed {
            url: "https://a.example/".into(),
            tracking: Some("none".into()),
            tracking_details: None,
            is_open_source: Some(true),
        };
        let moved = entry.with_url("https://a.example");
        assert_eq!(moved.url(), "https://a.example");
        assert!(matches!(
            moved,
            RpcEntry::Detailed { tracking: Some(ref t), is_open_source: Some(true), .. } if t == "none"
        ));
    }
}
