use async_trait::async_trait;
use ethers_core::types::U256;
use serde_json::json;
use solkit_core::verify::VerifyChain;
use solkit_core::{LocalDatasets, NetworkEntry, VerifiableChain, VerificationTable};
use solkit_probe::{FeedClient, LivenessCheck, Pipeline, PipelineOptions, ProbeConfig, ProbeError, Result};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Clone, Copy)]
enum Endpoint {
    Live(u64),
    Down,
    Hangs,
}

struct ScriptedCheck(HashMap<&'static str, Endpoint>);

#[async_trait]
impl LivenessCheck for ScriptedCheck {
    async fn block_number(&self, url: &str) -> Result<U256> {
        match self.0.get(url).copied().unwrap_or(Endpoint::Down) {
            Endpoint::Live(block) => Ok(U256::from(block)),
            Endpoint::Down => Err(ProbeError::HttpStatus(502)),
            Endpoint::Hangs => {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Err(ProbeError::RpcError("unreachable".to_string()))
            }
        }
    }
}

async fn feeds(chains: serde_json::Value, tvls: serde_json::Value) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/chains.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chains))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/chains"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tvls))
        .mount(&server)
        .await;
    server
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

fn pipeline(server: &MockServer, script: &[(&'static str, Endpoint)]) -> Pipeline {
    let feed = FeedClient::new(
        format!("{}/chains.json", server.uri()),
        format!("{}/chains", server.uri()),
    )
    .unwrap();
    init_tracing();
    let check = Arc::new(ScriptedCheck(script.iter().copied().collect()));
    let config = ProbeConfig::default().with_timeout(Duration::from_millis(200));
    Pipeline::new(feed, check, config)
        .unwrap()
        .with_local(LocalDatasets::default())
        .with_table(VerificationTable::new(&[VerifyChain {
            network: "mainnet",
            chain_id: 1,
        }]))
}

fn ethereum_feed() -> serde_json::Value {
    json!([{
        "chainId": 1,
        "name": "ethereum",
        "rpc": ["https://bad.example", "https://good.example/"],
        "nativeCurrency": {"name": "Ether", "symbol": "ETH", "decimals": 18}
    }])
}

#[tokio::test]
async fn test_live_candidate_wins_over_timed_out_one() {
    let server = feeds(ethereum_feed(), json!([])).await;
    let pipeline = pipeline(
        &server,
        &[
            ("https://bad.example", Endpoint::Hangs),
            ("https://good.example", Endpoint::Live(0x10)),
        ],
    );

    let output = pipeline.run(&PipelineOptions::default()).await.unwrap();

    assert_eq!(output.registry.len(), 1);
    assert_eq!(
        output.registry.get("mainnet"),
        Some(&NetworkEntry {
            chain_id: 1,
            url: "https://good.example".to_string()
        })
    );
    assert!(output.warnings.is_empty());
    assert_eq!(output.live_count(), 1);
    assert!(output.env.is_none());
}

#[tokio::test]
async fn test_all_candidates_failing_falls_back_with_one_warning() {
    let server = feeds(ethereum_feed(), json!([])).await;
    let pipeline = pipeline(
        &server,
        &[
            ("https://bad.example", Endpoint::Down),
            ("https://good.example", Endpoint::Hangs),
        ],
    );

    let output = pipeline.run(&PipelineOptions::default()).await.unwrap();

    assert_eq!(
        output.registry.get("mainnet"),
        Some(&NetworkEntry {
            chain_id: 1,
            url: "https://bad.example".to_string()
        })
    );
    assert_eq!(output.warnings.len(), 1);
    let line = &output.warnings.lines()[0];
    assert!(line.contains("mainnet"));
    assert!(line.contains("https://bad.example"));
}

#[tokio::test]
async fn test_repeated_chain_id_in_feed_counts_once() {
    let chains = json!([
        {"chainId": 1, "name": "ethereum", "rpc": ["https://bad.example"]},
        {"chainId": 1, "name": "ethereum again", "rpc": ["https://other.example"]}
    ]);
    let server = feeds(chains, json!([])).await;
    let pipeline = pipeline(&server, &[("https://other.example", Endpoint::Live(9))]);

    assert_eq!(pipeline.chain_infos().await.unwrap().len(), 1);

    let output = pipeline.run(&PipelineOptions::default()).await.unwrap();
    assert_eq!(output.registry.len(), 1);
    assert_eq!(output.warnings.len(), 1);
    assert_eq!(output.registry.get("mainnet").unwrap().url, "https://bad.example");
    assert_eq!(output.live_count(), 0);
    assert!(!output.is_live("mainnet"));
}

#[tokio::test]
async fn test_precomputed_duplicates_keep_counts_consistent() {
    let server = MockServer::start().await;
    let pipeline = pipeline(&server, &[]);
    let chain = VerifiableChain {
        network: "mainnet".into(),
        chain_id: 1,
        rpc_urls: vec!["https://eth.example".into()],
        original_rpc_urls: vec!["https://eth.example".into()],
    };

    let options = PipelineOptions::default().chains(vec![chain.clone(), chain]);
    let output = pipeline.run(&options).await.unwrap();

    assert_eq!(output.registry.len(), 1);
    assert_eq!(output.warnings.len(), 1);
    assert_eq!(output.live_count(), 0);
    assert!(output.warnings.len() <= output.registry.len());
}

#[tokio::test]
async fn test_env_template_emitted_on_request() {
    let server = feeds(ethereum_feed(), json!([{"name": "Ethereum", "tvl": 1.0e9}])).await;
    let pipeline = pipeline(&server, &[("https://good.example", Endpoint::Live(1))]);

    let output = pipeline
        .run(&PipelineOptions::default().with_env(true))
        .await
        .unwrap();

    let env = output.env.expect("env template requested");
    assert!(env.as_str().starts_with("PRIVATE_KEY = 0x"));
    assert!(env.as_str().contains("ETHERSCAN_mainnet = \r\n"));
}

#[tokio::test]
async fn test_unknown_chains_and_placeholders_filtered() {
    let chains = json!([
        {"chainId": 1, "name": "ethereum", "rpc": [
            "wss://x.example/${INFURA_API_KEY}/",
            "https://good.example"
        ]},
        {"chainId": 424242, "name": "unknown", "rpc": ["https://unknown.example"]}
    ]);
    let server = feeds(chains, json!([])).await;
    let pipeline = pipeline(&server, &[("https://good.example", Endpoint::Live(7))]);

    let infos = pipeline.chain_infos().await.unwrap();
    assert!(infos
        .iter()
        .flat_map(|c| c.rpc_urls())
        .all(|u| !u.contains("${INFURA_API_KEY}")));

    let output = pipeline.run(&PipelineOptions::default()).await.unwrap();
    assert_eq!(output.registry.networks().collect::<Vec<_>>(), vec!["mainnet"]);
}

#[tokio::test]
async fn test_feed_failure_aborts_run() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/chains.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ethereum_feed()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/chains"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let pipeline = pipeline(&server, &[]);
    let err = pipeline.run(&PipelineOptions::default()).await.unwrap_err();
    assert!(err.is_fatal());
    assert!(err.to_string().contains("TVL"));
}

#[tokio::test]
async fn test_precomputed_chains_skip_feeds_and_honour_pick() {
    // No mocks mounted: any feed request would fail the run.
    let server = MockServer::start().await;
    let pipeline = pipeline(&server, &[("https://polygon.example", Endpoint::Live(3))]);

    let chains = vec![
        VerifiableChain {
            network: "mainnet".into(),
            chain_id: 1,
            rpc_urls: vec!["https://eth.example".into()],
            original_rpc_urls: vec!["https://eth.example".into()],
        },
        VerifiableChain {
            network: "polygon".into(),
            chain_id: 137,
            rpc_urls: vec!["https://polygon.example".into()],
            original_rpc_urls: vec!["https://polygon.example".into()],
        },
    ];
    let options = PipelineOptions::default().chains(chains).pick(["polygon"]);
    let output = pipeline.run(&options).await.unwrap();

    assert_eq!(output.registry.len(), 1);
    assert_eq!(output.registry.get("polygon").unwrap().url, "https://polygon.example");
    assert!(output.warnings.is_empty());
}
