use assert_cmd::Command;
use tempfile::TempDir;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

pub struct TestEnv {
    pub server: MockServer,
    pub out_dir: TempDir,
}

impl TestEnv {
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
            out_dir: TempDir::new().unwrap(),
        }
    }

    pub fn sol(&self) -> Command {
        let mut cmd = Command::cargo_bin("sol").unwrap();
        cmd.env("SOLKIT_CHAINS_URL", format!("{}/chains.json", self.server.uri()));
        cmd.env("SOLKIT_TVL_URL", format!("{}/chains", self.server.uri()));
        cmd.env("SOLKIT_PROBE_TIMEOUT_MS", "300");
        cmd.env("NO_COLOR", "1");
        cmd.env_remove("RUST_LOG");
        cmd
    }

    pub async fn mock_feeds(&self, chains: serde_json::Value, tvls: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path("/chains.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(chains))
            .mount(&self.server)
            .await;
        Mock::given(method("GET"))
            .and(path("/chains"))
            .respond_with(ResponseTemplate::new(200).set_body_json(tvls))
            .mount(&self.server)
            .await;
    }

    pub fn read(&self, name: &str) -> String {
        std::fs::read_to_string(self.out_dir.path().join(name)).unwrap()
    }
}

/// Chiado: supported by verification, absent from the bundled RPC table,
/// so probing never leaves the machine.
pub fn chiado_feed() -> serde_json::Value {
    serde_json::json!([
        {
            "chainId": 10200,
            "name": "Gnosis Chiado Testnet",
            "rpc": ["https://localhost:1/", "wss://localhost:1/ws"]
        },
        {
            "chainId": 31337,
            "name": "Hardhat",
            "rpc": ["http://localhost:8545"]
        }
    ])
}
