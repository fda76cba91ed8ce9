//! `.env` template generation.

use crate::registry::NetworkRegistry;

/// Placeholder private key line value.
pub const PRIVATE_KEY_PLACEHOLDER: &str =
    "0x0000000000000000000000000000000000000000000000000000000000000000";

/// Environment file template for a generated registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvTemplate(String);

impl EnvTemplate {
    /// One private key line, then one verification API key line per network.
    pub fn from_registry(registry: &NetworkRegistry) -> Self {
        let mut text = format!("PRIVATE_KEY = {}\r\n", PRIVATE_KEY_PLACEHOLDER);
        for network in registry.networks() {
            text.push_str(&format!("{} = \r\n", api_key_var(network)));
        }
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EnvTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Variable holding a network's explorer API key.
pub fn api_key_var(network: &str) -> String {
    format!("ETHERSCAN_{}", network)
}
