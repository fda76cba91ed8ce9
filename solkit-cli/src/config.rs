//! Artifact names and defaults.

/// Network registry consumed by the hardhat config.
pub const HARDHAT_NETWORK_FILE_NAME: &str = "hardhat.network.json";

/// Committed env template.
pub const ENV_EXAMPLE_FILE_NAME: &str = ".env.example";

/// Local env file, seeded from the template.
pub const ENV_FILE_NAME: &str = ".env";

/// Aggregated chain list written by `sol chains`.
pub const CHAIN_INFOS_FILE_NAME: &str = "n-chains.json";
