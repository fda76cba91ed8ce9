//! Chains command implementation.

use clap::Args;
use solkit_probe::Pipeline;
use std::path::PathBuf;

use crate::artifacts;
use crate::config::CHAIN_INFOS_FILE_NAME;
use crate::output;

/// Arguments for the chains command.
#[derive(Args)]
pub struct ChainsArgs {
    /// Output file
    #[arg(short, long, default_value = CHAIN_INFOS_FILE_NAME)]
    pub output: PathBuf,

    /// Indent the JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Run the chains command.
pub async fn run(args: ChainsArgs) -> i32 {
    let pipeline = match Pipeline::from_env() {
        Ok(p) => p,
        Err(e) => {
            output::error(&format!("Failed to initialise: {}", e));
            return 1;
        }
    };

    output::step("Fetching chain list and TVL ranking...");
    let chains = match pipeline.chain_infos().await {
        Ok(c) => c,
        Err(e) => {
            output::error(&e.to_string());
            return 1;
        }
    };

    if let Err(e) = artifacts::write_json(&args.output, &chains, args.pretty) {
        output::error(&format!("Failed to write {}: {}", args.output.display(), e));
        return 1;
    }

    output::success(&format!(
        "{} chains written to {}",
        chains.len(),
        args.output.display()
    ));
    0
}
