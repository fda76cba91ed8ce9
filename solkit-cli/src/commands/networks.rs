//! Networks command implementation.

use clap::Args;
use serde::Serialize;
use solkit_core::{NetworkRegistry, VerificationTable};
use solkit_probe::{Pipeline, PipelineOptions, PipelineOutput};
use std::path::PathBuf;
use std::time::Duration;

use crate::artifacts;
use crate::config::{ENV_EXAMPLE_FILE_NAME, ENV_FILE_NAME, HARDHAT_NETWORK_FILE_NAME};
use crate::output;

/// Arguments for the networks command.
#[derive(Args)]
pub struct NetworksArgs {
    /// Only generate these networks (repeatable, e.g. --network mainnet --network polygon)
    #[arg(short, long = "network", value_name = "NAME")]
    pub networks: Vec<String>,

    /// Also write .env.example and .env
    #[arg(long)]
    pub env: bool,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    pub out: PathBuf,

    /// Per-RPC timeout in milliseconds
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Maximum concurrent RPC probes
    #[arg(short, long)]
    pub concurrency: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output structure for a generation run.
#[derive(Serialize)]
struct NetworksOutput<'a> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    networks: Option<&'a NetworkRegistry>,
    warnings: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Run the networks command.
pub async fn run(args: NetworksArgs) -> i32 {
    // 1. Validate inputs
    let table = VerificationTable::default();
    if let Some(unknown) = args.networks.iter().find(|n| !is_supported(&table, n)) {
        fail(&args, format!("Network '{}' not supported.", unknown));
        if !args.json {
            output::hint("Run `sol show networks` for supported networks.");
        }
        return 1;
    }

    // 2. Build pipeline
    let pipeline = match Pipeline::from_env() {
        Ok(p) => p,
        Err(e) => {
            fail(&args, format!("Failed to initialise: {}", e));
            return 1;
        }
    };
    let pipeline = match args.concurrency {
        Some(n) => {
            let config = pipeline.config().clone().with_concurrency(n);
            pipeline.with_config(config)
        }
        None => pipeline,
    };

    let mut options = PipelineOptions::default()
        .pick(args.networks.clone())
        .with_env(args.env);
    if let Some(ms) = args.timeout {
        options = options.timeout(Duration::from_millis(ms));
    }

    if !args.json {
        output::step("Checking RPC endpoints of verifiable networks...");
    }

    // 3. Run
    let result = match pipeline.run(&options).await {
        Ok(r) => r,
        Err(e) => {
            fail(&args, e.to_string());
            return 1;
        }
    };

    // 4. Persist
    if let Err(e) = persist(&args, &result) {
        fail(&args, format!("Failed to write output: {}", e));
        return 1;
    }

    // 5. Report
    if args.json {
        let report = NetworksOutput {
            success: true,
            networks: Some(&result.registry),
            warnings: result.warnings.lines(),
            error: None,
        };
        print_json(&report);
    } else {
        print_summary(&args, &result);
    }

    0
}

fn is_supported(table: &VerificationTable, name: &str) -> bool {
    table.networks().iter().any(|c| c.network == name)
}

fn persist(args: &NetworksArgs, result: &PipelineOutput) -> std::io::Result<()> {
    artifacts::write_json(&args.out.join(HARDHAT_NETWORK_FILE_NAME), &result.registry, true)?;
    if let Some(env) = &result.env {
        artifacts::write_text(&args.out.join(ENV_EXAMPLE_FILE_NAME), env.as_str())?;
        artifacts::write_text(&args.out.join(ENV_FILE_NAME), env.as_str())?;
    }
    Ok(())
}

fn print_summary(args: &NetworksArgs, result: &PipelineOutput) {
    output::section("Networks");
    for (network, entry) in result.registry.iter() {
        output::network_row(network, entry, result.is_live(network));
    }
    println!();

    for line in result.warnings.lines() {
        output::fallback(line);
    }

    output::success(&format!(
        "{} networks written to {} ({} live)",
        result.registry.len(),
        args.out.join(HARDHAT_NETWORK_FILE_NAME).display(),
        result.live_count()
    ));
    if result.env.is_some() {
        output::success(&format!(
            "Env template written to {} and {}",
            ENV_EXAMPLE_FILE_NAME, ENV_FILE_NAME
        ));
    }
}

fn fail(args: &NetworksArgs, msg: String) {
    if args.json {
        let report = NetworksOutput {
            success: false,
            networks: None,
            warnings: &[],
            error: Some(msg),
        };
        print_json(&report);
    } else {
        output::error(&msg);
    }
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => output::error(&format!("Failed to encode JSON: {}", e)),
    }
}
