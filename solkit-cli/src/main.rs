//! sol CLI
//!
//! Terminal-first generation of hardhat network configuration from live RPC endpoints.

mod artifacts;
mod commands;
mod config;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sol")]
#[command(author = "LogicCrafter")]
#[command(version = "0.1.0")]
#[command(about = "sol - live RPC network configuration for contract projects", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Print debug logs to stderr
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Refresh the network config file: hardhat.network.json
    Networks(commands::networks::NetworksArgs),

    /// Show information (e.g. `sol show networks`)
    Show(commands::show::ShowArgs),

    /// Write the aggregated chain list
    Chains(commands::chains::ChainsArgs),
}

fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let exit_code = match cli.command {
        Commands::Networks(args) => commands::networks::run(args).await,
        Commands::Show(args) => commands::show::run(args),
        Commands::Chains(args) => commands::chains::run(args).await,
    };

    std::process::exit(exit_code);
}
