//! Show command implementation.

use clap::{Args, Subcommand};
use colored::Colorize;
use solkit_core::VerificationTable;

use crate::output;

/// Arguments for the show command.
#[derive(Args)]
pub struct ShowArgs {
    #[command(subcommand)]
    pub command: ShowCommands,
}

#[derive(Subcommand)]
pub enum ShowCommands {
    /// List networks supported by contract verification
    Networks,
}

/// Run the show command.
pub fn run(args: ShowArgs) -> i32 {
    match args.command {
        ShowCommands::Networks => show_networks(),
    }
}

fn show_networks() -> i32 {
    let networks = VerificationTable::default().networks();
    output::section(&format!("Verifiable Networks ({})", networks.len()));

    println!("  {:<24} {:>10}", "Name".bold(), "Chain ID".bold());
    for chain in &networks {
        output::chain_row(chain.network, chain.chain_id);
    }

    println!();
    output::hint("Use --network <NAME> with the networks command.");

    0
}
