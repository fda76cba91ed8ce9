//! Terminal output for `sol`.
//!
//! Progress and results go to stdout, failures to stderr. Fallback lines are
//! printed verbatim so they can be grepped out of CI logs.

use colored::Colorize;
use solkit_core::NetworkEntry;

/// Width of the network name column.
const NETWORK_COLUMN: usize = 24;

pub fn success(msg: &str) {
    println!("{} {}", "✓".green().bold(), msg.green());
}

pub fn error(msg: &str) {
    eprintln!("{} {}", "error:".red().bold(), msg);
}

/// A pipeline stage starting.
pub fn step(msg: &str) {
    println!("{} {}", "→".cyan(), msg);
}

/// Section title with an underline sized to it.
pub fn section(title: &str) {
    println!("\n{}", title.bold());
    println!("{}", "─".repeat(title.chars().count()).dimmed());
}

/// One row of the network registry table.
pub fn network_row(network: &str, entry: &NetworkEntry, live: bool) {
    let status = if live { "live".green() } else { "fallback".yellow() };
    println!(
        "  {:<width$} {:>10}  {:<8}  {}",
        network,
        entry.chain_id,
        status,
        entry.url.dimmed(),
        width = NETWORK_COLUMN
    );
}

/// One row of the supported network listing.
pub fn chain_row(network: &str, chain_id: u64) {
    println!("  {:<width$} {:>10}", network.green(), chain_id, width = NETWORK_COLUMN);
}

/// A `BAD NETWORK` fallback line.
pub fn fallback(line: &str) {
    println!("{} {}", "!".yellow().bold(), line.yellow());
}

pub fn hint(msg: &str) {
    println!("  {}", msg.dimmed());
}
