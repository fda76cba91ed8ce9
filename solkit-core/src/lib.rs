//! # solkit core
//!
//! **Chain metadata fusion and network registry assembly**
//!
//! This crate holds the synchronous half of the solkit pipeline: it merges
//! remote chain lists with the bundled local RPC table, filters chains down
//! to the ones the verification service supports, and assembles probe
//! outcomes into a network registry and `.env` template.
//!
//! ## Features
//!
//! - **Pure**: No network I/O, no async; fetching and probing live in `solkit-probe`
//! - **Deterministic**: Same feeds in, same ordering and fallbacks out
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use solkit_core::{aggregate, build_registry, EnvTemplate, LocalDatasets, VerificationTable};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let chains = aggregate(vec![], &[], LocalDatasets::bundled()?);
//! let verifiable = VerificationTable::default().filter(&chains);
//!
//! // No probe outcomes: every chain falls back to its first candidate
//! let (registry, warnings) = build_registry(&verifiable, &[]);
//! println!("{}", EnvTemplate::from_registry(&registry));
//! print!("{}", warnings.render());
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod data;
pub mod env;
pub mod error;
pub mod registry;
pub mod types;
pub mod verify;

// Re-export main types for convenience
pub use aggregate::aggregate;
pub use data::LocalDatasets;
pub use env::EnvTemplate;
pub use error::{Result, SolkitError};
pub use registry::{build_registry, NetworkEntry, NetworkRegistry, ProbeOutcome, WarningLog};
pub use types::{ChainDescriptor, ChainInfo, LlamaTvl, RpcEntry, VerifiableChain};
pub use verify::{pick_networks, VerificationTable};
