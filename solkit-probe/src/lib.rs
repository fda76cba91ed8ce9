//! # solkit probe
//!
//! **Chain feed fetching and concurrent RPC liveness probing**
//!
//! This crate is the network half of solkit. It downloads the public chain
//! list and TVL ranking, probes every candidate RPC endpoint of every
//! verifiable chain through a bounded worker pool, and assembles the result
//! into a network registry using `solkit-core`.
//!
//! ## Features
//!
//! - **Bounded**: One worker pool of `max(8, CPUs)` slots shared by all chains
//! - **Racing**: First live endpoint per chain wins, siblings are cancelled
//! - **Total**: Every supported chain gets an entry, with warnings for fallbacks
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use solkit_probe::{Pipeline, PipelineOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let pipeline = Pipeline::from_env()?;
//!
//!     let output = pipeline
//!         .run(&PipelineOptions::default().pick(["mainnet", "polygon"]).with_env(true))
//!         .await?;
//!
//!     println!("{}", output.registry.to_json_pretty()?);
//!     print!("{}", output.warnings.render());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod feed;
pub mod liveness;
pub mod pipeline;
pub mod prober;

// Re-export main types for convenience
pub use config::ProbeConfig;
pub use error::{ProbeError, Result};
pub use feed::FeedClient;
pub use liveness::{HttpLivenessCheck, LivenessCheck};
pub use pipeline::{Pipeline, PipelineOptions, PipelineOutput};
pub use prober::{ChainProbeState, LivenessProber};
