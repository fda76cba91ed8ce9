//! CLI command implementations.

pub mod chains;
pub mod networks;
pub mod show;
