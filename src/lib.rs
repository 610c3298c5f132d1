//! SeaDrop multi-mint automation library

pub mod blockchain;
pub mod cli;
pub mod config;
pub mod contracts;
pub mod correlation;
pub mod lifecycle;
pub mod observability;
pub mod resilience;
pub mod workflow;

pub use config::MintConfig;
pub use lifecycle::Shutdown;
pub use workflow::Orchestrator;
