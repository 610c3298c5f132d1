//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! optional config file (TOML)
//!     → loader.rs (parse & deserialize, defaults for absent fields)
//!     → validation.rs (semantic checks)
//!     → CLI flags fill or override (main.rs)
//!     → MintConfig (validated, immutable for the run)
//! ```

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_or_default, ConfigError};
pub use schema::{
    ChainsConfig, ContractsConfig, GasConfig, MintConfig, ObservabilityConfig, RetryConfig,
    RpcConfig,
};
