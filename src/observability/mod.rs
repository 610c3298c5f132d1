//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured tracing events: stages, attempts, outcomes)
//!     → metrics.rs (attempt / failure / confirmation counters)
//!
//! Consumers:
//!     → stderr (fmt layer, filtered by RUST_LOG or config log_level)
//!     → optional Prometheus scrape endpoint
//! ```
//!
//! # Design Decisions
//! - Private keys never reach a log line; the derived address does
//! - Counters are no-ops until an exporter is installed

pub mod logging;
pub mod metrics;
