//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Shutdown (shutdown.rs):
//!     Shutdown::trigger → every ShutdownSignal observes it → retry loops stop
//!
//! Signals (signals.rs):
//!     first Ctrl-C → trigger shutdown (current attempt is abandoned)
//!     second Ctrl-C → exit immediately
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::{Shutdown, ShutdownSignal};
