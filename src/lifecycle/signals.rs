//! OS signal handling.

use tokio::task::JoinHandle;

use crate::lifecycle::shutdown::Shutdown;

/// Exit status used when the operator interrupts twice.
pub const INTERRUPTED_EXIT_CODE: i32 = 130;

/// Translate Ctrl-C into a shutdown trigger.
///
/// The first interrupt cancels the run gracefully; a second one exits the
/// process without waiting for the in-flight request.
pub fn spawn_interrupt_handler(shutdown: Shutdown) -> JoinHandle<()> {
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            return;
        }
        tracing::warn!("Interrupt received, cancelling after the current step (Ctrl-C again to force)");
        shutdown.trigger();

        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::error!("Second interrupt, exiting");
            std::process::exit(INTERRUPTED_EXIT_CODE);
        }
    })
}
