// Signal handling module
//
// - SIGINT  (Ctrl+C): shutdown
// - SIGTERM:          shutdown (Unix only)

use std::future::pending;

use crate::logger;

/// Resolve once the process is asked to stop
///
/// A handler that cannot be registered is logged and never fires; it
/// does not trigger a shutdown by itself.
#[cfg(unix)]
pub async fn shutdown_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let interrupt = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => println!("\n[SIGNAL] SIGINT received"),
            Err(e) => {
                logger::log_error(&format!("Failed to listen for SIGINT: {e}"));
                pending::<()>().await;
            }
        }
    };

    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                println!("\n[SIGNAL] SIGTERM received");
            }
            Err(e) => {
                logger::log_error(&format!("Failed to register SIGTERM handler: {e}"));
                pending::<()>().await;
            }
        }
    };

    tokio::select! {
        () = interrupt => {}
        () = terminate => {}
    }
}

/// Non-Unix fallback - only handles Ctrl+C
#[cfg(not(unix))]
pub async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => println!("\n[SIGNAL] Ctrl+C received"),
        Err(e) => {
            logger::log_error(&format!("Failed to listen for Ctrl+C: {e}"));
            pending::<()>().await;
        }
    }
}
