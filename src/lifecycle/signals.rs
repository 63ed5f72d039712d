//! OS signal handling.
//!
//! # Responsibilities
//! - Wait for SIGINT (Ctrl-C) or SIGTERM
//! - Report which one arrived so the caller can exit cleanly
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - An interrupt is not an operation failure

/// Termination request received from the OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownSignal {
    Interrupt,
    Terminate,
}

impl ShutdownSignal {
    /// Line shown to the operator.
    pub fn notice(&self) -> &'static str {
        match self {
            Self::Interrupt => "Process interrupted. Exiting gracefully...",
            Self::Terminate => "Process terminated. Exiting gracefully...",
        }
    }
}

/// Resolve when SIGINT or SIGTERM arrives.
///
/// If a handler cannot be installed that branch never resolves.
pub async fn shutdown_signal() -> ShutdownSignal {
    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = interrupt => ShutdownSignal::Interrupt,
        _ = terminate => ShutdownSignal::Terminate,
    }
}
