//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → ShutdownSignal → main drops the in-flight operation → exit 0
//! ```

pub mod signals;

pub use signals::{shutdown_signal, ShutdownSignal};
