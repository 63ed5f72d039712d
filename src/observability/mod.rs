//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! config, blockchain, delegation:
//!     → tracing events with structured fields (addresses, hashes, nonces)
//!     → logging.rs subscriber → stderr
//! ```
//!
//! # Design Decisions
//! - Keys never appear in events; addresses and hashes do

pub mod logging;

pub use logging::init_logging;
