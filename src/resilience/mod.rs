//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! RPC query or receipt wait:
//!     → timeouts.rs (enforce per-call or confirmation deadline)
//!     → On expiry: TimeoutError, propagated to the caller
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every external call has a deadline
//! - No retries: a failed submission or elapsed deadline ends the run

pub mod timeouts;

pub use timeouts::{with_timeout, TimeoutError};
