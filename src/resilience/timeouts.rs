//! Timeout enforcement.
//!
//! # Responsibilities
//! - Wrap RPC calls and the receipt wait with a deadline
//! - Cancel operations cleanly on timeout
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities
//! - Timeout errors are distinct from other errors
//! - The wrapped future is dropped when the deadline fires, so nothing keeps
//!   running in the background after a timeout is reported

use std::future::IntoFuture;
use std::time::Duration;
use thiserror::Error;

/// Deadline for a single RPC query.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Deadline for a submitted transaction to be mined.
pub const RECEIPT_TIMEOUT: Duration = Duration::from_secs(60);

/// The deadline elapsed before the operation settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Operation timed out after {}ms", .0.as_millis())]
pub struct TimeoutError(pub Duration);

/// Race `fut` against `limit`. Whichever settles first wins.
pub async fn with_timeout<F>(limit: Duration, fut: F) -> Result<F::Output, TimeoutError>
where
    F: IntoFuture,
{
    tokio::time::timeout(limit, fut)
        .await
        .map_err(|_| TimeoutError(limit))
}
