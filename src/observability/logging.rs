//! Structured logging.
//!
//! # Responsibilities
//! - Initialize logging subsystem
//! - Configure log level at runtime
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - `RUST_LOG` wins over the level passed on the command line
//! - Events go to stderr; stdout is reserved for the operator report

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset, for a given base level.
pub fn default_filter(level: &str) -> String {
    format!("eip7702_revoke={level},revoke_delegation={level},warn")
}

/// Install the global subscriber. Later calls are ignored.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(level)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_parses() {
        let directive = default_filter("debug");
        assert!(directive.starts_with("eip7702_revoke=debug"));
        assert!(directive.parse::<EnvFilter>().is_ok());
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init_logging("info");
        init_logging("debug");
    }
}
