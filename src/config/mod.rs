//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! environment variables / .env       TOML file
//!     → loader.rs (adapters producing a raw DelegationConfig)
//!     → validation.rs (semantic checks, every violation collected)
//!     → ValidatedConfig (defaults applied, immutable)
//!
//! Overrides (CLI flags):
//!     ValidatedConfig::with_updates
//!     → merged raw record → validation.rs → new ValidatedConfig
//! ```
//!
//! # Design Decisions
//! - Config is immutable once validated; overrides produce a new snapshot
//! - Chain ID defaults to 1 and gas limit to 50 000 when omitted
//! - Key material is redacted from Debug output

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::{ConfigUpdate, DelegationConfig, ValidatedConfig};
pub use validation::{validate_config, ValidationError};
