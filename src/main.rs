use clap::Parser;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;
use thiserror::Error;

use eip7702_revoke::blockchain::{parse_balance, BlockchainError};
use eip7702_revoke::config::loader::{CHAIN_ID_ENV_VAR, PROVIDER_URL_ENV_VAR};
use eip7702_revoke::config::{ConfigUpdate, ValidatedConfig};
use eip7702_revoke::delegation::{
    AuthorizationOverrides, DelegationError, DelegationManager, DelegationResult,
    RevocationOptions, SignerInfo,
};
use eip7702_revoke::lifecycle::shutdown_signal;
use eip7702_revoke::observability::init_logging;

#[derive(Parser)]
#[command(name = "revoke-delegation")]
#[command(about = "Revoke the EIP-7702 delegation of an account", long_about = None)]
struct Cli {
    /// Read configuration from a TOML file instead of the environment
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Environment file to load (defaults to ./.env when present)
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// JSON-RPC endpoint, overrides PROVIDER_URL
    #[arg(long)]
    rpc_url: Option<String>,

    /// Chain ID, overrides CHAIN_ID
    #[arg(long, allow_negative_numbers = true)]
    chain_id: Option<i64>,

    /// Gas limit of the revocation transaction
    #[arg(long)]
    gas_limit: Option<u64>,

    /// Max fee per gas in wei
    #[arg(long)]
    max_fee_per_gas: Option<u128>,

    /// Max priority fee per gas in wei
    #[arg(long)]
    max_priority_fee_per_gas: Option<u128>,

    /// Authorization nonce, instead of the delegator's current nonce
    #[arg(long)]
    auth_nonce: Option<u64>,

    /// Minimum balance (ETH) the paying account must hold
    #[arg(long)]
    min_balance: Option<String>,

    /// Seconds to wait for the transaction to be mined
    #[arg(long, default_value_t = 60)]
    receipt_timeout_secs: u64,

    /// Log level used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Print the result as JSON on stdout; progress moves to stderr
    #[arg(long)]
    json: bool,
}

/// Where human-readable progress lines go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stream {
    Stdout,
    Stderr,
}

#[derive(Debug, Clone, Copy)]
struct Console {
    progress: Stream,
}

impl Console {
    fn new(json: bool) -> Self {
        let progress = if json { Stream::Stderr } else { Stream::Stdout };
        Self { progress }
    }

    fn say(&self, line: impl Display) {
        match self.progress {
            Stream::Stdout => println!("{}", line),
            Stream::Stderr => eprintln!("{}", line),
        }
    }
}

#[derive(Debug, Error)]
enum RunError {
    #[error(transparent)]
    Delegation(#[from] DelegationError),

    #[error(transparent)]
    Chain(#[from] BlockchainError),

    #[error("Revocation transaction failed")]
    Reverted(DelegationResult),

    #[error("Failed to render result: {0}")]
    Render(#[from] serde_json::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level);
    let console = Console::new(cli.json);

    console.say("EIP-7702 Clean Delegation Tool");
    console.say("================================\n");

    tokio::select! {
        outcome = run(&cli, console) => {
            if let Err(e) = &outcome {
                report_failure(e);
            }
            ExitCode::from(exit_status(&outcome))
        },
        signal = shutdown_signal() => {
            tracing::info!(signal = ?signal, "Shutdown signal received");
            console.say(format_args!("\n\n{}", signal.notice()));
            ExitCode::SUCCESS
        }
    }
}

fn exit_status(outcome: &Result<(), RunError>) -> u8 {
    match outcome {
        Ok(()) => 0,
        Err(_) => 1,
    }
}

async fn run(cli: &Cli, console: Console) -> Result<(), RunError> {
    console.say("Initializing delegation manager...");
    let config = load_config(cli)?;
    let options = revocation_options(cli)?;
    let manager = DelegationManager::connect(config)
        .await?
        .with_receipt_timeout(Duration::from_secs(cli.receipt_timeout_secs));

    console.say("Getting account information...");
    let delegator = manager.get_delegator_info().await?;
    print_signer(console, "Delegator", &delegator);

    let sponsor = manager.get_sponsor_info().await?;
    if let Some(sponsor) = &sponsor {
        console.say("Sponsor account detected:");
        print_signer(console, "Address", sponsor);
    }

    console.say("Creating revocation authorization...");
    let overrides = authorization_overrides(cli);
    if sponsor.is_none() && overrides.nonce.is_none() {
        // The sender's nonce is bumped before the authorization list is
        // applied, so a self-paid authorization needs nonce + 1 to take effect.
        tracing::warn!(
            nonce = delegator.nonce,
            suggested = delegator.nonce + 1,
            "Self-paid authorization signed with the current nonce; pass --auth-nonce to override"
        );
    }
    let authorization = manager.create_revocation_authorization(overrides).await?;
    console.say("Authorization created successfully\n");

    let result = match sponsor {
        Some(_) => {
            console.say("Executing sponsored delegation revocation...");
            manager
                .sponsored_revoke_delegation(Some(authorization), options)
                .await?
        }
        None => {
            console.say("Executing delegation revocation...");
            manager.revoke_delegation(Some(authorization), options).await?
        }
    };

    if !result.success {
        return Err(RunError::Reverted(result));
    }

    if manager.has_sponsor() {
        console.say("Delegation revoked successfully via sponsor!");
    } else {
        console.say("Delegation revoked successfully!");
    }
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        console.say(format_args!("Transaction: {}", result.transaction_hash));
        console.say(format_args!("Block: {}", result.block_number));
        console.say(format_args!("Gas Used: {}", result.gas_used));
    }

    console.say("\nOperation completed successfully!");
    Ok(())
}

fn load_config(cli: &Cli) -> Result<ValidatedConfig, DelegationError> {
    let config = match &cli.config {
        Some(path) => ValidatedConfig::from_file(path)?,
        None => {
            load_env_file(cli.env_file.as_deref())?;
            // CLI values stand in for their variables so a missing variable is
            // not reported when the flag supplies it.
            ValidatedConfig::from_env_with(|name| match name {
                PROVIDER_URL_ENV_VAR if cli.rpc_url.is_some() => cli.rpc_url.clone(),
                CHAIN_ID_ENV_VAR if cli.chain_id.is_some() => cli.chain_id.map(|id| id.to_string()),
                _ => std::env::var(name).ok(),
            })?
        }
    };

    let update = ConfigUpdate {
        provider_url: cli.rpc_url.clone(),
        chain_id: cli.chain_id,
        gas_limit: cli.gas_limit,
        ..Default::default()
    };
    if update.is_empty() {
        Ok(config)
    } else {
        config.with_updates(update)
    }
}

fn load_env_file(path: Option<&Path>) -> Result<(), DelegationError> {
    match path {
        Some(path) => dotenv::from_path(path).map_err(|e| {
            DelegationError::Configuration(format!(
                "Failed to load env file {}: {}",
                path.display(),
                e
            ))
        }),
        None => {
            if let Ok(path) = dotenv::dotenv() {
                tracing::debug!(path = %path.display(), "Loaded .env");
            }
            Ok(())
        }
    }
}

fn revocation_options(cli: &Cli) -> Result<RevocationOptions, DelegationError> {
    let min_balance = cli
        .min_balance
        .as_deref()
        .map(|value| {
            parse_balance(value).map_err(|e| {
                DelegationError::Configuration(format!("Invalid minimum balance '{}': {}", value, e))
            })
        })
        .transpose()?;

    Ok(RevocationOptions {
        gas_limit: cli.gas_limit,
        max_fee_per_gas: cli.max_fee_per_gas,
        max_priority_fee_per_gas: cli.max_priority_fee_per_gas,
        min_balance,
    })
}

fn authorization_overrides(cli: &Cli) -> AuthorizationOverrides {
    AuthorizationOverrides {
        nonce: cli.auth_nonce,
        ..Default::default()
    }
}

fn print_signer(console: Console, heading: &str, info: &SignerInfo) {
    console.say(format_args!("{}: {}", heading, info.address));
    console.say(format_args!("Balance: {} ETH", info.balance));
    console.say(format_args!("Nonce: {}\n", info.nonce));
}

fn report_failure(err: &RunError) {
    match err {
        RunError::Delegation(e) => {
            tracing::error!(code = e.code(), error = %e, "Revocation failed");
        }
        RunError::Reverted(result) => {
            tracing::error!(tx_hash = %result.transaction_hash, "Revocation transaction reverted");
        }
        other => {
            tracing::error!(error = %other, "Unexpected failure");
        }
    }

    for line in failure_report(err) {
        eprintln!("{}", line);
    }
}

/// Lines printed to stderr for a failed run.
fn failure_report(err: &RunError) -> Vec<String> {
    let mut lines = vec![String::new(), "Error occurred:".to_string()];

    match err {
        RunError::Delegation(e) => {
            lines.push(format!("{}: {}", e.label(), e));
            if let Some(tx_hash) = e.tx_hash() {
                lines.push(format!("Transaction: {}", tx_hash));
            }
            lines.push(e.remediation_hint().to_string());
        }
        RunError::Reverted(result) => {
            lines.push("Revocation transaction failed".to_string());
            lines.push(format!("Transaction: {}", result.transaction_hash));
            lines.push(format!("Block: {}", result.block_number));
        }
        other => lines.push(format!("Unknown Error: {}", other)),
    }

    lines.push(String::new());
    lines.push("For help, run with --help or check your configuration.".to_string());
    lines
}
