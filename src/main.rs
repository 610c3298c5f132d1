//! SeaDrop multi-mint runner.
//!
//! # Architecture Overview
//!
//! ```text
//!   flags + config file + prompts
//!              │
//!              ▼
//!   ┌─────────────────────┐      ┌──────────────────────────────┐
//!   │ workflow            │─────▶│ blockchain::transaction      │
//!   │ verify → price →    │      │ nonce → gas → estimate →     │
//!   │ balance → mint →    │      │ sign → send → receipt, retry │
//!   │ correlate → withdraw│      └──────────────┬───────────────┘
//!   └─────────┬───────────┘                     │
//!             │                                 ▼
//!             ▼                      ┌─────────────────────┐
//!   ┌─────────────────────┐          │ blockchain::client  │──▶ JSON-RPC
//!   │ correlation         │◀─ logs ──│ (ChainRpc)          │
//!   │ (pure, two-pass)    │          └─────────────────────┘
//!   └─────────────────────┘
//!
//!   Cross-cutting: config, observability, resilience, lifecycle
//! ```

use clap::Parser;
use std::io;
use std::sync::Arc;

use multimint::blockchain::{BlockchainClient, Wallet};
use multimint::cli::{resolve_request, Cli, Prompter};
use multimint::config::load_or_default;
use multimint::lifecycle::signals::{spawn_interrupt_handler, INTERRUPTED_EXIT_CODE};
use multimint::lifecycle::Shutdown;
use multimint::observability::{logging, metrics};
use multimint::workflow::{verify_chain, Orchestrator, RunOutcome, WorkflowError};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = load_or_default(cli.config.as_deref())?;
    if let Some(url) = &cli.rpc_url {
        config.rpc.url = url.clone();
    }
    if let Some(max_attempts) = cli.max_attempts {
        config.retry.mint_max_attempts = Some(max_attempts);
    }

    logging::init(&config.observability.log_level);
    tracing::info!("multimint v{} starting", env!("CARGO_PKG_VERSION"));

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let shutdown = Shutdown::new();
    let signal = shutdown.subscribe();
    spawn_interrupt_handler(shutdown);

    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());

    if config.rpc.url.trim().is_empty() {
        config.rpc.url = prompter.rpc_url()?;
    }

    let client = match BlockchainClient::connect(config.rpc.clone()).await {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "Unable to connect to RPC, exiting");
            std::process::exit(1);
        }
    };

    let network = match verify_chain(&client, &config.chains.supported).await {
        Ok(network) => network,
        Err(e) => exit_with(e),
    };

    let wallet = match Wallet::from_env() {
        Some(wallet) => wallet?,
        None => Wallet::from_private_key(&prompter.private_key()?)?,
    };

    let request = resolve_request(&cli, &mut prompter)?;
    let orchestrator = Orchestrator::new(Arc::new(client), wallet, &config, signal)?;

    match orchestrator.run_on(&network, &request).await {
        Ok(outcome) => report(&outcome, cli.json),
        Err(e) => exit_with(e),
    }
}

fn report(outcome: &RunOutcome, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
        return Ok(());
    }

    if let Some(mint_tx) = outcome.mint_tx {
        tracing::info!(tx_hash = %mint_tx, "Mint transaction");
    }
    if let Some(withdraw) = &outcome.withdraw {
        tracing::info!(
            tx_hash = %withdraw.tx_hash,
            succeeded = withdraw.summary.succeeded.len(),
            failed = withdraw.summary.failed.len(),
            "Withdraw transaction"
        );
        for token in &withdraw.summary.failed {
            tracing::warn!(
                mint_contract = %token.mint_contract,
                token_id = %token.token_id,
                "Token not withdrawn"
            );
        }
    }
    tracing::info!("Run complete");
    Ok(())
}

fn exit_with(error: WorkflowError) -> ! {
    if error.is_cancelled() {
        tracing::warn!(error = %error, "Run cancelled");
        std::process::exit(INTERRUPTED_EXIT_CODE);
    }
    tracing::error!(error = %error, "Run failed");
    std::process::exit(1);
}
