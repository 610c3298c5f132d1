//! Operator input.
//!
//! # Data Flow
//! ```text
//! flags (args.rs)    ──┐
//!                      ├→ resolve_request → RunRequest
//! prompts (prompt.rs) ──┘
//! ```
//!
//! Flags win; anything missing is asked for interactively.

pub mod args;
pub mod prompt;

use std::io::{BufRead, Write};
use thiserror::Error;

use crate::blockchain::units::{format_gwei, GasPriceInput};
use crate::workflow::{Mode, RunRequest};

pub use args::{Cli, ModeChoice};
pub use prompt::Prompter;

/// Errors reading operator input.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Input error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No answer for '{0}'")]
    EndOfInput(String),

    #[error("{0}")]
    Invalid(String),
}

/// Combine flags and prompts into a run request.
pub fn resolve_request<R: BufRead, W: Write>(
    cli: &Cli,
    prompter: &mut Prompter<R, W>,
) -> Result<RunRequest, CliError> {
    let gas_price = match cli.gas_price.as_deref() {
        Some(input) => args::gas_price_or_network(input),
        None => prompter.gas_price()?,
    };
    let choice = match cli.mode {
        Some(choice) => choice,
        None => prompter.mode()?,
    };

    let request = match choice {
        ModeChoice::Withdraw => {
            let tx_hash = match cli.tx_hash {
                Some(tx_hash) => tx_hash,
                None => prompter.tx_hash()?,
            };
            RunRequest {
                mode: Mode::WithdrawFromHash(tx_hash),
                nft: Default::default(),
                quantity: 0,
                gas_price,
            }
        }
        ModeChoice::MintAndWithdraw | ModeChoice::MintOnly => {
            let nft = match cli.nft {
                Some(nft) => nft,
                None => prompter.nft()?,
            };
            let quantity = match cli.quantity {
                Some(quantity) => quantity,
                None => prompter.quantity()?,
            };
            RunRequest {
                mode: if choice == ModeChoice::MintOnly {
                    Mode::MintOnly
                } else {
                    Mode::MintAndWithdraw
                },
                nft,
                quantity,
                gas_price,
            }
        }
    };

    if let GasPriceInput::Fixed(price) = request.gas_price {
        tracing::info!(gas_price_gwei = %format_gwei(price), "Using fixed gas price");
    } else {
        tracing::info!("Using network gas price");
    }
    Ok(request)
}
