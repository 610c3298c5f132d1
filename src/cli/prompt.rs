//! Line-based interactive input.

use alloy::primitives::{Address, TxHash};
use std::io::{BufRead, Write};

use crate::blockchain::units::GasPriceInput;
use crate::cli::args::{
    gas_price_or_network, parse_address, parse_mode, parse_quantity, parse_tx_hash, ModeChoice,
};
use crate::cli::CliError;

/// Asks the operator for whatever the flags and environment left out.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `label` and read one trimmed line. End of input is an error.
    pub fn ask(&mut self, label: &str) -> Result<String, CliError> {
        write!(self.output, "{label} : ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(CliError::EndOfInput(label.to_string()));
        }
        Ok(line.trim().to_string())
    }

    pub fn rpc_url(&mut self) -> Result<String, CliError> {
        let url = self.ask("Input RPC URL")?;
        if url.is_empty() {
            return Err(CliError::Invalid("RPC URL required".to_string()));
        }
        Ok(url)
    }

    pub fn private_key(&mut self) -> Result<String, CliError> {
        let key = self.ask("Input Private Key EVM")?;
        if key.is_empty() {
            return Err(CliError::Invalid("private key required".to_string()));
        }
        Ok(key)
    }

    pub fn gas_price(&mut self) -> Result<GasPriceInput, CliError> {
        let input = self.ask("Input Custom GWEI/Gas Price (0.01/1/10/100) Or Leave Blank [Default]")?;
        Ok(gas_price_or_network(&input))
    }

    pub fn mode(&mut self) -> Result<ModeChoice, CliError> {
        writeln!(self.output, "1. Mint and withdraw")?;
        writeln!(self.output, "2. Mint only")?;
        writeln!(self.output, "3. Withdraw from mint transaction hash")?;
        parse_mode(&self.ask("Choose (1/2/3)")?)
    }

    pub fn nft(&mut self) -> Result<Address, CliError> {
        parse_address(&self.ask("NFT Contract Address")?)
    }

    pub fn quantity(&mut self) -> Result<u64, CliError> {
        parse_quantity(&self.ask("Total Mint NFT")?)
    }

    pub fn tx_hash(&mut self) -> Result<TxHash, CliError> {
        parse_tx_hash(&self.ask("Input Mint Transaction Hash (0x...)")?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_reads_answers_in_order() {
        let mut p = prompter("http://localhost:8545\n\n2\n0x00005EA00Ac477B1030CE78506496e8C2dE24bf5\n3\n");
        assert_eq!(p.rpc_url().unwrap(), "http://localhost:8545");
        assert_eq!(p.gas_price().unwrap(), GasPriceInput::Network);
        assert_eq!(p.mode().unwrap(), ModeChoice::MintOnly);
        assert_eq!(
            p.nft().unwrap(),
            "0x00005EA00Ac477B1030CE78506496e8C2dE24bf5".parse::<Address>().unwrap()
        );
        assert_eq!(p.quantity().unwrap(), 3);

        let shown = String::from_utf8(p.output).unwrap();
        assert!(shown.contains("Input RPC URL : "));
        assert!(shown.contains("3. Withdraw from mint transaction hash"));
    }

    #[test]
    fn test_gas_price_suffix() {
        let mut p = prompter("2 GWEI\n");
        assert_eq!(p.gas_price().unwrap(), GasPriceInput::Fixed(2_000_000_000));
    }

    #[test]
    fn test_empty_rpc_url_rejected() {
        let mut p = prompter("   \n");
        assert!(matches!(p.rpc_url(), Err(CliError::Invalid(_))));
    }

    #[test]
    fn test_end_of_input() {
        let mut p = prompter("");
        assert!(matches!(p.tx_hash(), Err(CliError::EndOfInput(_))));
    }

    #[test]
    fn test_hash_without_prefix_rejected() {
        let mut p = prompter(&format!("{}\n", "11".repeat(32)));
        assert!(matches!(p.tx_hash(), Err(CliError::Invalid(_))));
    }
}
