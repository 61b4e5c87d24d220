use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info_span;

use ethbal::config::Config;
use ethbal::domain::units::format_units;
use ethbal::{normalize_address, telemetry, BlockingBalanceClient};

#[derive(Debug, Parser)]
#[command(
    name = "ethbal",
    version,
    about = "Read ETH and ERC-20 balances through JSON-RPC and a block-explorer ABI"
)]
struct Args {
    /// HTTP JSON-RPC endpoint (overrides config and INFURA_PROJECT_ID)
    #[arg(long, global = true)]
    rpc: Option<String>,

    /// Explorer "getabi" API base URL
    #[arg(long, global = true)]
    explorer: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the EIP-55 checksummed form of an address
    Checksum { address: String },
    /// List the functions and events of a verified contract
    Abi {
        contract: String,
        /// Print the decoded descriptors as JSON
        #[arg(long)]
        json: bool,
    },
    /// Native balance of an address, in ETH
    Eth {
        address: String,
        /// Print the raw wei amount instead
        #[arg(long)]
        wei: bool,
    },
    /// Raw `balanceOf` of a token contract for an address
    Token {
        contract: String,
        address: String,
        /// Format the raw amount with this many decimals
        #[arg(long)]
        decimals: Option<u8>,
    },
    /// ETH balance plus raw token balance
    Total { contract: String, address: String },
}

fn main() -> Result<()> {
    let args = Args::parse();
    telemetry::init_tracing("info");

    if let Command::Checksum { address } = &args.command {
        println!("{}", normalize_address(address)?);
        return Ok(());
    }

    let mut config = Config::load().context("failed to load configuration")?;
    if let Some(rpc) = args.rpc {
        config.rpc_url = Some(rpc);
    }
    if let Some(explorer) = args.explorer {
        config.explorer_url = Some(explorer);
    }
    let config = config.resolve()?;

    let client = BlockingBalanceClient::connect(&config, info_span!("ethbal"))
        .context("failed to connect to RPC endpoint")?;

    match args.command {
        Command::Checksum { .. } => {}
        Command::Abi { contract, json } => {
            let handle = client.get_contract(&contract)?;
            if json {
                println!("{}", serde_json::to_string_pretty(handle.descriptors())?);
                return Ok(());
            }
            println!("{}", handle.checksummed());
            for item in handle.descriptors() {
                let label = item.signature.as_deref().unwrap_or("");
                let view = if item.is_read_only() { " [view]" } else { "" };
                match item.selector_hex() {
                    Some(selector) => println!("  {:?} {} {}{}", item.kind, selector, label, view),
                    None => println!("  {:?} {}{}", item.kind, label, view),
                }
            }
        }
        Command::Eth { address, wei } => {
            if wei {
                println!("{}", client.get_raw_eth_balance(&address)?);
            } else {
                println!("{}", client.get_eth_balance(&address)?);
            }
        }
        Command::Token {
            contract,
            address,
            decimals,
        } => {
            let handle = client.get_contract(&contract)?;
            let balance = client.get_contract_balance(&handle, &address)?;
            match decimals {
                Some(decimals) => println!("{}", format_units(balance, decimals)),
                None => println!("{balance}"),
            }
        }
        Command::Total { contract, address } => {
            let handle = client.get_contract(&contract)?;
            println!("{}", client.get_total_eth_and_token_balance(&handle, &address)?);
        }
    }

    Ok(())
}
