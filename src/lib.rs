//! ethbal: ETH and ERC-20 balance reads over JSON-RPC
//!
//! Contract ABIs come from a block-explorer API; balances come from an
//! Ethereum JSON-RPC node. See [`client::BalanceClient`] for the async API and
//! [`client::BlockingBalanceClient`] for the synchronous one.

pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod telemetry;

pub use client::{BalanceClient, BlockingBalanceClient};
pub use config::{ClientConfig, Config};
pub use domain::abi::{decode_abi, AbiDescriptor};
pub use domain::{normalize_address, ContractHandle};
pub use error::{BalanceError, Result};
