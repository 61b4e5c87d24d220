//! Infrastructure layer - External service integrations
//!
//! This layer contains:
//! - The Alloy-based JSON-RPC provider
//! - The block-explorer ABI resolver (reqwest)

pub mod abi;
pub mod ethereum;

pub use abi::AbiResolver;
pub use ethereum::{create_provider, AlloyProvider, EthereumProvider};
