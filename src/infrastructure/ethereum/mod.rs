//! Ethereum infrastructure - Alloy provider implementation

mod provider;

pub use provider::{create_provider, redact_endpoint, AlloyProvider, EthereumProvider};
