//! Blocking facade over [`BalanceClient`]
//!
//! Owns a current-thread Tokio runtime and blocks on each request, for
//! callers that are not async themselves.

use alloy_primitives::U256;
use tokio::runtime::{Builder, Runtime};
use tracing::Span;

use crate::client::BalanceClient;
use crate::config::ClientConfig;
use crate::domain::ContractHandle;
use crate::error::{BalanceError, Result};

/// Synchronous balance client
///
/// Must not be used from inside another Tokio runtime.
#[derive(Debug)]
pub struct BlockingBalanceClient {
    inner: BalanceClient,
    runtime: Runtime,
}

impl BlockingBalanceClient {
    pub fn connect(config: &ClientConfig, span: Span) -> Result<Self> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| BalanceError::Connection(format!("failed to start runtime: {e}")))?;
        let inner = runtime.block_on(BalanceClient::connect(config, span))?;
        Ok(Self { inner, runtime })
    }

    pub fn endpoint(&self) -> String {
        self.inner.endpoint()
    }

    pub fn get_contract(&self, address: &str) -> Result<ContractHandle> {
        self.runtime.block_on(self.inner.get_contract(address))
    }

    pub fn get_contract_balance(&self, contract: &ContractHandle, address: &str) -> Result<U256> {
        self.runtime
            .block_on(self.inner.get_contract_balance(contract, address))
    }

    pub fn get_raw_eth_balance(&self, address: &str) -> Result<U256> {
        self.runtime.block_on(self.inner.get_raw_eth_balance(address))
    }

    pub fn get_eth_balance(&self, address: &str) -> Result<f64> {
        self.runtime.block_on(self.inner.get_eth_balance(address))
    }

    pub fn get_total_eth_and_token_balance(
        &self,
        contract: &ContractHandle,
        address: &str,
    ) -> Result<f64> {
        self.runtime
            .block_on(self.inner.get_total_eth_and_token_balance(contract, address))
    }
}
