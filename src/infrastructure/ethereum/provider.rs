//! Ethereum provider abstraction and the Alloy HTTP implementation

use alloy::network::Ethereum;
use alloy::primitives::{Address, Bytes, U256};
use alloy::providers::{
    fillers::{BlobGasFiller, ChainIdFiller, FillProvider, GasFiller, JoinFill, NonceFiller},
    Identity, Provider, ProviderBuilder, RootProvider,
};
use alloy::rpc::types::{TransactionInput, TransactionRequest};
use tracing::debug;

use crate::error::{BalanceError, Result};

/// Abstract Ethereum provider trait
///
/// The handful of JSON-RPC reads the balance client needs, abstracted over
/// the transport so tests can substitute their own.
#[async_trait::async_trait]
pub trait EthereumProvider: Send + Sync + 'static {
    /// Get the current block number (used as the liveness check)
    async fn block_number(&self) -> Result<u64>;

    /// Get account balance in wei at the latest block
    async fn get_balance(&self, address: Address) -> Result<U256>;

    /// Execute a read-only call (eth_call) against `to`
    async fn call(&self, to: Address, calldata: Bytes) -> Result<Bytes>;

    /// Get endpoint display name, with credentials stripped
    fn endpoint_name(&self) -> String;
}

type HttpFillProvider = FillProvider<
    JoinFill<
        Identity,
        JoinFill<GasFiller, JoinFill<BlobGasFiller, JoinFill<NonceFiller, ChainIdFiller>>>,
    >,
    RootProvider,
    Ethereum,
>;

/// HTTP JSON-RPC provider backed by Alloy
pub struct AlloyProvider {
    provider: HttpFillProvider,
    endpoint: String,
}

impl std::fmt::Debug for AlloyProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlloyProvider")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

/// Create an HTTP provider for `url`.
///
/// No request is sent here; the caller decides when to check liveness.
pub fn create_provider(url: &str) -> Result<AlloyProvider> {
    let rpc_url = url
        .parse()
        .map_err(|e| BalanceError::Config(format!("invalid RPC URL: {e}")))?;
    let provider = ProviderBuilder::new().connect_http(rpc_url);
    Ok(AlloyProvider {
        provider,
        endpoint: redact_endpoint(url),
    })
}

#[async_trait::async_trait]
impl EthereumProvider for AlloyProvider {
    async fn block_number(&self) -> Result<u64> {
        debug!(endpoint = %self.endpoint, "eth_blockNumber");
        self.provider
            .get_block_number()
            .await
            .map_err(|e| BalanceError::Network(format!("eth_blockNumber failed: {e}")))
    }

    async fn get_balance(&self, address: Address) -> Result<U256> {
        debug!(endpoint = %self.endpoint, %address, "eth_getBalance");
        self.provider
            .get_balance(address)
            .await
            .map_err(|e| BalanceError::Network(format!("eth_getBalance failed: {e}")))
    }

    async fn call(&self, to: Address, calldata: Bytes) -> Result<Bytes> {
        debug!(endpoint = %self.endpoint, %to, len = calldata.len(), "eth_call");
        let request = TransactionRequest::default()
            .to(to)
            .input(TransactionInput::new(calldata));
        self.provider
            .call(request)
            .await
            .map_err(|e| BalanceError::Call(format!("eth_call to {to} failed: {e}")))
    }

    fn endpoint_name(&self) -> String {
        self.endpoint.clone()
    }
}

/// Keep scheme and host; drop path and query, which carry API keys
/// (e.g. `https://mainnet.infura.io/v3/<project id>`).
pub fn redact_endpoint(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    let host = rest.split(['/', '?']).next().unwrap_or(rest);
    let host = host.rsplit('@').next().unwrap_or(host);
    format!("{scheme}://{host}")
}
