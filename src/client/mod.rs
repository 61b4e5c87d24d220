//! Balance client: one facade over the RPC node and the ABI registry
//!
//! Every operation is an independent request/response round trip. The only
//! state kept between calls is the provider and HTTP client handles.

pub mod blocking;

use alloy_primitives::U256;
use tracing::{debug, info, Instrument, Span};

use crate::config::ClientConfig;
use crate::domain::units::{u256_to_f64, wei_to_eth};
use crate::domain::{normalize_address, parse_address, ContractHandle};
use crate::error::{BalanceError, Result};
use crate::infrastructure::{create_provider, AbiResolver, EthereumProvider};

pub use blocking::BlockingBalanceClient;

/// Async balance-query client
///
/// Logging goes through the span handed in at construction; the client never
/// installs a subscriber of its own.
pub struct BalanceClient {
    provider: Box<dyn EthereumProvider>,
    resolver: AbiResolver,
    span: Span,
}

impl std::fmt::Debug for BalanceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BalanceClient")
            .field("endpoint", &self.provider.endpoint_name())
            .field("explorer", &self.resolver.endpoint())
            .finish()
    }
}

impl BalanceClient {
    /// Build the HTTP provider and explorer client from `config`, then check
    /// that the RPC endpoint answers.
    pub async fn connect(config: &ClientConfig, span: Span) -> Result<Self> {
        let provider = create_provider(&config.rpc_url)?;
        let resolver = AbiResolver::new(
            config.explorer_url.clone(),
            config.explorer_api_key.clone(),
            config.request_timeout,
        )?;
        Self::new(Box::new(provider), resolver, span).await
    }

    /// Wrap an existing provider. Fails with [`BalanceError::Connection`] if
    /// the provider does not answer `eth_blockNumber`; there is no retry.
    pub async fn new(
        provider: Box<dyn EthereumProvider>,
        resolver: AbiResolver,
        span: Span,
    ) -> Result<Self> {
        let endpoint = provider.endpoint_name();
        let block = provider
            .block_number()
            .instrument(span.clone())
            .await
            .map_err(|e| BalanceError::Connection(format!("{endpoint} is unreachable: {e}")))?;

        span.in_scope(|| info!(%endpoint, block, "connected to RPC endpoint"));

        Ok(Self {
            provider,
            resolver,
            span,
        })
    }

    pub fn endpoint(&self) -> String {
        self.provider.endpoint_name()
    }

    /// Fetch the ABI for `address` and bind it to the checksummed address.
    ///
    /// One explorer request per call.
    pub async fn get_contract(&self, address: &str) -> Result<ContractHandle> {
        let checksummed = normalize_address(address)?;
        let parsed = parse_address(&checksummed)?;

        async {
            let abi = self.resolver.lookup_abi(&checksummed).await?;
            debug!(
                contract = %checksummed,
                functions = abi.functions().count(),
                "ABI resolved"
            );
            Ok::<_, BalanceError>(ContractHandle::new(parsed, checksummed, abi))
        }
        .instrument(self.span.clone())
        .await
    }

    /// Raw `balanceOf(address)` of the token, without decimal scaling.
    pub async fn get_contract_balance(
        &self,
        contract: &ContractHandle,
        address: &str,
    ) -> Result<U256> {
        let owner = parse_address(address)?;
        let calldata = contract.encode_balance_of(owner)?;

        async {
            let output = self.provider.call(contract.address(), calldata).await?;
            let balance = contract.decode_balance_of(&output)?;
            debug!(contract = %contract.checksummed(), %owner, %balance, "token balance");
            Ok::<_, BalanceError>(balance)
        }
        .instrument(self.span.clone())
        .await
    }

    /// Native balance in wei.
    pub async fn get_raw_eth_balance(&self, address: &str) -> Result<U256> {
        let owner = parse_address(address)?;
        async {
            let wei = self.provider.get_balance(owner).await?;
            debug!(%owner, %wei, "eth balance");
            Ok::<_, BalanceError>(wei)
        }
        .instrument(self.span.clone())
        .await
    }

    /// Native balance in whole ETH (wei / 10^18).
    pub async fn get_eth_balance(&self, address: &str) -> Result<f64> {
        Ok(wei_to_eth(self.get_raw_eth_balance(address).await?))
    }

    /// ETH balance (scaled to whole ETH) plus the token balance (raw units).
    ///
    /// The two terms are in different units; this mirrors the long-standing
    /// behaviour of the tool and is kept until the intended unit is settled.
    pub async fn get_total_eth_and_token_balance(
        &self,
        contract: &ContractHandle,
        address: &str,
    ) -> Result<f64> {
        let eth = self.get_eth_balance(address).await?;
        let token = self.get_contract_balance(contract, address).await?;
        Ok(eth + u256_to_f64(token))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use alloy_primitives::{Address, Bytes};

    use super::*;
    use crate::domain::abi::parse_abi;
    use crate::domain::units::WEI_PER_ETH;

    /// In-memory provider: fixed balances, counts calls.
    struct StubProvider {
        alive: bool,
        wei: U256,
        call_output: Option<Bytes>,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait::async_trait]
    impl EthereumProvider for StubProvider {
        async fn block_number(&self) -> Result<u64> {
            if self.alive {
                Ok(19_000_000)
            } else {
                Err(BalanceError::Network("connection refused".into()))
            }
        }

        async fn get_balance(&self, _address: Address) -> Result<U256> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.wei)
        }

        async fn call(&self, _to: Address, _calldata: Bytes) -> Result<Bytes> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.call_output
                .clone()
                .ok_or_else(|| BalanceError::Call("execution reverted".into()))
        }

        fn endpoint_name(&self) -> String {
            "stub://node".into()
        }
    }

    fn resolver() -> AbiResolver {
        AbiResolver::new("http://127.0.0.1:1/api", None, Duration::from_secs(1)).unwrap()
    }

    fn stub(alive: bool, wei: u128, call_output: Option<Bytes>) -> (Box<StubProvider>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let provider = StubProvider {
            alive,
            wei: U256::from(wei),
            call_output,
            calls: calls.clone(),
        };
        (Box::new(provider), calls)
    }

    fn token() -> ContractHandle {
        let abi = parse_abi(
            r#"[{"type":"function","name":"balanceOf","stateMutability":"view",
            "inputs":[{"name":"","type":"address"}],"outputs":[{"name":"","type":"uint256"}]}]"#,
        )
        .unwrap();
        let address = "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2";
        ContractHandle::new(parse_address(address).unwrap(), address.to_string(), abi)
    }

    fn word(value: u64) -> Bytes {
        let mut out = [0u8; 32];
        out[24..].copy_from_slice(&value.to_be_bytes());
        Bytes::from(out.to_vec())
    }

    const OWNER: &str = "0xAbC1230000000000000000000000000000000000";

    #[tokio::test]
    async fn test_dead_endpoint_fails_construction() {
        let (provider, calls) = stub(false, 0, None);
        let err = BalanceClient::new(provider, resolver(), Span::none())
            .await
            .unwrap_err();
        assert!(matches!(err, BalanceError::Connection(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_eth_balance_one_ether() {
        let (provider, _) = stub(true, WEI_PER_ETH as u128, None);
        let client = BalanceClient::new(provider, resolver(), Span::none()).await.unwrap();
        assert_eq!(client.get_eth_balance(OWNER).await.unwrap(), 1.0);
        assert_eq!(
            client.get_raw_eth_balance(OWNER).await.unwrap(),
            U256::from(WEI_PER_ETH)
        );
    }

    #[tokio::test]
    async fn test_contract_balance_is_raw() {
        let (provider, _) = stub(true, 0, Some(word(1_500_000)));
        let client = BalanceClient::new(provider, resolver(), Span::none()).await.unwrap();
        let balance = client.get_contract_balance(&token(), OWNER).await.unwrap();
        assert_eq!(balance, U256::from(1_500_000u64));
    }

    #[tokio::test]
    async fn test_revert_is_call_error() {
        let (provider, _) = stub(true, 0, None);
        let client = BalanceClient::new(provider, resolver(), Span::none()).await.unwrap();
        let err = client.get_contract_balance(&token(), OWNER).await.unwrap_err();
        assert!(matches!(err, BalanceError::Call(_)));
    }

    #[tokio::test]
    async fn test_total_adds_scaled_eth_to_raw_token() {
        let (provider, calls) = stub(true, 2 * WEI_PER_ETH as u128, Some(word(250)));
        let client = BalanceClient::new(provider, resolver(), Span::none()).await.unwrap();
        let total = client
            .get_total_eth_and_token_balance(&token(), OWNER)
            .await
            .unwrap();
        assert_eq!(total, 252.0);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_invalid_address_never_hits_network() {
        let (provider, calls) = stub(true, 0, Some(word(1)));
        let client = BalanceClient::new(provider, resolver(), Span::none()).await.unwrap();

        assert!(matches!(
            client.get_eth_balance("0x1234").await,
            Err(BalanceError::InvalidAddress(_))
        ));
        assert!(matches!(
            client.get_contract("not-an-address").await,
            Err(BalanceError::InvalidAddress(_))
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
