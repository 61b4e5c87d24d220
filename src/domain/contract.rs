//! Contract handle: a checksummed address paired with its decoded ABI

use alloy_dyn_abi::{DynSolValue, FunctionExt, JsonAbiExt};
use alloy_json_abi::{Function, JsonAbi};
use alloy_primitives::{Address, Bytes, U256};

use crate::domain::abi::{descriptors, AbiDescriptor};
use crate::error::{BalanceError, Result};

/// A contract address bound to the ABI the registry returned for it.
///
/// Built per query and never cached.
#[derive(Debug, Clone)]
pub struct ContractHandle {
    address: Address,
    checksummed: String,
    abi: JsonAbi,
    descriptors: Vec<AbiDescriptor>,
}

impl ContractHandle {
    /// `checksummed` must be the EIP-55 form of `address`.
    pub fn new(address: Address, checksummed: String, abi: JsonAbi) -> Self {
        let descriptors = descriptors(&abi);
        Self {
            address,
            checksummed,
            abi,
            descriptors,
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// EIP-55 checksummed address
    pub fn checksummed(&self) -> &str {
        &self.checksummed
    }

    pub fn abi(&self) -> &JsonAbi {
        &self.abi
    }

    pub fn descriptors(&self) -> &[AbiDescriptor] {
        &self.descriptors
    }

    /// Look up a function overload by name and input types.
    pub fn function(&self, name: &str, input_types: &[&str]) -> Option<&Function> {
        self.abi.function(name)?.iter().find(|function| {
            function.inputs.len() == input_types.len()
                && function
                    .inputs
                    .iter()
                    .zip(input_types)
                    .all(|(param, ty)| param.selector_type() == *ty)
        })
    }

    /// Encode `balanceOf(owner)` calldata from this contract's ABI.
    pub fn encode_balance_of(&self, owner: Address) -> Result<Bytes> {
        let function = self.balance_of()?;
        let calldata = function
            .abi_encode_input(&[DynSolValue::Address(owner)])
            .map_err(|e| BalanceError::Call(format!("failed to encode balanceOf: {e}")))?;
        Ok(Bytes::from(calldata))
    }

    /// Decode the first `balanceOf` output as an unsigned integer.
    pub fn decode_balance_of(&self, data: &[u8]) -> Result<U256> {
        let function = self.balance_of()?;
        let values = function
            .abi_decode_output(data)
            .map_err(|e| BalanceError::Call(format!("failed to decode balanceOf output: {e}")))?;

        match values.first().and_then(DynSolValue::as_uint) {
            Some((value, _)) => Ok(value),
            None => Err(BalanceError::Call(format!(
                "balanceOf on {} did not return an unsigned integer",
                self.checksummed
            ))),
        }
    }

    fn balance_of(&self) -> Result<&Function> {
        self.function("balanceOf", &["address"]).ok_or_else(|| {
            BalanceError::Call(format!(
                "contract {} has no balanceOf(address) function",
                self.checksummed
            ))
        })
    }
}
