//! ABI descriptors decoded from explorer JSON

use alloy_json_abi::{EventParam, JsonAbi, Param, StateMutability};
use serde::{Deserialize, Serialize};

use crate::error::{BalanceError, Result};

/// Kind of ABI item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AbiItemKind {
    Function,
    Event,
    Error,
    Constructor,
    Fallback,
    Receive,
}

/// A parameter specification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamSpec {
    /// Parameter name (may be empty)
    pub name: String,
    /// Solidity type (e.g., "address", "uint256", "(uint256,address)")
    pub kind: String,
}

/// One callable or emitted item of a contract ABI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiDescriptor {
    pub kind: AbiItemKind,
    /// Item name; empty for constructor, fallback and receive
    pub name: String,
    /// Full signature (e.g., "transfer(address,uint256)") where one exists
    pub signature: Option<String>,
    /// 4-byte selector, functions only
    pub selector: Option<[u8; 4]>,
    pub inputs: Vec<ParamSpec>,
    pub outputs: Vec<ParamSpec>,
    /// "pure", "view", "nonpayable" or "payable"
    pub state_mutability: Option<String>,
}

impl AbiDescriptor {
    /// Get selector as hex string
    pub fn selector_hex(&self) -> Option<String> {
        self.selector.map(|s| format!("0x{}", hex::encode(s)))
    }

    /// Whether the item can be called without a transaction
    pub fn is_read_only(&self) -> bool {
        matches!(self.state_mutability.as_deref(), Some("view" | "pure"))
    }
}

/// Parse a JSON-encoded ABI.
///
/// Only a top-level ABI array is accepted; anything else is a decode error.
pub fn parse_abi(json: &str) -> Result<JsonAbi> {
    let value: serde_json::Value = serde_json::from_str(json)
        .map_err(|e| BalanceError::Decode(format!("ABI is not valid JSON: {e}")))?;

    if !value.is_array() {
        return Err(BalanceError::Decode("ABI must be a JSON array".into()));
    }

    serde_json::from_value(value)
        .map_err(|e| BalanceError::Decode(format!("ABI has an invalid shape: {e}")))
}

/// Decode a JSON-encoded ABI into flat descriptors.
pub fn decode_abi(json: &str) -> Result<Vec<AbiDescriptor>> {
    Ok(descriptors(&parse_abi(json)?))
}

/// Flatten a parsed ABI.
///
/// Order is stable: constructor, functions, events, errors (each by name),
/// then fallback and receive.
pub fn descriptors(abi: &JsonAbi) -> Vec<AbiDescriptor> {
    let mut out = Vec::new();

    if let Some(constructor) = &abi.constructor {
        out.push(AbiDescriptor {
            kind: AbiItemKind::Constructor,
            name: String::new(),
            signature: None,
            selector: None,
            inputs: params(&constructor.inputs),
            outputs: Vec::new(),
            state_mutability: Some(mutability(constructor.state_mutability)),
        });
    }

    for function in abi.functions() {
        out.push(AbiDescriptor {
            kind: AbiItemKind::Function,
            name: function.name.clone(),
            signature: Some(function.signature()),
            selector: Some(function.selector().0),
            inputs: params(&function.inputs),
            outputs: params(&function.outputs),
            state_mutability: Some(mutability(function.state_mutability)),
        });
    }

    for event in abi.events() {
        out.push(AbiDescriptor {
            kind: AbiItemKind::Event,
            name: event.name.clone(),
            signature: Some(event.signature()),
            selector: None,
            inputs: event_params(&event.inputs),
            outputs: Vec::new(),
            state_mutability: None,
        });
    }

    for error in abi.errors() {
        out.push(AbiDescriptor {
            kind: AbiItemKind::Error,
            name: error.name.clone(),
            signature: Some(error.signature()),
            selector: None,
            inputs: params(&error.inputs),
            outputs: Vec::new(),
            state_mutability: None,
        });
    }

    if let Some(fallback) = &abi.fallback {
        out.push(AbiDescriptor {
            kind: AbiItemKind::Fallback,
            name: String::new(),
            signature: None,
            selector: None,
            inputs: Vec::new(),
            outputs: Vec::new(),
            state_mutability: Some(mutability(fallback.state_mutability)),
        });
    }

    if let Some(receive) = &abi.receive {
        out.push(AbiDescriptor {
            kind: AbiItemKind::Receive,
            name: String::new(),
            signature: None,
            selector: None,
            inputs: Vec::new(),
            outputs: Vec::new(),
            state_mutability: Some(mutability(receive.state_mutability)),
        });
    }

    out
}

fn mutability(state_mutability: StateMutability) -> String {
    match state_mutability {
        StateMutability::Pure => "pure",
        StateMutability::View => "view",
        StateMutability::NonPayable => "nonpayable",
        StateMutability::Payable => "payable",
    }
    .to_string()
}

fn params(params: &[Param]) -> Vec<ParamSpec> {
    params
        .iter()
        .map(|param| ParamSpec {
            name: param.name.clone(),
            kind: param.selector_type().into_owned(),
        })
        .collect()
}

fn event_params(params: &[EventParam]) -> Vec<ParamSpec> {
    params
        .iter()
        .map(|param| ParamSpec {
            name: param.name.clone(),
            kind: param.selector_type().into_owned(),
        })
        .collect()
}
