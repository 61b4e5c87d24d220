//! Error kinds surfaced by the balance client

use thiserror::Error;

/// Errors returned by every `ethbal` operation.
///
/// Nothing is retried or translated: each variant carries the message of the
/// failure that produced it.
#[derive(Debug, Error)]
pub enum BalanceError {
    /// The RPC endpoint could not be reached at construction time.
    #[error("connection error: {0}")]
    Connection(String),

    /// An HTTP or JSON-RPC round trip failed.
    #[error("network error: {0}")]
    Network(String),

    /// A response body or ABI document could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// A contract call could not be encoded, reverted, or returned garbage.
    #[error("call error: {0}")]
    Call(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T, E = BalanceError> = std::result::Result<T, E>;
