//! Ethereum address validation and checksum (EIP-55)

use alloy_primitives::{keccak256, Address};

use crate::error::{BalanceError, Result};

/// Normalize an address of any case to its EIP-55 checksummed form.
///
/// The checksum is derived from the lowercase hex, so the result does not
/// depend on the casing of the input and normalizing twice is a no-op.
pub fn normalize_address(input: &str) -> Result<String> {
    let hex_part = hex_payload(input)?.to_ascii_lowercase();
    Ok(to_checksum_address(&hex_part))
}

/// Parse an address of any case into its 20-byte form.
pub fn parse_address(input: &str) -> Result<Address> {
    let hex_part = hex_payload(input)?;
    let bytes = hex::decode(hex_part)
        .map_err(|e| BalanceError::InvalidAddress(format!("{}: {}", input.trim(), e)))?;
    Ok(Address::from_slice(&bytes))
}

/// Strip the `0x` prefix and check for exactly 40 hex digits.
fn hex_payload(input: &str) -> Result<&str> {
    let trimmed = input.trim();
    let payload = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .ok_or_else(|| BalanceError::InvalidAddress(format!("{trimmed}: missing 0x prefix")))?;

    if payload.len() != 40 {
        return Err(BalanceError::InvalidAddress(format!(
            "{trimmed}: expected 40 hex characters, got {}",
            payload.len()
        )));
    }
    if !payload.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(BalanceError::InvalidAddress(format!(
            "{trimmed}: contains non-hex characters"
        )));
    }

    Ok(payload)
}

/// `addr` must be 40 lowercase hex characters without prefix.
fn to_checksum_address(addr: &str) -> String {
    let hash = keccak256(addr.as_bytes());
    let hash_hex = hex::encode(hash.as_slice());

    let mut result = String::with_capacity(42);
    result.push_str("0x");

    for (c, hash_char) in addr.chars().zip(hash_hex.chars()) {
        let hash_val = hash_char.to_digit(16).unwrap_or(0);

        if hash_val >= 8 {
            result.push(c.to_ascii_uppercase());
        } else {
            result.push(c);
        }
    }

    result
}
