//! Unit conversion: wei to ether, raw token amounts to display strings

use alloy_primitives::U256;

/// Number of wei in one ether.
pub const WEI_PER_ETH: u64 = 1_000_000_000_000_000_000;

/// Wei to ETH as f64
///
/// Whole and fractional parts are converted separately so large balances keep
/// their sub-ether precision as far as f64 allows.
pub fn wei_to_eth(wei: U256) -> f64 {
    let eth_in_wei = U256::from(WEI_PER_ETH);
    let whole = wei / eth_in_wei;
    let frac = wei % eth_in_wei;

    u256_to_f64(whole) + u256_to_f64(frac) / 1e18
}

/// Lossy conversion of a raw integer amount to f64.
pub fn u256_to_f64(value: U256) -> f64 {
    value.to_string().parse().unwrap_or(f64::INFINITY)
}

/// Format a raw integer amount with the given number of decimals
pub fn format_units(value: U256, decimals: u8) -> String {
    if decimals == 0 {
        return value.to_string();
    }

    let divisor = U256::from(10u64).pow(U256::from(decimals));
    let whole = value / divisor;
    let frac = value % divisor;

    if frac.is_zero() {
        return whole.to_string();
    }

    let frac_str = format!("{:0>width$}", frac.to_string(), width = decimals as usize);
    format!("{}.{}", whole, frac_str.trim_end_matches('0'))
}
