//! Domain layer - pure address, ABI and unit helpers
//!
//! Nothing in here touches the network.

pub mod abi;
pub mod address;
pub mod contract;
pub mod units;

pub use address::{normalize_address, parse_address};
pub use contract::ContractHandle;
