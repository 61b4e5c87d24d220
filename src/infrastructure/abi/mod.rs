//! ABI infrastructure - block-explorer ABI lookups

mod resolver;

pub use resolver::{AbiResolver, DEFAULT_EXPLORER_URL};
