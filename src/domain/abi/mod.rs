//! ABI domain models
//!
//! Pure decoding of explorer-provided ABI JSON; no network access.

mod descriptor;

pub use descriptor::{decode_abi, descriptors, parse_abi, AbiDescriptor, AbiItemKind, ParamSpec};
