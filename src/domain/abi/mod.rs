//! Action fragments and calldata checks on top of the alloy ABI crates.

mod call;
mod error;
mod registry;

pub use alloy_dyn_abi::DynSolValue;
pub use alloy_json_abi::Function;
pub use call::decode_call;
pub use error::AbiError;
pub use registry::AbiRegistry;
