use alloy_dyn_abi::{DynSolValue, JsonAbiExt};
use alloy_json_abi::Function;
use alloy_primitives::hex;

use super::AbiError;

/// Decode `calldata` as a call to `function`.
///
/// The selector must match and the arguments must re-encode to exactly the
/// bytes given, so trailing data and dirty padding are rejected.
pub fn decode_call(function: &Function, calldata: &[u8]) -> Result<Vec<DynSolValue>, AbiError> {
    let (selector, args) = calldata.split_first_chunk::<4>().ok_or(AbiError::MissingSelector)?;
    let expected = function.selector();
    if selector != &expected.0 {
        return Err(AbiError::SelectorMismatch {
            signature: function.signature(),
            expected: hex::encode_prefixed(expected),
            found: hex::encode_prefixed(selector),
        });
    }

    let values = function.abi_decode_input(args, true).map_err(|e| AbiError::Decode {
        signature: function.signature(),
        details: e.to_string(),
    })?;

    let reencoded = function.abi_encode_input(&values).map_err(|e| AbiError::Decode {
        signature: function.signature(),
        details: e.to_string(),
    })?;
    if reencoded != calldata {
        return Err(AbiError::NonCanonical(function.signature()));
    }
    Ok(values)
}
