//! Hex format codec for addresses, hashes and byte strings.
//!
//! Every hex value handled by this crate is expected in its canonical
//! `0x`-prefixed form. Mixed case is accepted for addresses (EIP-55 checksums
//! are not enforced); comparisons are case-insensitive.

use alloy_primitives::{Address, B256, Bytes, hex};
use thiserror::Error;

/// Length in bytes of a recoverable secp256k1 signature (`r || s || v`).
pub const SIGNATURE_LEN: usize = 65;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid {what} '{value}': expected {expected}")]
pub struct FormatError {
    pub what: &'static str,
    pub value: String,
    pub expected: &'static str,
}

impl FormatError {
    fn new(what: &'static str, value: &str, expected: &'static str) -> Self {
        Self { what, value: value.to_string(), expected }
    }
}

fn strip_prefix(value: &str) -> Option<&str> {
    value.strip_prefix("0x").or_else(|| value.strip_prefix("0X"))
}

fn is_hex_of_len(value: &str, hex_len: usize) -> bool {
    strip_prefix(value)
        .is_some_and(|digits| digits.len() == hex_len && digits.bytes().all(|b| b.is_ascii_hexdigit()))
}

/// Whether `value` is a `0x`-prefixed 20-byte hex address.
pub fn is_address(value: &str) -> bool {
    is_hex_of_len(value, 40)
}

/// Whether `value` is a `0x`-prefixed 32-byte hex hash.
pub fn is_hash(value: &str) -> bool {
    is_hex_of_len(value, 64)
}

/// Whether `value` is a `0x`-prefixed 65-byte hex signature.
pub fn is_signature(value: &str) -> bool {
    is_hex_of_len(value, SIGNATURE_LEN * 2)
}

pub fn parse_address(value: &str) -> Result<Address, FormatError> {
    if !is_address(value) {
        return Err(FormatError::new("address", value, "0x followed by 40 hex digits"));
    }
    value.parse::<Address>().map_err(|_| FormatError::new("address", value, "a 20-byte address"))
}

pub fn parse_hash(value: &str) -> Result<B256, FormatError> {
    if !is_hash(value) {
        return Err(FormatError::new("transaction hash", value, "0x followed by 64 hex digits"));
    }
    value.parse::<B256>().map_err(|_| FormatError::new("transaction hash", value, "a 32-byte hash"))
}

/// Decode an arbitrary `0x`-prefixed, even-length hex byte string.
pub fn parse_hex_bytes(value: &str) -> Result<Bytes, FormatError> {
    let digits = strip_prefix(value)
        .ok_or_else(|| FormatError::new("hex bytes", value, "a 0x-prefixed hex string"))?;
    if digits.len() % 2 != 0 {
        return Err(FormatError::new("hex bytes", value, "an even number of hex digits"));
    }
    hex::decode(digits)
        .map(Bytes::from)
        .map_err(|_| FormatError::new("hex bytes", value, "only hex digits after 0x"))
}

pub fn parse_signature(value: &str) -> Result<[u8; SIGNATURE_LEN], FormatError> {
    if !is_signature(value) {
        return Err(FormatError::new("signature", value, "0x followed by 130 hex digits (65 bytes)"));
    }
    let bytes = parse_hex_bytes(value)?;
    let mut out = [0u8; SIGNATURE_LEN];
    out.copy_from_slice(&bytes);
    Ok(out)
}

/// Render bytes as a lowercase `0x` hex string.
pub fn to_hex(bytes: &[u8]) -> String {
    hex::encode_prefixed(bytes)
}
