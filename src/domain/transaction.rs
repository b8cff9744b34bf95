//! Raw transaction shape supplied by the RPC collaborator.

use alloy_primitives::{Address, B256, Bytes};
use serde::{Deserialize, Serialize};

/// A mined transaction together with the logs of its receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTransaction {
    pub hash: B256,
    pub from: Address,
    #[serde(alias = "input")]
    pub input_data: Bytes,
    #[serde(default)]
    pub logs: Vec<TransactionLog>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionLog {
    pub address: Address,
    #[serde(default)]
    pub topics: Vec<B256>,
    #[serde(default)]
    pub data: Bytes,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_rpc_style_input_field() {
        let json = format!(
            r#"{{"hash":"0x{}","from":"0x{}","input":"0xcafe","logs":[]}}"#,
            "11".repeat(32),
            "22".repeat(20)
        );
        let tx: RawTransaction = serde_json::from_str(&json).unwrap();
        assert_eq!(tx.input_data.as_ref(), &[0xca, 0xfe]);
        assert!(tx.logs.is_empty());
    }
}
