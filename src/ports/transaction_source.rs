//! Transaction sourcing port (RPC collaborator boundary).

use alloy_primitives::B256;

use crate::domain::{AppError, Network, RawTransaction};

pub trait TransactionSource {
    /// Fetch a mined transaction and its receipt logs.
    fn fetch(&self, hash: B256, network: Network) -> Result<RawTransaction, AppError>;
}
