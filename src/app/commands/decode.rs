//! Recover the proposal draft of a "create agenda" transaction.

use crate::domain::address::parse_hash;
use crate::domain::calldata::{ProposalDraft, decode};
use crate::domain::{AppError, Network, RawTransaction};
use crate::ports::TransactionSource;

/// Fetch a transaction by its `0x`-prefixed hash.
pub fn fetch<T: TransactionSource + ?Sized>(
    source: &T,
    tx_hash: &str,
    network: Network,
) -> Result<RawTransaction, AppError> {
    let hash = parse_hash(tx_hash)?;
    log::debug!("Fetching {hash} on {network}");
    source.fetch(hash, network)
}

pub fn execute(tx: &RawTransaction) -> Result<ProposalDraft, AppError> {
    let draft = decode(tx)?;
    log::info!(
        "Decoded agenda {} with {} action(s) under layout {:?}",
        draft.agenda_id(),
        draft.target_calldatas.len(),
        draft.layout
    );
    Ok(draft)
}
