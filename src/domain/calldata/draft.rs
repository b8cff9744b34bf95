use alloy_primitives::{Address, B256, Bytes, U256};
use serde::Serialize;

use super::Layout;
use super::contracts::{LayoutAPayload, LayoutBPayload};

/// Fields of the single `AgendaCreated` log of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreationEvent {
    pub creator_address: Address,
    pub agenda_id: u64,
    pub targets: Vec<Address>,
    pub notice_period_seconds: u128,
    pub voting_period_seconds: u128,
    pub atomic_execute: bool,
}

/// Structured proposal data recovered from one transaction. Read-only once decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalDraft {
    pub transaction_hash: B256,
    pub creation_event: CreationEvent,
    /// One entry per target, in target order.
    pub target_calldatas: Vec<Bytes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo_url: Option<String>,
    pub layout: Layout,
}

impl ProposalDraft {
    pub fn agenda_id(&self) -> u64 {
        self.creation_event.agenda_id
    }

    /// `(target, calldata)` pairs in execution order.
    pub fn calls(&self) -> impl Iterator<Item = (&Address, &Bytes)> {
        self.creation_event.targets.iter().zip(self.target_calldatas.iter())
    }
}

/// The inner agenda-creation call, as decoded under one layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgendaCall {
    pub targets: Vec<Address>,
    pub notice_period: U256,
    pub voting_period: U256,
    pub atomic_execute: bool,
    pub calldatas: Vec<Bytes>,
    pub memo: Option<String>,
}

impl From<LayoutAPayload> for AgendaCall {
    fn from(
        (targets, notice_period, voting_period, atomic_execute, calldatas): LayoutAPayload,
    ) -> Self {
        Self { targets, notice_period, voting_period, atomic_execute, calldatas, memo: None }
    }
}

impl From<LayoutBPayload> for AgendaCall {
    fn from(
        (targets, notice_period, voting_period, atomic_execute, calldatas, memo): LayoutBPayload,
    ) -> Self {
        Self { targets, notice_period, voting_period, atomic_execute, calldatas, memo: Some(memo) }
    }
}

pub(crate) fn u256_to_u64(value: U256) -> Option<u64> {
    (value <= U256::from(u64::MAX)).then(|| value.as_limbs()[0])
}

pub(crate) fn u256_to_u128(value: U256) -> Option<u128> {
    (value <= U256::from(u128::MAX)).then(|| {
        let limbs = value.as_limbs();
        (u128::from(limbs[1]) << 64) | u128::from(limbs[0])
    })
}
