use serde::{Deserialize, Serialize};

use super::{Action, AgendaMetadata, Creator};
use crate::domain::AppError;
use crate::domain::abi::{AbiRegistry, decode_call};
use crate::domain::address::to_hex;
use crate::domain::attestation::build_message;
use crate::domain::calldata::ProposalDraft;
use crate::domain::network::Network;

/// Human-written fields the creator supplies for a decoded agenda.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgendaForm {
    pub title: String,
    pub description: String,
}

/// A metadata record that is complete except for the creator's signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsignedAgenda {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub network: Network,
    pub transaction_hash: String,
    pub creator_address: String,
    pub actions: Vec<Action>,
    pub created_at: String,
}

impl UnsignedAgenda {
    /// Build the record for `draft`, resolving each target calldata against `registry`.
    pub fn from_draft(
        draft: &ProposalDraft,
        network: Network,
        form: AgendaForm,
        created_at: impl Into<String>,
        registry: &AbiRegistry,
    ) -> Result<Self, AppError> {
        let actions = draft
            .calls()
            .enumerate()
            .map(|(index, (target, calldata))| {
                let fragment = registry.find_for_calldata(calldata).ok_or_else(|| {
                    AppError::UnknownSelector {
                        index,
                        selector: to_hex(&calldata[..calldata.len().min(4)]),
                    }
                })?;
                decode_call(fragment, calldata)?;
                Ok(Action {
                    contract_address: target.to_checksum(None),
                    method: fragment.signature(),
                    calldata: to_hex(calldata),
                    abi_fragment: fragment.clone(),
                })
            })
            .collect::<Result<Vec<_>, AppError>>()?;

        Ok(Self {
            id: draft.agenda_id(),
            title: form.title,
            description: form.description,
            network,
            transaction_hash: to_hex(draft.transaction_hash.as_slice()),
            creator_address: draft.creation_event.creator_address.to_checksum(None),
            actions,
            created_at: created_at.into(),
        })
    }

    /// The message the creator's wallet must sign.
    pub fn message(&self) -> String {
        build_message(self.id, &self.transaction_hash, &self.created_at, false)
    }

    pub fn attach_signature(self, signature: impl Into<String>) -> AgendaMetadata {
        AgendaMetadata {
            id: self.id,
            title: self.title,
            description: self.description,
            network: self.network,
            transaction_hash: self.transaction_hash,
            creator: Creator { address: self.creator_address, signature: signature.into() },
            actions: self.actions,
            created_at: self.created_at,
            updated_at: None,
        }
    }
}
