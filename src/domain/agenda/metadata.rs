use serde::{Deserialize, Serialize};

use crate::domain::AppError;
use crate::domain::abi::Function;
use crate::domain::attestation::{Attestation, build_message};
use crate::domain::network::Network;

/// The published agenda record, serialized as `data/agendas/<network>/agenda-<id>.json`.
///
/// Field order is the serialization order. Hex values are kept exactly as signed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgendaMetadata {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub network: Network,
    pub transaction_hash: String,
    pub creator: Creator,
    pub actions: Vec<Action>,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creator {
    pub address: String,
    pub signature: String,
}

/// One call the agenda executes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    pub contract_address: String,
    /// Canonical function signature, e.g. `transfer(address,uint256)`.
    pub method: String,
    pub calldata: String,
    pub abi_fragment: Function,
}

impl AgendaMetadata {
    pub fn is_update(&self) -> bool {
        self.updated_at.is_some()
    }

    pub fn attestation(&self) -> Attestation<'_> {
        Attestation {
            agenda_id: self.id,
            transaction_hash: &self.transaction_hash,
            created_at: &self.created_at,
            updated_at: self.updated_at.as_deref(),
            signer: &self.creator.address,
            signature: &self.creator.signature,
        }
    }

    /// The message the creator must sign to update this record at `updated_at`.
    pub fn update_message(&self, updated_at: &str) -> String {
        build_message(self.id, &self.transaction_hash, updated_at, true)
    }

    /// Turn this record into its update variant, replacing the creator signature.
    pub fn with_update(mut self, updated_at: impl Into<String>, signature: impl Into<String>) -> Self {
        self.updated_at = Some(updated_at.into());
        self.creator.signature = signature.into();
        self
    }

    /// Pretty JSON with a trailing newline, as committed to the repository.
    pub fn to_document(&self) -> Result<String, AppError> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }
}
