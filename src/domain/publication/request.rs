use chrono::{DateTime, Utc};
use rand::RngCore;

use crate::domain::AppError;
use crate::domain::address::to_hex;
use crate::domain::network::Network;
use crate::domain::validation::PublishableAgenda;

/// Everything the workflow writes for one record, derived from a validated agenda.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicationRequest {
    pub branch_name: String,
    pub file_path: String,
    pub file_content: String,
    pub pr_title: String,
    pub pr_body: String,
    pub commit_message: String,
    pub is_update: bool,
}

/// Repository path of an agenda's metadata file.
pub fn agenda_file_path(network: Network, id: u64) -> String {
    format!("data/agendas/{network}/agenda-{id}.json")
}

impl PublicationRequest {
    /// Derive a request with a fresh random branch suffix.
    pub fn new(agenda: &PublishableAgenda, now: DateTime<Utc>) -> Result<Self, AppError> {
        let mut suffix = [0u8; 3];
        rand::thread_rng().fill_bytes(&mut suffix);
        Self::with_suffix(agenda, now, &to_hex(&suffix)[2..])
    }

    pub fn with_suffix(
        agenda: &PublishableAgenda,
        now: DateTime<Utc>,
        suffix: &str,
    ) -> Result<Self, AppError> {
        let metadata = agenda.metadata();
        let is_update = metadata.is_update();
        let verb = if is_update { "Update" } else { "Add" };

        Ok(Self {
            branch_name: format!("agenda-{}-{}-{suffix}", metadata.id, now.format("%Y%m%d%H%M%S")),
            file_path: agenda_file_path(metadata.network, metadata.id),
            file_content: metadata.to_document()?,
            pr_title: format!("[Agenda] {} - {} - {}", metadata.network, metadata.id, metadata.title),
            pr_body: pr_body(agenda),
            commit_message: format!("{verb} agenda {} metadata ({})", metadata.id, metadata.network),
            is_update,
        })
    }
}

fn pr_body(agenda: &PublishableAgenda) -> String {
    let metadata = agenda.metadata();
    let kind = if metadata.is_update() { "Update" } else { "Submission" };

    let mut body = format!(
        "## Agenda Metadata {kind}\n\n\
         - **Network**: {}\n\
         - **Agenda ID**: {}\n\
         - **Title**: {}\n\
         - **Transaction Hash**: `{}`\n\
         - **Creator Address**: `{}`\n\
         - **Signature**: `{}`\n\
         - **Created At**: {}\n",
        metadata.network,
        metadata.id,
        metadata.title,
        metadata.transaction_hash,
        metadata.creator.address,
        metadata.creator.signature,
        metadata.created_at,
    );
    if let Some(updated_at) = &metadata.updated_at {
        body.push_str(&format!("- **Updated At**: {updated_at}\n"));
    }
    body.push_str(&format!("- **Actions**: {}\n", metadata.actions.len()));
    body.push_str(&format!("\n### Description\n\n{}\n", metadata.description));
    body
}
