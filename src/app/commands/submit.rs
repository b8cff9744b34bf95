//! One submission end to end: fetch, decode, assemble, validate, publish.

use std::path::PathBuf;

use chrono::{DateTime, Utc};

use super::{decode, publish};
use crate::app::AppContext;
use crate::domain::abi::AbiRegistry;
use crate::domain::{
    AgendaForm, AppError, Network, PublishableAgenda, UnsignedAgenda, ensure_publishable,
};
use crate::domain::publication::agenda_file_path;
use crate::ports::{PullRequestInfo, RepositoryApi, TransactionSource};

#[derive(Debug, Clone)]
pub struct SubmitOptions {
    pub network: Network,
    pub tx_hash: String,
    pub form: AgendaForm,
    /// Timestamp the creator signed over.
    pub created_at: String,
    pub signature: String,
    /// JSON ABI files used to resolve each action's function.
    pub abi_files: Vec<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    pub agenda: PublishableAgenda,
    pub file_path: String,
    /// `None` for a dry run.
    pub pull_request: Option<PullRequestInfo>,
}

pub fn load_registry(files: &[PathBuf]) -> Result<AbiRegistry, AppError> {
    let mut registry = AbiRegistry::new();
    for file in files {
        let content = std::fs::read_to_string(file)?;
        registry.extend(AbiRegistry::from_json(&content)?);
    }
    if registry.is_empty() {
        log::warn!("No ABI fragments loaded; every action will be rejected");
    }
    Ok(registry)
}

/// Build and validate the signed record without touching the repository.
pub fn prepare<T: TransactionSource + ?Sized>(
    source: &T,
    options: &SubmitOptions,
    now: DateTime<Utc>,
) -> Result<PublishableAgenda, AppError> {
    let tx = decode::fetch(source, &options.tx_hash, options.network)?;
    let draft = decode::execute(&tx)?;
    let registry = load_registry(&options.abi_files)?;

    let unsigned = UnsignedAgenda::from_draft(
        &draft,
        options.network,
        options.form.clone(),
        options.created_at.clone(),
        &registry,
    )?;
    ensure_publishable(unsigned.attach_signature(options.signature.clone()), now)
}

pub fn execute<T: TransactionSource + ?Sized, R: RepositoryApi>(
    ctx: Option<&AppContext<R>>,
    source: &T,
    options: &SubmitOptions,
    now: DateTime<Utc>,
) -> Result<SubmitOutcome, AppError> {
    let agenda = prepare(source, options, now)?;
    let metadata = agenda.metadata();
    let file_path = agenda_file_path(metadata.network, metadata.id);

    let pull_request = match ctx {
        Some(ctx) => Some(publish::publish_agenda(ctx, &agenda)?),
        None => {
            log::info!("Dry run: {file_path} not published");
            None
        }
    };
    Ok(SubmitOutcome { agenda, file_path, pull_request })
}
