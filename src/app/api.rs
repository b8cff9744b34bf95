//! API facade for the application.
//!
//! Builds the HTTP adapters from configuration and runs one command each.

use std::path::Path;

use chrono::{DateTime, Utc};

use crate::app::AppContext;
use crate::app::commands::{decode, message, publish, submit, validate};
use crate::ports::{PullRequestInfo, TransactionSource};
use crate::services::{GitHubRepositoryApi, HttpRpcTransactionSource, JsonFileTransactionSource};

pub use crate::app::commands::message::{MessageOptions, MessageOutcome};
pub use crate::app::commands::submit::{SubmitOptions, SubmitOutcome};
pub use crate::domain::calldata::ProposalDraft;
pub use crate::domain::configuration::load_config;
pub use crate::domain::{AppConfig, AppError, CancellationToken, Network, ValidationReport};

fn transaction_source(
    config: &AppConfig,
    tx_file: Option<&Path>,
) -> Result<Box<dyn TransactionSource>, AppError> {
    match tx_file {
        Some(path) => Ok(Box::new(JsonFileTransactionSource::new(path))),
        None => Ok(Box::new(HttpRpcTransactionSource::new(&config.rpc)?)),
    }
}

fn github_context(
    config: AppConfig,
    cancel: CancellationToken,
) -> Result<AppContext<GitHubRepositoryApi>, AppError> {
    let api = GitHubRepositoryApi::from_env_with_config(&config.github)?;
    Ok(AppContext::new(config, api).with_cancellation(cancel))
}

/// Decode a "create agenda" transaction, read from `tx_file` or fetched by hash.
pub fn decode_transaction(
    config: &AppConfig,
    network: Network,
    tx_hash: Option<&str>,
    tx_file: Option<&Path>,
) -> Result<ProposalDraft, AppError> {
    let tx = match (tx_hash, tx_file) {
        (None, Some(path)) => JsonFileTransactionSource::new(path).load()?,
        (Some(hash), _) => {
            let source = transaction_source(config, tx_file)?;
            decode::fetch(source.as_ref(), hash, network)?
        }
        (None, None) => {
            return Err(AppError::config_error("A transaction hash or transaction file is required"));
        }
    };
    decode::execute(&tx)
}

/// Build the message a creator signs, stamped now unless a timestamp is given.
pub fn attestation_message(options: &MessageOptions) -> Result<MessageOutcome, AppError> {
    message::execute(options, Utc::now())
}

/// Validate a metadata file as of `now` (defaults to the current time).
pub fn validate_metadata(
    path: &Path,
    now: Option<DateTime<Utc>>,
) -> Result<ValidationReport, AppError> {
    validate::execute(path, now.unwrap_or_else(Utc::now))
}

/// Validate a metadata file and open a pull request for it.
///
/// Cancelling `cancel` stops the workflow before its next repository step.
pub fn publish_metadata(
    config: AppConfig,
    path: &Path,
    cancel: CancellationToken,
) -> Result<PullRequestInfo, AppError> {
    let ctx = github_context(config, cancel)?;
    publish::execute(&ctx, path, Utc::now())
}

/// Decode, assemble, validate and (unless `dry_run`) publish one submission.
pub fn submit_agenda(
    config: AppConfig,
    options: &SubmitOptions,
    tx_file: Option<&Path>,
    dry_run: bool,
    cancel: CancellationToken,
) -> Result<SubmitOutcome, AppError> {
    let source = transaction_source(&config, tx_file)?;
    if dry_run {
        let now = Utc::now();
        return submit::execute::<_, GitHubRepositoryApi>(None, source.as_ref(), options, now);
    }
    let ctx = github_context(config, cancel)?;
    submit::execute(Some(&ctx), source.as_ref(), options, Utc::now())
}
