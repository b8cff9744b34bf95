//! Validate a metadata file and open a pull request for it.

use std::path::Path;

use chrono::{DateTime, Utc};

use crate::app::AppContext;
use crate::app::publication::PublicationWorkflow;
use crate::domain::{AppError, PublishableAgenda};
use crate::ports::{PullRequestInfo, RepositoryApi};

pub fn execute<R: RepositoryApi>(
    ctx: &AppContext<R>,
    path: &Path,
    now: DateTime<Utc>,
) -> Result<PullRequestInfo, AppError> {
    let content = std::fs::read_to_string(path)?;
    let agenda = PublishableAgenda::from_document(&content, now)?;
    publish_agenda(ctx, &agenda)
}

/// Run the publication workflow, stopping between steps once the context is cancelled.
pub fn publish_agenda<R: RepositoryApi>(
    ctx: &AppContext<R>,
    agenda: &PublishableAgenda,
) -> Result<PullRequestInfo, AppError> {
    let config = ctx.config();
    let fork_owner = config.repository.resolve_fork_owner()?;
    let workflow = PublicationWorkflow::new(
        ctx.repository(),
        &config.repository,
        fork_owner,
        config.fork.clone(),
    )
    .with_cancellation(ctx.cancellation().clone());

    let pull_request = workflow.publish(agenda)?;
    log::info!("Opened pull request #{} for agenda {}", pull_request.number, agenda.metadata().id);
    Ok(pull_request)
}
