//! Fork, branch, commit and pull-request sequence for one validated agenda.

use std::time::{Duration, Instant};

use chrono::Utc;

use crate::domain::{
    AppError, CancellationToken, ForkPollConfig, PublicationRequest, PublishError,
    PublishErrorKind, PublishableAgenda, RepositoryApiError, RepositoryConfig, WorkflowState,
};
use crate::ports::{FileCommit, NewPullRequest, PullRequestInfo, RepoInfo, RepositoryApi};

/// Longest uninterrupted sleep while waiting between fork polls.
const CANCEL_CHECK_SLICE: Duration = Duration::from_millis(100);

pub struct PublicationWorkflow<R: RepositoryApi> {
    api: R,
    upstream_owner: String,
    upstream_name: String,
    fork_owner: String,
    poll: ForkPollConfig,
    cancel: CancellationToken,
}

impl<R: RepositoryApi> PublicationWorkflow<R> {
    pub fn new(
        api: R,
        repository: &RepositoryConfig,
        fork_owner: impl Into<String>,
        poll: ForkPollConfig,
    ) -> Self {
        Self {
            api,
            upstream_owner: repository.owner.clone(),
            upstream_name: repository.name.clone(),
            fork_owner: fork_owner.into(),
            poll,
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Handle a caller can use to abandon the run from another thread.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Publish a validated agenda under a freshly derived branch name.
    pub fn publish(&self, agenda: &PublishableAgenda) -> Result<PullRequestInfo, AppError> {
        let request = PublicationRequest::new(agenda, Utc::now())?;
        Ok(self.run(&request)?)
    }

    /// Drive the state machine for a prepared request.
    ///
    /// Nothing is rolled back on failure: a fork or branch created before the
    /// failing state stays in place, and the next attempt uses a new branch.
    pub fn run(&self, request: &PublicationRequest) -> Result<PullRequestInfo, PublishError> {
        self.execute(request).inspect_err(|err| {
            log::warn!("{} (from {}): {}", WorkflowState::Failed, err.state, err.kind);
        })
    }

    fn execute(&self, request: &PublicationRequest) -> Result<PullRequestInfo, PublishError> {
        let upstream_full_name = format!("{}/{}", self.upstream_owner, self.upstream_name);

        let state = self.enter(WorkflowState::CheckFork)?;
        let upstream = self
            .api
            .get_repo(&self.upstream_owner, &self.upstream_name)
            .map_err(|e| PublishError::new(state, e))?
            .ok_or_else(|| {
                PublishError::new(
                    state,
                    PublishErrorKind::UpstreamNotFound(upstream_full_name.clone()),
                )
            })?;
        let base_sha = upstream.default_branch_sha.clone().ok_or_else(|| {
            PublishError::new(
                state,
                RepositoryApiError::Parse(format!(
                    "{upstream_full_name} has no commit on {}",
                    upstream.default_branch
                )),
            )
        })?;

        let existing = self
            .api
            .get_repo(&self.fork_owner, &self.upstream_name)
            .map_err(|e| PublishError::new(state, e))?
            .filter(|repo| repo.is_fork_of(&upstream_full_name));

        let fork = match existing {
            Some(fork) if fork.default_branch_sha.is_some() => {
                log::info!("Using existing fork {}", fork.full_name);
                fork
            }
            Some(fork) => {
                self.enter(WorkflowState::WaitForForkReady)?;
                self.wait_for_fork(&fork.owner, &fork.name, &upstream_full_name)?
            }
            None => {
                let state = self.enter(WorkflowState::CreateForkIfMissing)?;
                let created = self
                    .api
                    .create_fork(&self.upstream_owner, &self.upstream_name)
                    .map_err(|e| PublishError::new(state, e))?;
                if created.name != self.upstream_name {
                    log::warn!("Fork was created as {}", created.full_name);
                }
                self.enter(WorkflowState::WaitForForkReady)?;
                self.wait_for_fork(&created.owner, &created.name, &upstream_full_name)?
            }
        };

        let state = self.enter(WorkflowState::CreateBranch)?;
        self.api
            .create_branch(&fork.owner, &fork.name, &request.branch_name, &base_sha)
            .map_err(|e| PublishError::new(state, e))?;

        let state = self.enter(WorkflowState::CommitFile)?;
        let commit = FileCommit {
            owner: fork.owner.clone(),
            repo: fork.name.clone(),
            branch: request.branch_name.clone(),
            path: request.file_path.clone(),
            content: request.file_content.clone(),
            message: request.commit_message.clone(),
        };
        self.api.commit_file(&commit).map_err(|e| PublishError::new(state, e))?;

        let state = self.enter(WorkflowState::OpenPR)?;
        let pull_request = NewPullRequest {
            owner: upstream.owner.clone(),
            repo: upstream.name.clone(),
            head: format!("{}:{}", fork.owner, request.branch_name),
            base: upstream.default_branch.clone(),
            title: request.pr_title.clone(),
            body: request.pr_body.clone(),
        };
        let opened =
            self.api.create_pull_request(&pull_request).map_err(|e| PublishError::new(state, e))?;

        log::info!("{}: {}", WorkflowState::Done, opened.url);
        Ok(opened)
    }

    fn enter(&self, state: WorkflowState) -> Result<WorkflowState, PublishError> {
        self.check_cancelled(state)?;
        log::info!("Publication state: {state}");
        Ok(state)
    }

    fn check_cancelled(&self, state: WorkflowState) -> Result<(), PublishError> {
        if self.cancel.is_cancelled() {
            return Err(PublishError::new(state, PublishErrorKind::Cancelled));
        }
        Ok(())
    }

    fn wait_for_fork(
        &self,
        owner: &str,
        name: &str,
        upstream_full_name: &str,
    ) -> Result<RepoInfo, PublishError> {
        let state = WorkflowState::WaitForForkReady;
        let attempts = self.poll.max_poll_attempts;

        for attempt in 1..=attempts {
            self.check_cancelled(state)?;
            match self.poll_fork(owner, name, upstream_full_name) {
                Ok(fork) => {
                    log::info!("Fork {} ready after {attempt} attempt(s)", fork.full_name);
                    return Ok(fork);
                }
                Err(err) if err.is_transient() => {
                    log::debug!("Fork {owner}/{name} not ready (attempt {attempt}/{attempts})");
                }
                Err(err) => return Err(err),
            }
            if attempt < attempts {
                self.pause(state)?;
            }
        }

        Err(PublishError::new(state, PublishErrorKind::ForkTimeout { attempts }))
    }

    fn poll_fork(
        &self,
        owner: &str,
        name: &str,
        upstream_full_name: &str,
    ) -> Result<RepoInfo, PublishError> {
        let state = WorkflowState::WaitForForkReady;
        match self.api.get_repo(owner, name) {
            Ok(Some(repo)) if repo.is_ready_fork_of(upstream_full_name) => Ok(repo),
            Ok(_) => Err(PublishError::new(state, PublishErrorKind::ForkNotReady)),
            Err(err) if err.is_not_found() => {
                Err(PublishError::new(state, PublishErrorKind::ForkNotReady))
            }
            Err(err) => Err(PublishError::new(state, err)),
        }
    }

    fn pause(&self, state: WorkflowState) -> Result<(), PublishError> {
        let deadline = Instant::now() + self.poll.poll_interval();
        loop {
            self.check_cancelled(state)?;
            let now = Instant::now();
            if now >= deadline {
                return Ok(());
            }
            std::thread::sleep((deadline - now).min(CANCEL_CHECK_SLICE));
        }
    }
}
