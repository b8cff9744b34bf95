use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::domain::RepositoryApiError;
use crate::ports::{FileCommit, NewPullRequest, PullRequestInfo, RepoInfo, RepositoryApi};

/// In-memory repository host with a scripted fork provisioning delay.
#[derive(Debug, Clone)]
pub struct FakeRepositoryApi {
    upstream: Option<RepoInfo>,
    fork_owner: String,
    state: Arc<Mutex<FakeState>>,
    pub calls: Arc<Mutex<Vec<String>>>,
    pub branches: Arc<Mutex<Vec<(String, String)>>>,
    pub commits: Arc<Mutex<Vec<FileCommit>>>,
    pub pull_requests: Arc<Mutex<Vec<NewPullRequest>>>,
}

#[derive(Debug, Default)]
struct FakeState {
    /// Repository currently at `fork_owner/<name>`.
    fork: Option<RepoInfo>,
    /// Lookups that still answer 404 after a fork was requested.
    pending_lookups: u32,
    ready_after: u32,
    failures: HashMap<&'static str, RepositoryApiError>,
}

impl FakeRepositoryApi {
    pub const UPSTREAM_OWNER: &'static str = "tokamak-network";
    pub const UPSTREAM_NAME: &'static str = "dao-agenda-metadata-repository";
    pub const UPSTREAM_SHA: &'static str = "0123456789abcdef0123456789abcdef01234567";

    /// Upstream exists, no fork yet; a requested fork is ready immediately.
    pub fn new(fork_owner: &str) -> Self {
        let upstream = RepoInfo {
            owner: Self::UPSTREAM_OWNER.into(),
            name: Self::UPSTREAM_NAME.into(),
            full_name: format!("{}/{}", Self::UPSTREAM_OWNER, Self::UPSTREAM_NAME),
            default_branch: "main".into(),
            parent_full_name: None,
            default_branch_sha: Some(Self::UPSTREAM_SHA.into()),
        };
        Self {
            upstream: Some(upstream),
            fork_owner: fork_owner.to_string(),
            state: Arc::new(Mutex::new(FakeState::default())),
            calls: Arc::new(Mutex::new(Vec::new())),
            branches: Arc::new(Mutex::new(Vec::new())),
            commits: Arc::new(Mutex::new(Vec::new())),
            pull_requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn upstream_full_name() -> String {
        format!("{}/{}", Self::UPSTREAM_OWNER, Self::UPSTREAM_NAME)
    }

    pub fn without_upstream(mut self) -> Self {
        self.upstream = None;
        self
    }

    /// A ready fork already exists.
    pub fn with_existing_fork(self) -> Self {
        let fork = self.fork_repo(Self::UPSTREAM_NAME, Some(Self::UPSTREAM_SHA));
        self.state.lock().unwrap().fork = Some(fork);
        self
    }

    /// A repository with the upstream's name that is not a fork of it.
    pub fn with_unrelated_repo(self) -> Self {
        let mut repo = self.fork_repo(Self::UPSTREAM_NAME, Some("fedcba"));
        repo.parent_full_name = None;
        self.state.lock().unwrap().fork = Some(repo);
        self
    }

    /// The next `lookups` fork lookups after a fork request answer 404.
    pub fn fork_ready_after(self, lookups: u32) -> Self {
        self.state.lock().unwrap().ready_after = lookups;
        self
    }

    /// Make `primitive` (e.g. `"commit_file"`) fail with `error`.
    pub fn failing(self, primitive: &'static str, error: RepositoryApiError) -> Self {
        self.state.lock().unwrap().failures.insert(primitive, error);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, primitive: &str) -> usize {
        self.calls().iter().filter(|call| call.split(' ').next() == Some(primitive)).count()
    }

    fn fork_repo(&self, name: &str, sha: Option<&str>) -> RepoInfo {
        RepoInfo {
            owner: self.fork_owner.clone(),
            name: name.to_string(),
            full_name: format!("{}/{name}", self.fork_owner),
            default_branch: "main".into(),
            parent_full_name: Some(Self::upstream_full_name()),
            default_branch_sha: sha.map(Into::into),
        }
    }

    fn record(&self, primitive: &'static str, detail: String) -> Result<(), RepositoryApiError> {
        self.calls.lock().unwrap().push(format!("{primitive} {detail}"));
        match self.state.lock().unwrap().failures.get(primitive) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

impl RepositoryApi for FakeRepositoryApi {
    fn get_repo(&self, owner: &str, name: &str) -> Result<Option<RepoInfo>, RepositoryApiError> {
        self.record("get_repo", format!("{owner}/{name}"))?;

        if let Some(upstream) = &self.upstream
            && owner == upstream.owner
            && name == upstream.name
        {
            return Ok(Some(upstream.clone()));
        }
        if owner != self.fork_owner {
            return Ok(None);
        }

        let mut state = self.state.lock().unwrap();
        let Some(fork) = state.fork.clone().filter(|fork| fork.name == name) else {
            return Ok(None);
        };
        if state.pending_lookups > 0 {
            state.pending_lookups -= 1;
            return Ok(None);
        }
        Ok(Some(fork))
    }

    fn create_fork(&self, owner: &str, name: &str) -> Result<RepoInfo, RepositoryApiError> {
        self.record("create_fork", format!("{owner}/{name}"))?;

        let mut state = self.state.lock().unwrap();
        // The host picks a new name when a same-named repository is in the way.
        let fork_name = match &state.fork {
            Some(existing) if existing.parent_full_name.is_none() => format!("{name}-1"),
            _ => name.to_string(),
        };
        let provisioned = self.fork_repo(&fork_name, Some(Self::UPSTREAM_SHA));
        state.fork = Some(provisioned);
        state.pending_lookups = state.ready_after;

        Ok(self.fork_repo(&fork_name, None))
    }

    fn create_branch(
        &self,
        owner: &str,
        name: &str,
        branch: &str,
        base_sha: &str,
    ) -> Result<(), RepositoryApiError> {
        self.record("create_branch", format!("{owner}/{name} {branch}"))?;
        self.branches.lock().unwrap().push((branch.to_string(), base_sha.to_string()));
        Ok(())
    }

    fn commit_file(&self, commit: &FileCommit) -> Result<(), RepositoryApiError> {
        self.record("commit_file", format!("{}/{} {}", commit.owner, commit.repo, commit.path))?;
        self.commits.lock().unwrap().push(commit.clone());
        Ok(())
    }

    fn create_pull_request(
        &self,
        request: &NewPullRequest,
    ) -> Result<PullRequestInfo, RepositoryApiError> {
        self.record("create_pull_request", request.head.clone())?;
        let mut pull_requests = self.pull_requests.lock().unwrap();
        pull_requests.push(request.clone());
        let number = pull_requests.len() as u64 + 100;
        Ok(PullRequestInfo {
            number,
            url: format!("https://github.com/{}/{}/pull/{number}", request.owner, request.repo),
        })
    }
}
