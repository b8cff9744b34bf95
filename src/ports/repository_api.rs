//! Repository hosting API port: the five primitives the publication workflow uses.

use crate::domain::RepositoryApiError;

/// Repository state relevant to publishing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoInfo {
    pub owner: String,
    pub name: String,
    pub full_name: String,
    pub default_branch: String,
    /// `owner/name` of the upstream repository when this is a fork.
    pub parent_full_name: Option<String>,
    /// Tip commit of the default branch; `None` while a fork is still being provisioned.
    pub default_branch_sha: Option<String>,
}

impl RepoInfo {
    /// Whether this repository is a fork of `upstream`, not just a same-named repository.
    pub fn is_fork_of(&self, upstream: &str) -> bool {
        self.parent_full_name.as_deref().is_some_and(|parent| parent.eq_ignore_ascii_case(upstream))
    }

    pub fn is_ready_fork_of(&self, upstream: &str) -> bool {
        self.is_fork_of(upstream) && self.default_branch_sha.is_some()
    }
}

/// A single-file commit onto an existing branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCommit {
    pub owner: String,
    pub repo: String,
    pub branch: String,
    pub path: String,
    pub content: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPullRequest {
    pub owner: String,
    pub repo: String,
    /// `fork_owner:branch`.
    pub head: String,
    pub base: String,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestInfo {
    pub number: u64,
    pub url: String,
}

/// Port for repository hosting operations.
pub trait RepositoryApi {
    /// Look up a repository; `Ok(None)` when it does not exist.
    fn get_repo(&self, owner: &str, name: &str) -> Result<Option<RepoInfo>, RepositoryApiError>;

    /// Request a fork of `owner/name` into the authenticated account.
    fn create_fork(&self, owner: &str, name: &str) -> Result<RepoInfo, RepositoryApiError>;

    fn create_branch(
        &self,
        owner: &str,
        name: &str,
        branch: &str,
        base_sha: &str,
    ) -> Result<(), RepositoryApiError>;

    fn commit_file(&self, commit: &FileCommit) -> Result<(), RepositoryApiError>;

    fn create_pull_request(
        &self,
        request: &NewPullRequest,
    ) -> Result<PullRequestInfo, RepositoryApiError>;
}

impl<T: RepositoryApi + ?Sized> RepositoryApi for &T {
    fn get_repo(&self, owner: &str, name: &str) -> Result<Option<RepoInfo>, RepositoryApiError> {
        (**self).get_repo(owner, name)
    }

    fn create_fork(&self, owner: &str, name: &str) -> Result<RepoInfo, RepositoryApiError> {
        (**self).create_fork(owner, name)
    }

    fn create_branch(
        &self,
        owner: &str,
        name: &str,
        branch: &str,
        base_sha: &str,
    ) -> Result<(), RepositoryApiError> {
        (**self).create_branch(owner, name, branch, base_sha)
    }

    fn commit_file(&self, commit: &FileCommit) -> Result<(), RepositoryApiError> {
        (**self).commit_file(commit)
    }

    fn create_pull_request(
        &self,
        request: &NewPullRequest,
    ) -> Result<PullRequestInfo, RepositoryApiError> {
        (**self).create_pull_request(request)
    }
}
