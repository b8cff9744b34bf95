//! GitHub REST implementation of the repository API port using reqwest.

use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::{AppError, GitHubConfig, RepositoryApiError};
use crate::ports::{FileCommit, NewPullRequest, PullRequestInfo, RepoInfo, RepositoryApi};

const API_VERSION_HEADER: &str = "X-GitHub-Api-Version";
const API_VERSION: &str = "2022-11-28";
const GITHUB_JSON: &str = "application/vnd.github+json";

/// HTTP client for the GitHub REST API.
#[derive(Clone)]
pub struct GitHubRepositoryApi {
    token: String,
    api_url: Url,
    client: Client,
}

impl std::fmt::Debug for GitHubRepositoryApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubRepositoryApi")
            .field("api_url", &self.api_url)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl GitHubRepositoryApi {
    pub fn new(token: String, config: &GitHubConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { token, api_url: config.api_url.clone(), client })
    }

    /// Create with the token read from the configured environment variable.
    pub fn from_env_with_config(config: &GitHubConfig) -> Result<Self, AppError> {
        Self::new(config.token()?, config)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, RepositoryApiError> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| RepositoryApiError::Transport(format!("invalid API URL {}", self.api_url)))?
            .pop_if_empty()
            .extend(segments.iter().flat_map(|segment| segment.split('/')));
        Ok(url)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .header(ACCEPT, GITHUB_JSON)
            .header(API_VERSION_HEADER, API_VERSION)
            .header(USER_AGENT, concat!("agenda-publisher/", env!("CARGO_PKG_VERSION")))
    }

    fn send(&self, request: RequestBuilder) -> Result<Response, RepositoryApiError> {
        self.authorized(request)
            .send()
            .map_err(|e| RepositoryApiError::Transport(e.to_string()))
    }

    /// GET `url`, reading any status in `absent` as "no such resource".
    fn get_optional<T: DeserializeOwned>(
        &self,
        url: Url,
        absent: &[StatusCode],
    ) -> Result<Option<T>, RepositoryApiError> {
        log::debug!("GET {url}");
        let response = self.send(self.client.get(url))?;
        if absent.contains(&response.status()) {
            return Ok(None);
        }
        parse_json(response).map(Some)
    }

    fn write_json<B: Serialize, T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        body: &B,
    ) -> Result<T, RepositoryApiError> {
        parse_json(self.send(request.json(body))?)
    }

    fn branch_sha(
        &self,
        owner: &str,
        name: &str,
        branch: &str,
    ) -> Result<Option<String>, RepositoryApiError> {
        let url = self.endpoint(&["repos", owner, name, "branches", branch])?;
        // A freshly created fork answers 409 until its git data exists.
        let absent = [StatusCode::NOT_FOUND, StatusCode::CONFLICT];
        Ok(self.get_optional::<BranchResponse>(url, &absent)?.map(|found| found.commit.sha))
    }

    fn contents_url(&self, commit: &FileCommit) -> Result<Url, RepositoryApiError> {
        let (owner, repo, path) = (commit.owner.as_str(), commit.repo.as_str(), commit.path.as_str());
        self.endpoint(&["repos", owner, repo, "contents", path])
    }

    fn file_sha(&self, commit: &FileCommit) -> Result<Option<String>, RepositoryApiError> {
        let mut url = self.contents_url(commit)?;
        url.query_pairs_mut().append_pair("ref", &commit.branch);
        Ok(self
            .get_optional::<ContentResponse>(url, &[StatusCode::NOT_FOUND])?
            .map(|content| content.sha))
    }
}

fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, RepositoryApiError> {
    let status = response.status();
    if !status.is_success() {
        let text = response.text().unwrap_or_else(|_| "Unknown error".to_string());
        let message = serde_json::from_str::<ErrorResponse>(&text)
            .map(|body| body.message)
            .unwrap_or(text);
        return Err(RepositoryApiError::Status { status: status.as_u16(), message });
    }
    response.json().map_err(|e| RepositoryApiError::Parse(e.to_string()))
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    message: String,
}

#[derive(Debug, Deserialize)]
struct RepoResponse {
    name: String,
    full_name: String,
    owner: OwnerResponse,
    default_branch: String,
    #[serde(default)]
    parent: Option<ParentResponse>,
}

#[derive(Debug, Deserialize)]
struct OwnerResponse {
    login: String,
}

#[derive(Debug, Deserialize)]
struct ParentResponse {
    full_name: String,
}

impl RepoResponse {
    fn into_info(self, default_branch_sha: Option<String>) -> RepoInfo {
        RepoInfo {
            owner: self.owner.login,
            name: self.name,
            full_name: self.full_name,
            default_branch: self.default_branch,
            parent_full_name: self.parent.map(|parent| parent.full_name),
            default_branch_sha,
        }
    }
}

#[derive(Debug, Deserialize)]
struct BranchResponse {
    commit: CommitRef,
}

#[derive(Debug, Deserialize)]
struct CommitRef {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    sha: String,
}

#[derive(Debug, Serialize)]
struct ForkRequest {
    default_branch_only: bool,
}

#[derive(Debug, Serialize)]
struct RefRequest<'a> {
    #[serde(rename = "ref")]
    reference: String,
    sha: &'a str,
}

#[derive(Debug, Serialize)]
struct ContentRequest<'a> {
    message: &'a str,
    content: String,
    branch: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<String>,
}

#[derive(Debug, Serialize)]
struct PullRequestRequest<'a> {
    title: &'a str,
    body: &'a str,
    head: &'a str,
    base: &'a str,
}

#[derive(Debug, Deserialize)]
struct PullRequestResponse {
    number: u64,
    html_url: String,
}

#[derive(Debug, Deserialize)]
struct IgnoredResponse {}

impl RepositoryApi for GitHubRepositoryApi {
    fn get_repo(&self, owner: &str, name: &str) -> Result<Option<RepoInfo>, RepositoryApiError> {
        let url = self.endpoint(&["repos", owner, name])?;
        let Some(repo) = self.get_optional::<RepoResponse>(url, &[StatusCode::NOT_FOUND])? else {
            return Ok(None);
        };
        let sha = self.branch_sha(&repo.owner.login, &repo.name, &repo.default_branch)?;
        Ok(Some(repo.into_info(sha)))
    }

    fn create_fork(&self, owner: &str, name: &str) -> Result<RepoInfo, RepositoryApiError> {
        let url = self.endpoint(&["repos", owner, name, "forks"])?;
        log::debug!("POST {url}");
        let repo: RepoResponse =
            self.write_json(self.client.post(url), &ForkRequest { default_branch_only: true })?;
        Ok(repo.into_info(None))
    }

    fn create_branch(
        &self,
        owner: &str,
        name: &str,
        branch: &str,
        base_sha: &str,
    ) -> Result<(), RepositoryApiError> {
        let url = self.endpoint(&["repos", owner, name, "git", "refs"])?;
        log::debug!("POST {url} ({branch} at {base_sha})");
        let body = RefRequest { reference: format!("refs/heads/{branch}"), sha: base_sha };
        self.write_json::<_, IgnoredResponse>(self.client.post(url), &body).map(|_| ())
    }

    fn commit_file(&self, commit: &FileCommit) -> Result<(), RepositoryApiError> {
        let sha = self.file_sha(commit)?;
        let url = self.contents_url(commit)?;
        log::debug!("PUT {url}");
        let body = ContentRequest {
            message: &commit.message,
            content: BASE64.encode(commit.content.as_bytes()),
            branch: &commit.branch,
            sha,
        };
        self.write_json::<_, IgnoredResponse>(self.client.put(url), &body).map(|_| ())
    }

    fn create_pull_request(
        &self,
        request: &NewPullRequest,
    ) -> Result<PullRequestInfo, RepositoryApiError> {
        let url = self.endpoint(&["repos", request.owner.as_str(), request.repo.as_str(), "pulls"])?;
        log::debug!("POST {url}");
        let body = PullRequestRequest {
            title: &request.title,
            body: &request.body,
            head: &request.head,
            base: &request.base,
        };
        let pr: PullRequestResponse = self.write_json(self.client.post(url), &body)?;
        Ok(PullRequestInfo { number: pr.number, url: pr.html_url })
    }
}
