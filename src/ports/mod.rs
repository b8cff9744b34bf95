mod repository_api;
mod transaction_source;

pub use repository_api::{FileCommit, NewPullRequest, PullRequestInfo, RepoInfo, RepositoryApi};
pub use transaction_source::TransactionSource;
