mod github_http;
mod rpc_http;
mod transaction_file;

pub use github_http::GitHubRepositoryApi;
pub use rpc_http::HttpRpcTransactionSource;
pub use transaction_file::JsonFileTransactionSource;
