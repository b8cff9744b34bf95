use crate::domain::{AppConfig, CancellationToken};
use crate::ports::RepositoryApi;

/// Application context holding configuration and the repository host for publishing.
pub struct AppContext<R: RepositoryApi> {
    config: AppConfig,
    repository: R,
    cancellation: CancellationToken,
}

impl<R: RepositoryApi> AppContext<R> {
    pub fn new(config: AppConfig, repository: R) -> Self {
        Self { config, repository, cancellation: CancellationToken::new() }
    }

    /// Share `token` with every workflow run from this context.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    pub fn into_repository(self) -> R {
        self.repository
    }
}
