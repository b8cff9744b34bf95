use thiserror::Error;

use super::WorkflowState;

/// Failure of a single repository API call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryApiError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("API returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("unexpected response: {0}")]
    Parse(String),
}

impl RepositoryApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, RepositoryApiError::Status { status: 404, .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PublishErrorKind {
    #[error(transparent)]
    Api(#[from] RepositoryApiError),

    #[error("upstream repository {0} does not exist")]
    UpstreamNotFound(String),

    #[error("fork not ready yet")]
    ForkNotReady,

    #[error("fork was not ready after {attempts} attempts")]
    ForkTimeout { attempts: u32 },

    #[error("cancelled")]
    Cancelled,
}

/// A publication failure tagged with the workflow state it occurred in.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Publication failed in {state}: {kind}")]
pub struct PublishError {
    pub state: WorkflowState,
    pub kind: PublishErrorKind,
}

impl PublishError {
    pub fn new(state: WorkflowState, kind: impl Into<PublishErrorKind>) -> Self {
        Self { state, kind: kind.into() }
    }

    /// Only a fork that is still provisioning is worth waiting for.
    pub fn is_transient(&self) -> bool {
        matches!(self.kind, PublishErrorKind::ForkNotReady)
    }
}
