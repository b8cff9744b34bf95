//! Types shared by the fork → branch → commit → pull request workflow.

mod cancellation;
mod error;
mod request;
mod state;

pub use cancellation::CancellationToken;
pub use error::{PublishError, PublishErrorKind, RepositoryApiError};
pub use request::{PublicationRequest, agenda_file_path};
pub use state::WorkflowState;
