pub mod abi;
pub mod address;
pub mod agenda;
pub mod attestation;
pub mod calldata;
pub mod configuration;
pub mod error;
pub mod network;
pub mod publication;
pub mod transaction;
pub mod validation;

pub use agenda::{Action, AgendaForm, AgendaMetadata, Creator, UnsignedAgenda};
pub use configuration::{AppConfig, ForkPollConfig, GitHubConfig, RepositoryConfig, RpcConfig};
pub use error::AppError;
pub use network::Network;
pub use publication::{
    CancellationToken, PublicationRequest, PublishError, PublishErrorKind, RepositoryApiError,
    WorkflowState,
};
pub use transaction::{RawTransaction, TransactionLog};
pub use validation::{PublishableAgenda, ValidationReport, ensure_publishable};
