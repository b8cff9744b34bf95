//! agenda-publisher: decode DAO agenda transactions, verify creator attestations
//! and publish the resulting metadata to the canonical repository.

pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

pub use app::api::{
    MessageOptions, MessageOutcome, SubmitOptions, SubmitOutcome, attestation_message,
    decode_transaction, load_config, publish_metadata, submit_agenda, validate_metadata,
};
pub use app::{AppContext, PublicationWorkflow};
pub use domain::{
    AgendaForm, AgendaMetadata, AppConfig, AppError, CancellationToken, Network,
    PublicationRequest, PublishError, PublishErrorKind, PublishableAgenda, RawTransaction,
    ValidationReport, WorkflowState, ensure_publishable,
};
pub use ports::{PullRequestInfo, RepositoryApi, TransactionSource};
