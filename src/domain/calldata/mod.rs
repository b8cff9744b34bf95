//! Recovery of agenda proposal data from a "create agenda" transaction.

pub mod contracts;
mod decoder;
mod draft;
mod error;
mod layout;

pub use decoder::{decode, decode_payload, find_creation_event, unwrap_outer_call};
pub use draft::{AgendaCall, CreationEvent, ProposalDraft};
pub use error::DecodeError;
pub use layout::{Layout, LengthPrediction, predict_lengths};
