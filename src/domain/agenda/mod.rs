//! Agenda metadata records and their assembly from decoded transactions.

mod assembly;
mod metadata;

pub use assembly::{AgendaForm, UnsignedAgenda};
pub use metadata::{Action, AgendaMetadata, Creator};
