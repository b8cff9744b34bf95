//! Publishability checks over agenda metadata records.

mod document;
mod publishable;
mod report;

pub use document::{validate, validate_document};
pub use publishable::{PublishableAgenda, ensure_publishable};
pub use report::ValidationReport;
