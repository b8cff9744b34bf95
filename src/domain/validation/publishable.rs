use chrono::{DateTime, Utc};
use serde_json::Value;

use super::{ValidationReport, validate, validate_document};
use crate::domain::AppError;
use crate::domain::agenda::AgendaMetadata;

/// A metadata record that passed validation. It can no longer be modified.
#[derive(Debug, Clone)]
pub struct PublishableAgenda {
    metadata: AgendaMetadata,
    report: ValidationReport,
}

impl PublishableAgenda {
    /// Validate a JSON document and take ownership of the typed record.
    pub fn from_document(json: &str, now: DateTime<Utc>) -> Result<Self, AppError> {
        let document: Value = serde_json::from_str(json).map_err(|e| AppError::ParseError {
            what: "metadata JSON".into(),
            details: e.to_string(),
        })?;
        let report = validate_document(&document, now);
        if !report.is_valid() {
            return Err(AppError::ValidationFailed(report));
        }
        let metadata = serde_json::from_value(document)?;
        Ok(Self { metadata, report })
    }

    pub fn metadata(&self) -> &AgendaMetadata {
        &self.metadata
    }

    pub fn report(&self) -> &ValidationReport {
        &self.report
    }
}

/// The only way to obtain a [`PublishableAgenda`] from a typed record.
pub fn ensure_publishable(
    metadata: AgendaMetadata,
    now: DateTime<Utc>,
) -> Result<PublishableAgenda, AppError> {
    let report = validate(&metadata, now);
    if !report.is_valid() {
        log::warn!("Agenda {} is not publishable: {}", metadata.id, report.errors.join("; "));
        return Err(AppError::ValidationFailed(report));
    }
    Ok(PublishableAgenda { metadata, report })
}
