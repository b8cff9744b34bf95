//! Validate a metadata JSON file without publishing it.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::domain::validation::validate_document;
use crate::domain::{AppError, ValidationReport};

pub fn execute(path: &Path, now: DateTime<Utc>) -> Result<ValidationReport, AppError> {
    let content = std::fs::read_to_string(path)?;
    let document: Value = serde_json::from_str(&content).map_err(|e| AppError::ParseError {
        what: format!("metadata file {}", path.display()),
        details: e.to_string(),
    })?;

    let report = validate_document(&document, now);
    if report.is_valid() {
        log::info!("{} is publishable", path.display());
    } else {
        log::warn!("{} failed {} check(s)", path.display(), report.errors.len());
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::testing::AgendaFixture;

    #[test]
    fn reports_on_a_metadata_file() {
        let fixture = AgendaFixture::sample();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agenda.json");
        std::fs::write(&path, fixture.signed_metadata().to_document().unwrap()).unwrap();

        assert!(execute(&path, fixture.now()).unwrap().is_valid());

        let stale = execute(&path, fixture.now() + Duration::hours(2)).unwrap();
        assert!(!stale.timestamp_ok);
        assert!(!stale.signature_ok);
        assert!(stale.schema_ok);
    }

    #[test]
    fn unreadable_json_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agenda.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(execute(&path, Utc::now()), Err(AppError::ParseError { .. })));
    }
}
