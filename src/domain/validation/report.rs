use serde::{Deserialize, Serialize};

/// Outcome of the four independent metadata checks.
///
/// `errors` lists every failing sub-check, each prefixed with the check it
/// belongs to (`schema:`, `signature:`, `timestamp:` or `integrity:`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub schema_ok: bool,
    pub signature_ok: bool,
    pub timestamp_ok: bool,
    pub integrity_ok: bool,
    pub errors: Vec<String>,
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self {
            schema_ok: true,
            signature_ok: true,
            timestamp_ok: true,
            integrity_ok: true,
            errors: Vec::new(),
        }
    }
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.schema_ok && self.signature_ok && self.timestamp_ok && self.integrity_ok
    }

    pub(crate) fn schema(&mut self, message: impl AsRef<str>) {
        self.schema_ok = false;
        self.errors.push(format!("schema: {}", message.as_ref()));
    }

    pub(crate) fn signature(&mut self, message: impl AsRef<str>) {
        self.signature_ok = false;
        self.errors.push(format!("signature: {}", message.as_ref()));
    }

    pub(crate) fn timestamp(&mut self, message: impl AsRef<str>) {
        self.timestamp_ok = false;
        self.errors.push(format!("timestamp: {}", message.as_ref()));
    }

    pub(crate) fn integrity(&mut self, message: impl AsRef<str>) {
        self.integrity_ok = false;
        self.errors.push(format!("integrity: {}", message.as_ref()));
    }
}
