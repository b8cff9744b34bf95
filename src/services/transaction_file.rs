//! Transaction source backed by a JSON file on disk.

use std::path::PathBuf;

use alloy_primitives::B256;

use crate::domain::{AppError, Network, RawTransaction};
use crate::ports::TransactionSource;

/// Reads a single `RawTransaction` JSON document, e.g. one exported from a block explorer.
#[derive(Debug, Clone)]
pub struct JsonFileTransactionSource {
    path: PathBuf,
}

impl JsonFileTransactionSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn load(&self) -> Result<RawTransaction, AppError> {
        let content = std::fs::read_to_string(&self.path)?;
        serde_json::from_str(&content).map_err(|e| AppError::ParseError {
            what: format!("transaction file {}", self.path.display()),
            details: e.to_string(),
        })
    }
}

impl TransactionSource for JsonFileTransactionSource {
    fn fetch(&self, hash: B256, _network: Network) -> Result<RawTransaction, AppError> {
        let tx = self.load()?;
        if tx.hash != hash {
            return Err(AppError::Rpc(format!(
                "{} holds transaction {}, not {hash}",
                self.path.display(),
                tx.hash
            )));
        }
        Ok(tx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::AgendaFixture;

    #[test]
    fn loads_fixture_and_checks_hash() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tx.json");
        let tx = AgendaFixture::sample().transaction();
        std::fs::write(&path, serde_json::to_string(&tx).unwrap()).unwrap();

        let source = JsonFileTransactionSource::new(&path);
        assert_eq!(source.fetch(tx.hash, Network::Sepolia).unwrap(), tx);
        assert!(matches!(source.fetch(B256::ZERO, Network::Sepolia), Err(AppError::Rpc(_))));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tx.json");
        std::fs::write(&path, "{\"hash\": 1}").unwrap();

        assert!(matches!(
            JsonFileTransactionSource::new(&path).load(),
            Err(AppError::ParseError { .. })
        ));
    }
}
