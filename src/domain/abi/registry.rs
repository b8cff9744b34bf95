use alloy_json_abi::{Function, JsonAbi};

use crate::domain::AppError;

/// Functions from JSON ABI documents, looked up by selector.
#[derive(Debug, Clone, Default)]
pub struct AbiRegistry {
    functions: Vec<Function>,
}

impl AbiRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON ABI array, keeping its function entries.
    pub fn from_json(json: &str) -> Result<Self, AppError> {
        let abi: JsonAbi = serde_json::from_str(json).map_err(|e| AppError::ParseError {
            what: "ABI JSON".into(),
            details: e.to_string(),
        })?;

        let mut registry = Self::new();
        for function in abi.functions() {
            registry.insert(function.clone());
        }
        Ok(registry)
    }

    pub fn insert(&mut self, function: Function) {
        log::debug!("Registered ABI function {}", function.signature());
        self.functions.push(function);
    }

    pub fn extend(&mut self, other: AbiRegistry) {
        self.functions.extend(other.functions);
    }

    /// First function whose selector matches the leading four bytes of `calldata`.
    pub fn find_for_calldata(&self, calldata: &[u8]) -> Option<&Function> {
        let selector = calldata.get(..4)?;
        self.functions.iter().find(|f| f.selector().as_slice() == selector)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}
