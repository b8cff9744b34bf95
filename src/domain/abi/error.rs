#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AbiError {
    #[error("Calldata is shorter than a 4-byte selector")]
    MissingSelector,

    #[error("Calldata selector {found} does not match {expected} for '{signature}'")]
    SelectorMismatch { signature: String, expected: String, found: String },

    #[error("Calldata does not decode as '{signature}': {details}")]
    Decode { signature: String, details: String },

    #[error("Calldata for '{0}' is not canonically encoded")]
    NonCanonical(String),
}
