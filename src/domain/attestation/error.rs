use crate::domain::address::FormatError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AttestationError {
    #[error("Invalid signature format: {0}")]
    InvalidSignatureFormat(FormatError),

    #[error("Invalid signer address: {0}")]
    InvalidAddress(FormatError),

    #[error("Invalid timestamp '{0}': expected YYYY-MM-DDTHH:mm:ss.ssZ")]
    InvalidTimestamp(String),

    #[error("Invalid time order: updatedAt {updated_at} must be later than createdAt {created_at}")]
    InvalidTimeOrder { created_at: String, updated_at: String },

    #[error("Attestation expired: signed {age_secs}s ago, limit is {limit_secs}s")]
    Expired { age_secs: i64, limit_secs: i64 },

    #[error("Attestation timestamp lies {ahead_secs}s in the future")]
    TimestampInFuture { ahead_secs: i64 },

    #[error("Signature recovery failed: {0}")]
    Recovery(String),
}
