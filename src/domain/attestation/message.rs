//! The sentence a creator signs with their wallet.
//!
//! Its wording is a compatibility surface: changing it invalidates every
//! signature produced against an earlier wording, so changes go into a new
//! [`MessageVersion`] instead of editing an existing one.

/// Wording revisions of the attestation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageVersion {
    #[default]
    V1,
}

/// Build the current-version message for an agenda creation or update.
pub fn build_message(agenda_id: u64, transaction_hash: &str, timestamp: &str, is_update: bool) -> String {
    build_message_versioned(MessageVersion::default(), agenda_id, transaction_hash, timestamp, is_update)
}

pub fn build_message_versioned(
    version: MessageVersion,
    agenda_id: u64,
    transaction_hash: &str,
    timestamp: &str,
    is_update: bool,
) -> String {
    match version {
        MessageVersion::V1 => {
            let action = if is_update { "updating" } else { "creating" };
            format!(
                "I am the one who submitted agenda #{agenda_id} via transaction {transaction_hash}. \
                 I am {action} this metadata at {timestamp}. \
                 This signature proves that I am the one who submitted this agenda."
            )
        }
    }
}
