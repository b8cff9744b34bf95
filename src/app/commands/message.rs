//! Canonical attestation message for a creator to sign.

use chrono::{DateTime, Utc};

use crate::domain::AppError;
use crate::domain::address::{parse_hash, to_hex};
use crate::domain::attestation::{build_message, format_timestamp, parse_timestamp};

#[derive(Debug, Clone)]
pub struct MessageOptions {
    pub agenda_id: u64,
    pub tx_hash: String,
    /// Defaults to the current time in the accepted profile.
    pub timestamp: Option<String>,
    pub is_update: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageOutcome {
    pub message: String,
    /// Timestamp embedded in the message; must be copied into the record.
    pub timestamp: String,
}

pub fn execute(options: &MessageOptions, now: DateTime<Utc>) -> Result<MessageOutcome, AppError> {
    // Same lowercase form the assembled record carries.
    let tx_hash = to_hex(parse_hash(&options.tx_hash)?.as_slice());
    let timestamp = match &options.timestamp {
        Some(timestamp) => {
            parse_timestamp(timestamp)?;
            timestamp.clone()
        }
        None => format_timestamp(now),
    };

    Ok(MessageOutcome {
        message: build_message(options.agenda_id, &tx_hash, &timestamp, options.is_update),
        timestamp,
    })
}
