//! Canonical attestation messages and wallet-signature verification.

mod error;
mod message;
mod timestamp;
mod verifier;

pub use error::AttestationError;
pub use message::{MessageVersion, build_message, build_message_versioned};
pub use timestamp::{TIMESTAMP_PROFILE, format_timestamp, parse_timestamp};
pub use verifier::{
    Attestation, MAX_ATTESTATION_AGE_SECS, MAX_FUTURE_SKEW_SECS, address_of, check_freshness,
    check_time_order, recover_signer, verify,
};
