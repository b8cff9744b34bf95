use alloy_primitives::{Address, eip191_hash_message, keccak256};
use chrono::{DateTime, Duration, Utc};
use k256::PublicKey as K256PublicKey;
use k256::ecdsa::{RecoveryId, Signature as K256Signature, VerifyingKey as K256VerifyingKey};
use k256::elliptic_curve::sec1::ToEncodedPoint;

use super::{AttestationError, build_message, parse_timestamp};
use crate::domain::address::{SIGNATURE_LEN, parse_address, parse_signature};

/// Attestations older than this are rejected even with a valid signature.
pub const MAX_ATTESTATION_AGE_SECS: i64 = 3600;

/// Tolerated wallet clock drift for timestamps slightly ahead of `now`.
pub const MAX_FUTURE_SKEW_SECS: i64 = 300;

/// The attestation-relevant fields of a metadata record.
#[derive(Debug, Clone, Copy)]
pub struct Attestation<'a> {
    pub agenda_id: u64,
    pub transaction_hash: &'a str,
    pub created_at: &'a str,
    pub updated_at: Option<&'a str>,
    pub signer: &'a str,
    pub signature: &'a str,
}

impl Attestation<'_> {
    pub fn is_update(&self) -> bool {
        self.updated_at.is_some()
    }

    /// The timestamp the signature covers: `updatedAt` for updates, else `createdAt`.
    pub fn signed_timestamp(&self) -> &str {
        self.updated_at.unwrap_or(self.created_at)
    }

    pub fn message(&self) -> String {
        build_message(
            self.agenda_id,
            self.transaction_hash,
            self.signed_timestamp(),
            self.is_update(),
        )
    }

    /// Check formats, ordering and freshness, then recover and compare the signer.
    ///
    /// Returns `Ok(false)` when the signature is well-formed but was produced by
    /// a different address.
    pub fn verify(&self, now: DateTime<Utc>) -> Result<bool, AttestationError> {
        check_time_order(self.created_at, self.updated_at)?;
        verify(&self.message(), self.signature, self.signer, self.signed_timestamp(), now)
    }
}

/// Verify that `signature` over `message` was produced by `claimed_address`
/// no more than an hour before `now`.
pub fn verify(
    message: &str,
    signature: &str,
    claimed_address: &str,
    timestamp: &str,
    now: DateTime<Utc>,
) -> Result<bool, AttestationError> {
    let signature = parse_signature(signature).map_err(AttestationError::InvalidSignatureFormat)?;
    let claimed = parse_address(claimed_address).map_err(AttestationError::InvalidAddress)?;
    let signed_at = parse_timestamp(timestamp)?;

    check_freshness(signed_at, now)?;

    let recovered = recover_signer(message, &signature)?;
    if recovered != claimed {
        log::debug!("Signature recovered {recovered}, expected {claimed}");
    }
    Ok(recovered == claimed)
}

/// Sub-second differences count: 3600.1 seconds is past the one-hour limit.
pub fn check_freshness(signed_at: DateTime<Utc>, now: DateTime<Utc>) -> Result<(), AttestationError> {
    let age = now - signed_at;
    if age > Duration::seconds(MAX_ATTESTATION_AGE_SECS) {
        return Err(AttestationError::Expired {
            age_secs: whole_seconds_up(age),
            limit_secs: MAX_ATTESTATION_AGE_SECS,
        });
    }
    if -age > Duration::seconds(MAX_FUTURE_SKEW_SECS) {
        return Err(AttestationError::TimestampInFuture { ahead_secs: whole_seconds_up(-age) });
    }
    Ok(())
}

fn whole_seconds_up(duration: Duration) -> i64 {
    let secs = duration.num_seconds();
    if duration > Duration::seconds(secs) { secs + 1 } else { secs }
}

/// `updatedAt`, when present, must be strictly later than `createdAt`.
pub fn check_time_order(created_at: &str, updated_at: Option<&str>) -> Result<(), AttestationError> {
    let created = parse_timestamp(created_at)?;
    if let Some(updated_at) = updated_at {
        if parse_timestamp(updated_at)? <= created {
            return Err(AttestationError::InvalidTimeOrder {
                created_at: created_at.to_string(),
                updated_at: updated_at.to_string(),
            });
        }
    }
    Ok(())
}

/// Recover the address that produced a personal-message signature.
pub fn recover_signer(
    message: &str,
    signature: &[u8; SIGNATURE_LEN],
) -> Result<Address, AttestationError> {
    let v = signature[64];
    let parity = match v {
        27 | 28 => v - 27,
        0 | 1 => v,
        _ => return Err(AttestationError::Recovery(format!("invalid recovery byte {v}"))),
    };
    let recovery_id = RecoveryId::from_byte(parity)
        .ok_or_else(|| AttestationError::Recovery(format!("invalid recovery byte {v}")))?;
    let signature = K256Signature::from_slice(&signature[..64])
        .map_err(|_| AttestationError::Recovery("r, s invalid".into()))?;

    // Wallets emit low-s signatures, but accept the high-s twin by flipping parity.
    let (signature, recovery_id) = match signature.normalize_s() {
        Some(normalized) => {
            (normalized, RecoveryId::new(!recovery_id.is_y_odd(), recovery_id.is_x_reduced()))
        }
        None => (signature, recovery_id),
    };

    let verify_key = K256VerifyingKey::recover_from_prehash(
        eip191_hash_message(message).as_slice(),
        &signature,
        recovery_id,
    )
    .map_err(|_| AttestationError::Recovery("invalid signature".into()))?;

    Ok(address_of(&verify_key))
}

/// Ethereum address of a secp256k1 public key.
pub fn address_of(verify_key: &K256VerifyingKey) -> Address {
    let public_key = K256PublicKey::from(verify_key);
    let public_key = public_key.to_encoded_point(false);
    let public_key = public_key.as_bytes();
    debug_assert_eq!(public_key[0], 0x04);
    let hash = keccak256(&public_key[1..]);
    Address::from_slice(&hash[12..])
}
