use chrono::{DateTime, NaiveDateTime, Utc};

use super::AttestationError;

/// The only accepted timestamp shape: UTC with exactly two fractional digits.
pub const TIMESTAMP_PROFILE: &str = "YYYY-MM-DDTHH:mm:ss.ssZ";

/// Parse a timestamp in the fixed `YYYY-MM-DDTHH:mm:ss.ssZ` profile.
///
/// Other fractional precisions are rejected rather than normalized.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, AttestationError> {
    let invalid = || AttestationError::InvalidTimestamp(value.to_string());
    if !matches_profile(value.as_bytes()) {
        return Err(invalid());
    }
    NaiveDateTime::parse_from_str(&value[..value.len() - 1], "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|_| invalid())
}

/// Render `time` in the accepted profile, truncating to hundredths of a second.
pub fn format_timestamp(time: DateTime<Utc>) -> String {
    format!("{}.{:02}Z", time.format("%Y-%m-%dT%H:%M:%S"), time.timestamp_subsec_millis() / 10)
}

fn matches_profile(bytes: &[u8]) -> bool {
    const SHAPE: &[u8; 23] = b"dddd-dd-ddTdd:dd:dd.ddZ";
    bytes.len() == SHAPE.len()
        && bytes.iter().zip(SHAPE.iter()).all(|(b, s)| match s {
            b'd' => b.is_ascii_digit(),
            _ => b == s,
        })
}
