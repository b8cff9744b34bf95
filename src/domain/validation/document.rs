use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use super::ValidationReport;
use crate::domain::abi::{Function, decode_call};
use crate::domain::address::{is_address, is_hash, is_signature, parse_hex_bytes};
use crate::domain::agenda::AgendaMetadata;
use crate::domain::attestation::{
    Attestation, TIMESTAMP_PROFILE, check_freshness, check_time_order, parse_timestamp,
};
use crate::domain::network::Network;

const PUBLICATION_FIELDS: [&str; 6] =
    ["id", "title", "description", "network", "transactionHash", "creator"];

/// Validate a typed record.
pub fn validate(metadata: &AgendaMetadata, now: DateTime<Utc>) -> ValidationReport {
    match serde_json::to_value(metadata) {
        Ok(document) => validate_document(&document, now),
        Err(err) => {
            let mut report = validate_document(&Value::Null, now);
            report.schema(format!("record could not be serialized: {err}"));
            report
        }
    }
}

/// Validate an untyped JSON record.
///
/// All four checks always run; missing or mistyped fields are reported in the
/// report rather than as parse failures.
pub fn validate_document(document: &Value, now: DateTime<Utc>) -> ValidationReport {
    let mut report = ValidationReport::default();
    let empty = Map::new();
    let record = match document.as_object() {
        Some(record) => record,
        None => {
            report.schema("record must be a JSON object");
            &empty
        }
    };

    check_schema(record, &mut report);
    check_signature(record, now, &mut report);
    check_timestamps(record, now, &mut report);
    check_integrity(record, &mut report);

    log::debug!("Validation finished: valid={} errors={}", report.is_valid(), report.errors.len());
    report
}

fn check_schema(record: &Map<String, Value>, report: &mut ValidationReport) {
    match record.get("id") {
        Some(id) if id.as_u64().is_some() => {}
        Some(_) => report.schema("id must be a non-negative integer"),
        None => report.schema("id is missing"),
    }
    for key in ["title", "description"] {
        if non_empty_text(record, key).is_none() {
            report.schema(format!("{key} must be a non-empty string"));
        }
    }
    let network_ok = record
        .get("network")
        .is_some_and(|value| serde_json::from_value::<Network>(value.clone()).is_ok());
    if !network_ok {
        report.schema("network must be one of mainnet, sepolia");
    }
    if !text(record, "transactionHash").is_some_and(is_hash) {
        report.schema("transactionHash must be 0x followed by 64 hex digits");
    }

    match record.get("creator").and_then(Value::as_object) {
        Some(creator) => {
            if !text(creator, "address").is_some_and(is_address) {
                report.schema("creator.address must be 0x followed by 40 hex digits");
            }
            if !text(creator, "signature").is_some_and(is_signature) {
                report.schema("creator.signature must be 0x followed by 130 hex digits");
            }
        }
        None => report.schema("creator must be an object with address and signature"),
    }

    if !text(record, "createdAt").is_some_and(|ts| parse_timestamp(ts).is_ok()) {
        report.schema(format!("createdAt must be a {TIMESTAMP_PROFILE} timestamp"));
    }
    match record.get("updatedAt") {
        None | Some(Value::Null) => {}
        Some(Value::String(ts)) if parse_timestamp(ts).is_ok() => {}
        Some(_) => report.schema(format!("updatedAt must be a {TIMESTAMP_PROFILE} timestamp")),
    }

    let actions = match record.get("actions").and_then(Value::as_array) {
        Some(actions) if !actions.is_empty() => actions,
        _ => {
            report.schema("actions must be a non-empty array");
            return;
        }
    };
    for (index, action) in actions.iter().enumerate() {
        let Some(action) = action.as_object() else {
            report.schema(format!("actions[{index}] must be an object"));
            continue;
        };
        if !text(action, "contractAddress").is_some_and(is_address) {
            report.schema(format!("actions[{index}].contractAddress must be a 20-byte hex address"));
        }
        if non_empty_text(action, "method").is_none() {
            report.schema(format!("actions[{index}].method must be a non-empty string"));
        }
        if action_calldata(action).is_none_or(|calldata| calldata.len() < 4) {
            report.schema(format!(
                "actions[{index}].calldata must be 0x-prefixed hex of at least 4 bytes"
            ));
        }
        if action_fragment(action).is_none() {
            report.schema(format!("actions[{index}].abiFragment must be a JSON ABI function entry"));
        }
    }
}

fn check_signature(record: &Map<String, Value>, now: DateTime<Utc>, report: &mut ValidationReport) {
    let Some(attestation) = attestation_fields(record) else {
        report.signature("cannot verify without id, transactionHash, createdAt and creator");
        return;
    };
    match attestation.verify(now) {
        Ok(true) => {}
        Ok(false) => report.signature(format!(
            "recovered signer does not match creator address {}",
            attestation.signer
        )),
        Err(err) => report.signature(err.to_string()),
    }
}

fn check_timestamps(record: &Map<String, Value>, now: DateTime<Utc>, report: &mut ValidationReport) {
    let Some(created_at) = text(record, "createdAt") else {
        report.timestamp("createdAt is missing");
        return;
    };
    let updated_at = text(record, "updatedAt");

    let checked = check_time_order(created_at, updated_at)
        .and_then(|()| parse_timestamp(updated_at.unwrap_or(created_at)))
        .and_then(|signed_at| check_freshness(signed_at, now));
    if let Err(err) = checked {
        report.timestamp(err.to_string());
    }
}

fn check_integrity(record: &Map<String, Value>, report: &mut ValidationReport) {
    let mut missing: Vec<&str> = PUBLICATION_FIELDS
        .into_iter()
        .filter(|key| match record.get(*key) {
            None | Some(Value::Null) => true,
            Some(Value::String(value)) => value.trim().is_empty(),
            Some(_) => false,
        })
        .collect();
    let actions = record.get("actions").and_then(Value::as_array).filter(|a| !a.is_empty());
    if actions.is_none() {
        missing.push("actions");
    }
    if !missing.is_empty() {
        report.integrity(format!("missing required field(s): {}", missing.join(", ")));
    }

    for (index, action) in actions.into_iter().flatten().enumerate() {
        let Some(action) = action.as_object() else { continue };
        let (Some(calldata), Some(fragment)) = (action_calldata(action), action_fragment(action))
        else {
            continue;
        };
        if let Err(err) = decode_call(&fragment, &calldata) {
            report.integrity(format!(
                "actions[{index}].calldata does not match its ABI fragment: {err}"
            ));
            continue;
        }
        let method = text(action, "method");
        let signature = fragment.signature();
        if method != Some(signature.as_str()) {
            report.integrity(format!(
                "actions[{index}].method {:?} does not match fragment signature {signature}",
                method.unwrap_or_default()
            ));
        }
    }
}

fn attestation_fields(record: &Map<String, Value>) -> Option<Attestation<'_>> {
    let creator = record.get("creator")?.as_object()?;
    let updated_at = match record.get("updatedAt") {
        None | Some(Value::Null) => None,
        Some(value) => Some(value.as_str()?),
    };
    Some(Attestation {
        agenda_id: record.get("id")?.as_u64()?,
        transaction_hash: text(record, "transactionHash")?,
        created_at: text(record, "createdAt")?,
        updated_at,
        signer: text(creator, "address")?,
        signature: text(creator, "signature")?,
    })
}

fn action_calldata(action: &Map<String, Value>) -> Option<Vec<u8>> {
    text(action, "calldata").and_then(|hex| parse_hex_bytes(hex).ok()).map(|bytes| bytes.to_vec())
}

fn action_fragment(action: &Map<String, Value>) -> Option<Function> {
    action.get("abiFragment").and_then(|value| serde_json::from_value(value.clone()).ok())
}

fn text<'a>(record: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    record.get(key).and_then(Value::as_str)
}

fn non_empty_text<'a>(record: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    text(record, key).filter(|value| !value.trim().is_empty())
}
