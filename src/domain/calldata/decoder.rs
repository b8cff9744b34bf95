use alloy_primitives::Bytes;
use alloy_sol_types::{SolCall, SolEvent, SolValue};

use super::contracts::{AgendaCreated, LayoutAPayload, LayoutBPayload, approveAndCallCall};
use super::draft::{u256_to_u64, u256_to_u128};
use super::{AgendaCall, CreationEvent, DecodeError, Layout, ProposalDraft, predict_lengths};
use crate::domain::address::to_hex;
use crate::domain::transaction::{RawTransaction, TransactionLog};

/// Decode a "create agenda" transaction into a proposal draft.
pub fn decode(tx: &RawTransaction) -> Result<ProposalDraft, DecodeError> {
    let creation_event = find_creation_event(&tx.logs)?;
    let payload = unwrap_outer_call(&tx.input_data)?;
    let (layout, call) = decode_payload(&payload)?;

    check_consistency(&creation_event, &call)?;

    let memo_url = call.memo.filter(|memo| !memo.is_empty());
    Ok(ProposalDraft {
        transaction_hash: tx.hash,
        creation_event,
        target_calldatas: call.calldatas,
        memo_url,
        layout,
    })
}

/// The single `AgendaCreated` log among `logs`.
pub fn find_creation_event(logs: &[TransactionLog]) -> Result<CreationEvent, DecodeError> {
    let mut matches = logs
        .iter()
        .filter(|log| log.topics.first() == Some(&AgendaCreated::SIGNATURE_HASH))
        .filter_map(|log| {
            AgendaCreated::decode_raw_log(log.topics.iter().copied(), &log.data, true).ok()
        })
        .collect::<Vec<_>>();

    if matches.len() != 1 {
        return Err(DecodeError::NotAnAgendaCreation { matches: matches.len() });
    }
    let event = matches.remove(0);

    Ok(CreationEvent {
        creator_address: event.from,
        agenda_id: u256_to_u64(event.id).ok_or(DecodeError::ValueOutOfRange { field: "agendaId" })?,
        targets: event.targets,
        notice_period_seconds: event.noticePeriodSeconds,
        voting_period_seconds: event.votingPeriodSeconds,
        atomic_execute: event.atomicExecute,
    })
}

/// Strip the outer `approveAndCall` wrapper and return its `data` argument.
pub fn unwrap_outer_call(input: &[u8]) -> Result<Bytes, DecodeError> {
    let selector = input.get(..4).ok_or_else(|| {
        DecodeError::UnexpectedCallShape("transaction input is shorter than a selector".into())
    })?;
    if selector != approveAndCallCall::SELECTOR.as_slice() {
        return Err(DecodeError::UnexpectedCallShape(format!(
            "expected {} selector {}, found {}",
            approveAndCallCall::SIGNATURE,
            to_hex(&approveAndCallCall::SELECTOR),
            to_hex(selector)
        )));
    }

    approveAndCallCall::abi_decode(input, true).map(|call| call.data).map_err(|e| {
        DecodeError::UnexpectedCallShape(format!(
            "malformed {} arguments: {e}",
            approveAndCallCall::SIGNATURE
        ))
    })
}

/// Decode the inner payload, choosing between layouts by predicted size.
pub fn decode_payload(payload: &[u8]) -> Result<(Layout, AgendaCall), DecodeError> {
    let prediction = predict_lengths(payload);
    let order = prediction.attempt_order(payload.len());
    log::debug!(
        "Agenda payload is {} bytes; predicted A={:?} B={:?}; trying {:?} first",
        payload.len(),
        prediction.layout_a,
        prediction.layout_b,
        order[0]
    );

    decode_in_order(payload, order).ok_or(DecodeError::AmbiguousEncoding {
        payload_len: payload.len(),
        layout_a: prediction.layout_a,
        layout_b: prediction.layout_b,
    })
}

/// First layout in `order` that decodes `payload` canonically.
fn decode_in_order(payload: &[u8], order: [Layout; 2]) -> Option<(Layout, AgendaCall)> {
    for (attempt, layout) in order.into_iter().enumerate() {
        match decode_as(layout, payload) {
            Ok(call) => {
                if attempt > 0 {
                    log::warn!("Agenda payload decoded only under fallback layout {layout:?}");
                }
                return Some((layout, call));
            }
            Err(err) => log::debug!("Layout {layout:?} rejected: {err}"),
        }
    }
    None
}

fn decode_as(layout: Layout, payload: &[u8]) -> Result<AgendaCall, DecodeError> {
    let malformed = |e: alloy_sol_types::Error| {
        DecodeError::UnexpectedCallShape(format!("layout {layout:?}: {e}"))
    };
    match layout {
        Layout::A => {
            let params = LayoutAPayload::abi_decode_params(payload, true).map_err(malformed)?;
            ensure_canonical(layout, &params.abi_encode_params(), payload)?;
            Ok(params.into())
        }
        Layout::B => {
            let params = LayoutBPayload::abi_decode_params(payload, true).map_err(malformed)?;
            ensure_canonical(layout, &params.abi_encode_params(), payload)?;
            Ok(params.into())
        }
    }
}

fn ensure_canonical(layout: Layout, reencoded: &[u8], payload: &[u8]) -> Result<(), DecodeError> {
    if reencoded != payload {
        return Err(DecodeError::UnexpectedCallShape(format!(
            "layout {layout:?} does not re-encode to the {} byte payload",
            payload.len()
        )));
    }
    Ok(())
}

fn check_consistency(event: &CreationEvent, call: &AgendaCall) -> Result<(), DecodeError> {
    if call.targets.len() != call.calldatas.len() {
        return Err(DecodeError::InconsistentPayload(format!(
            "{} targets but {} calldatas",
            call.targets.len(),
            call.calldatas.len()
        )));
    }
    if call.targets != event.targets {
        return Err(DecodeError::InconsistentPayload("target addresses differ".into()));
    }

    let notice = u256_to_u128(call.notice_period)
        .ok_or(DecodeError::ValueOutOfRange { field: "noticePeriodSeconds" })?;
    let voting = u256_to_u128(call.voting_period)
        .ok_or(DecodeError::ValueOutOfRange { field: "votingPeriodSeconds" })?;
    if notice != event.notice_period_seconds
        || voting != event.voting_period_seconds
        || call.atomic_execute != event.atomic_execute
    {
        return Err(DecodeError::InconsistentPayload("timing or execution flags differ".into()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{Address, B256, U256};
    use proptest::prelude::*;

    use super::*;
    use crate::testing::AgendaFixture;

    fn uint(n: u64) -> U256 {
        U256::from(n)
    }

    #[test]
    fn decodes_layout_a_transaction() {
        let fixture = AgendaFixture::sample();
        let draft = decode(&fixture.transaction()).unwrap();

        assert_eq!(draft.layout, Layout::A);
        assert_eq!(draft.agenda_id(), fixture.agenda_id);
        assert_eq!(draft.creation_event.targets, fixture.targets);
        assert_eq!(draft.creation_event.creator_address, fixture.creator);
        assert_eq!(draft.target_calldatas, fixture.calldatas);
        assert_eq!(draft.creation_event.notice_period_seconds, fixture.notice_period);
        assert_eq!(draft.creation_event.voting_period_seconds, fixture.voting_period);
        assert!(draft.memo_url.is_none());
        assert_eq!(draft.transaction_hash, fixture.tx_hash);
    }

    #[test]
    fn decodes_layout_b_memo() {
        let fixture = AgendaFixture::sample().with_memo("https://forum.example.org/t/agenda-7");
        let draft = decode(&fixture.transaction()).unwrap();

        assert_eq!(draft.layout, Layout::B);
        assert_eq!(draft.memo_url.as_deref(), Some("https://forum.example.org/t/agenda-7"));
        assert_eq!(draft.target_calldatas, fixture.calldatas);
    }

    #[test]
    fn empty_memo_is_omitted() {
        let fixture = AgendaFixture::sample().with_memo("");
        let draft = decode(&fixture.transaction()).unwrap();

        assert_eq!(draft.layout, Layout::B);
        assert!(draft.memo_url.is_none());
    }

    #[test]
    fn length_matching_neither_layout_is_ambiguous() {
        let mut payload = AgendaFixture::sample().payload();
        payload.extend_from_slice(&[0u8; 7]);

        assert!(matches!(
            decode_payload(&payload),
            Err(DecodeError::AmbiguousEncoding { layout_a: Some(_), .. })
        ));
    }

    #[test]
    fn padded_layout_a_payload_is_ambiguous() {
        let mut payload = AgendaFixture::sample().payload();
        payload.extend_from_slice(&[0u8; 64]);

        assert!(matches!(decode_payload(&payload), Err(DecodeError::AmbiguousEncoding { .. })));
    }

    #[test]
    fn falls_back_when_the_preferred_layout_fails() {
        let fixture = AgendaFixture::sample();

        let (layout, call) = decode_in_order(&fixture.payload(), [Layout::B, Layout::A]).unwrap();
        assert_eq!(layout, Layout::A);
        assert_eq!(call.targets, fixture.targets);
        assert!(call.memo.is_none());

        let with_memo = fixture.with_memo("https://forum.example.org/t/agenda-9");
        let (layout, call) = decode_in_order(&with_memo.payload(), [Layout::A, Layout::B]).unwrap();
        assert_eq!(layout, Layout::B);
        assert_eq!(call.calldatas, with_memo.calldatas);
        assert_eq!(call.memo.as_deref(), Some("https://forum.example.org/t/agenda-9"));
    }

    #[test]
    fn trailing_garbage_fails_both_layouts() {
        let mut payload = AgendaFixture::sample().payload();
        payload.extend_from_slice(&[0xff; 32]);

        assert!(decode_in_order(&payload, [Layout::A, Layout::B]).is_none());
    }

    #[test]
    fn missing_event_is_not_an_agenda_creation() {
        let mut tx = AgendaFixture::sample().transaction();
        tx.logs.clear();

        assert_eq!(decode(&tx), Err(DecodeError::NotAnAgendaCreation { matches: 0 }));
    }

    #[test]
    fn duplicate_events_are_rejected() {
        let mut tx = AgendaFixture::sample().transaction();
        let log = tx.logs[0].clone();
        tx.logs.push(log);

        assert_eq!(decode(&tx), Err(DecodeError::NotAnAgendaCreation { matches: 2 }));
    }

    #[test]
    fn unrelated_logs_are_ignored() {
        let mut tx = AgendaFixture::sample().transaction();
        tx.logs.insert(
            0,
            TransactionLog {
                address: Address::repeat_byte(0x99),
                topics: vec![B256::repeat_byte(0x01)],
                data: Bytes::new(),
            },
        );

        assert!(decode(&tx).is_ok());
    }

    #[test]
    fn foreign_outer_selector_is_unexpected_shape() {
        let mut tx = AgendaFixture::sample().transaction();
        let mut input = tx.input_data.to_vec();
        input[0] ^= 0xff;
        tx.input_data = input.into();

        assert!(matches!(decode(&tx), Err(DecodeError::UnexpectedCallShape(_))));
    }

    #[test]
    fn payload_targets_must_match_event() {
        let fixture = AgendaFixture::sample();
        let mut other = fixture.clone();
        other.targets[0] = Address::repeat_byte(0xee);
        let mut tx = fixture.transaction();
        tx.input_data = other.transaction().input_data;

        assert!(matches!(decode(&tx), Err(DecodeError::InconsistentPayload(_))));
    }

    #[test]
    fn mismatched_array_lengths_are_inconsistent() {
        let fixture = AgendaFixture::sample();
        let payload = (
            fixture.targets.clone(),
            uint(60),
            uint(120),
            false,
            vec![fixture.calldatas[0].clone()],
        )
            .abi_encode_params();

        let (layout, call) = decode_payload(&payload).unwrap();
        assert_eq!(layout, Layout::A);
        let event = find_creation_event(&fixture.transaction().logs).unwrap();
        assert!(matches!(check_consistency(&event, &call), Err(DecodeError::InconsistentPayload(_))));
    }

    proptest! {
        #[test]
        fn layout_a_round_trips(
            seeds in proptest::collection::vec(any::<u8>(), 1..5),
            notice in any::<u64>(),
            voting in any::<u64>(),
            atomic in any::<bool>(),
            extra in 0usize..80,
        ) {
            let targets: Vec<Address> = seeds.iter().map(|b| Address::repeat_byte(*b)).collect();
            let calldatas: Vec<Bytes> =
                seeds.iter().map(|b| Bytes::from(vec![*b; 4 + extra])).collect();
            let payload = (targets.clone(), uint(notice), uint(voting), atomic, calldatas.clone())
                .abi_encode_params();

            let (layout, call) = decode_payload(&payload).unwrap();
            prop_assert_eq!(layout, Layout::A);
            prop_assert_eq!(call.targets, targets);
            prop_assert_eq!(call.calldatas, calldatas);
            prop_assert_eq!(call.notice_period, uint(notice));
            prop_assert_eq!(call.voting_period, uint(voting));
            prop_assert_eq!(call.atomic_execute, atomic);
            prop_assert!(call.memo.is_none());
        }

        #[test]
        fn layout_b_recovers_memo(memo in "[a-z0-9:/.-]{1,120}", seed in any::<u8>()) {
            let payload = (
                vec![Address::repeat_byte(seed)],
                uint(1),
                uint(2),
                true,
                vec![Bytes::from(vec![seed; 36])],
                memo.clone(),
            )
                .abi_encode_params();

            let (layout, call) = decode_payload(&payload).unwrap();
            prop_assert_eq!(layout, Layout::B);
            prop_assert_eq!(call.memo, Some(memo));
        }
    }
}
