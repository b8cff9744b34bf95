//! Builders for agenda transactions and signed metadata used across unit tests.

use alloy_dyn_abi::JsonAbiExt;
use alloy_primitives::{Address, B256, Bytes, U256, eip191_hash_message};
use alloy_sol_types::{SolCall, SolEvent, SolValue};
use chrono::{DateTime, Duration, Utc};
use k256::ecdsa::SigningKey;

use crate::domain::abi::{AbiRegistry, DynSolValue, Function};
use crate::domain::address::to_hex;
use crate::domain::agenda::{AgendaForm, AgendaMetadata, UnsignedAgenda};
use crate::domain::attestation::{address_of, parse_timestamp};
use crate::domain::calldata::contracts::{AgendaCreated, approveAndCallCall};
use crate::domain::calldata::decode;
use crate::domain::network::Network;
use crate::domain::transaction::{RawTransaction, TransactionLog};

/// Deterministic secp256k1 key that signs like a wallet's `personal_sign`.
#[derive(Debug, Clone)]
pub struct TestSigner {
    key: SigningKey,
}

impl TestSigner {
    pub fn new(seed: u8) -> Self {
        Self { key: SigningKey::from_slice(&[seed.max(1); 32]).unwrap() }
    }

    pub fn address(&self) -> Address {
        address_of(self.key.verifying_key())
    }

    pub fn address_hex(&self) -> String {
        self.address().to_checksum(None)
    }

    /// `0x`-prefixed 65-byte signature with a 27/28 recovery byte.
    pub fn sign(&self, message: &str) -> String {
        let digest = eip191_hash_message(message);

        let (signature, recovery_id) = self.key.sign_prehash_recoverable(digest.as_slice()).unwrap();
        let mut bytes = signature.to_bytes().to_vec();
        bytes.push(27 + recovery_id.to_byte());
        to_hex(&bytes)
    }
}

/// `transfer(address,uint256)` as found in a JSON ABI.
pub fn transfer_fragment() -> Function {
    serde_json::from_str(
        r#"{
            "name": "transfer",
            "type": "function",
            "inputs": [
                {"name": "to", "type": "address"},
                {"name": "amount", "type": "uint256"}
            ],
            "outputs": [{"name": "", "type": "bool"}],
            "stateMutability": "nonpayable"
        }"#,
    )
    .unwrap()
}

pub fn transfer_registry() -> AbiRegistry {
    let mut registry = AbiRegistry::new();
    registry.insert(transfer_fragment());
    registry
}

pub fn transfer_calldata(to: Address, amount: u64) -> Bytes {
    transfer_fragment()
        .abi_encode_input(&[DynSolValue::Address(to), DynSolValue::Uint(U256::from(amount), 256)])
        .unwrap()
        .into()
}

/// A complete "create agenda" submission: on-chain transaction plus creator key.
#[derive(Debug, Clone)]
pub struct AgendaFixture {
    pub agenda_id: u64,
    pub signer: TestSigner,
    pub creator: Address,
    pub targets: Vec<Address>,
    pub calldatas: Vec<Bytes>,
    pub notice_period: u128,
    pub voting_period: u128,
    pub atomic_execute: bool,
    pub memo: Option<String>,
    pub tx_hash: B256,
    pub network: Network,
    pub created_at: String,
}

impl AgendaFixture {
    /// Two token transfers under layout A on sepolia.
    pub fn sample() -> Self {
        let signer = TestSigner::new(7);
        Self {
            agenda_id: 42,
            creator: signer.address(),
            signer,
            targets: vec![Address::repeat_byte(0x11), Address::repeat_byte(0x22)],
            calldatas: vec![
                transfer_calldata(Address::repeat_byte(0xaa), 1_000),
                transfer_calldata(Address::repeat_byte(0xbb), 2_000),
            ],
            notice_period: 86_400,
            voting_period: 172_800,
            atomic_execute: true,
            memo: None,
            tx_hash: B256::repeat_byte(0x5a),
            network: Network::Sepolia,
            created_at: "2026-10-16T12:00:00.00Z".to_string(),
        }
    }

    /// Switch to layout B with the given memo.
    pub fn with_memo(mut self, memo: &str) -> Self {
        self.memo = Some(memo.to_string());
        self
    }

    /// One minute after `created_at`.
    pub fn now(&self) -> DateTime<Utc> {
        parse_timestamp(&self.created_at).unwrap() + Duration::seconds(60)
    }

    /// Inner agenda payload as the agenda manager receives it.
    pub fn payload(&self) -> Vec<u8> {
        let notice = U256::from(self.notice_period);
        let voting = U256::from(self.voting_period);
        match &self.memo {
            None => (
                self.targets.clone(),
                notice,
                voting,
                self.atomic_execute,
                self.calldatas.clone(),
            )
                .abi_encode_params(),
            Some(memo) => (
                self.targets.clone(),
                notice,
                voting,
                self.atomic_execute,
                self.calldatas.clone(),
                memo.clone(),
            )
                .abi_encode_params(),
        }
    }

    pub fn transaction(&self) -> RawTransaction {
        let input = approveAndCallCall {
            spender: Address::repeat_byte(0xdd),
            amount: U256::from(10u64).pow(U256::from(20u8)),
            data: self.payload().into(),
        }
        .abi_encode();

        let event = AgendaCreated {
            from: self.creator,
            id: U256::from(self.agenda_id),
            targets: self.targets.clone(),
            noticePeriodSeconds: self.notice_period,
            votingPeriodSeconds: self.voting_period,
            atomicExecute: self.atomic_execute,
        };
        let log = event.encode_log_data();

        RawTransaction {
            hash: self.tx_hash,
            from: self.creator,
            input_data: input.into(),
            logs: vec![TransactionLog {
                address: Address::repeat_byte(0xcc),
                topics: log.topics().to_vec(),
                data: log.data.clone(),
            }],
        }
    }

    pub fn form(&self) -> AgendaForm {
        AgendaForm {
            title: "Fund grants round".to_string(),
            description: "Transfers grant budgets to two recipients.".to_string(),
        }
    }

    pub fn unsigned(&self) -> UnsignedAgenda {
        let draft = decode(&self.transaction()).unwrap();
        UnsignedAgenda::from_draft(
            &draft,
            self.network,
            self.form(),
            self.created_at.clone(),
            &transfer_registry(),
        )
        .unwrap()
    }

    pub fn signed_metadata(&self) -> AgendaMetadata {
        let unsigned = self.unsigned();
        let signature = self.signer.sign(&unsigned.message());
        unsigned.attach_signature(signature)
    }
}
