//! Shared testing utilities for agenda-publisher integration tests.

use std::fs;
use std::path::{Path, PathBuf};

use agenda_publisher::domain::abi::{AbiRegistry, DynSolValue, Function};
use agenda_publisher::domain::address::to_hex;
use agenda_publisher::domain::agenda::UnsignedAgenda;
use agenda_publisher::domain::attestation::{address_of, format_timestamp};
use agenda_publisher::domain::calldata::contracts::{AgendaCreated, approveAndCallCall};
use agenda_publisher::domain::calldata::decode;
use agenda_publisher::domain::{
    AgendaForm, AgendaMetadata, Network, RawTransaction, TransactionLog,
};
use alloy_dyn_abi::JsonAbiExt;
use alloy_primitives::{Address, B256, Bytes, U256, eip191_hash_message};
use alloy_sol_types::{SolCall, SolEvent, SolValue};
use assert_cmd::Command;
use chrono::{DateTime, Utc};
use k256::ecdsa::SigningKey;
use tempfile::TempDir;

#[allow(dead_code)]
pub const TOKEN_ABI: &str = r#"[
  {"type": "function", "name": "transfer", "stateMutability": "nonpayable",
   "inputs": [{"name": "to", "type": "address"}, {"name": "amount", "type": "uint256"}],
   "outputs": [{"name": "", "type": "bool"}]},
  {"type": "event", "name": "Transfer", "anonymous": false, "inputs": []}
]"#;

/// Isolated working directory for CLI invocations.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
}

#[allow(dead_code)]
impl TestContext {
    pub fn new() -> Self {
        Self { root: TempDir::new().expect("Failed to create temp directory for tests") }
    }

    pub fn work_dir(&self) -> &Path {
        self.root.path()
    }

    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root.path().join(name);
        fs::write(&path, content).expect("Failed to write test file");
        path
    }

    /// `agenda-publisher` running in the work directory with no ambient credentials.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("agenda-publisher")
            .expect("Failed to locate agenda-publisher binary");
        cmd.current_dir(self.work_dir())
            .env_remove("GITHUB_TOKEN")
            .env_remove("AGENDA_FORK_OWNER")
            .env("RUST_LOG", "warn");
        cmd
    }
}

/// A "create agenda" transaction submitted by a known key.
#[allow(dead_code)]
pub struct Submission {
    pub key: SigningKey,
    pub agenda_id: u64,
    pub tx_hash: B256,
    pub targets: Vec<Address>,
    pub calldatas: Vec<Bytes>,
}

#[allow(dead_code)]
impl Submission {
    pub fn new() -> Self {
        let transfer = transfer_fragment();
        let calldatas = [(0xaa, 5u64), (0xbb, 6u64)]
            .into_iter()
            .map(|(to, amount)| {
                transfer
                    .abi_encode_input(&[
                        DynSolValue::Address(Address::repeat_byte(to)),
                        DynSolValue::Uint(U256::from(amount), 256),
                    ])
                    .expect("transfer calldata")
                    .into()
            })
            .collect();

        Self {
            key: SigningKey::from_slice(&[3u8; 32]).expect("valid key"),
            agenda_id: 7,
            tx_hash: B256::repeat_byte(0x42),
            targets: vec![Address::repeat_byte(0x11), Address::repeat_byte(0x22)],
            calldatas,
        }
    }

    pub fn creator(&self) -> Address {
        address_of(self.key.verifying_key())
    }

    pub fn tx_hash_hex(&self) -> String {
        to_hex(self.tx_hash.as_slice())
    }

    /// Layout-A transaction encoded independently with alloy.
    pub fn transaction(&self) -> RawTransaction {
        let payload = (
            self.targets.clone(),
            U256::from(86_400u64),
            U256::from(172_800u64),
            false,
            self.calldatas.clone(),
        )
            .abi_encode_params();
        let input = approveAndCallCall {
            spender: Address::repeat_byte(0xdd),
            amount: U256::from(1u64),
            data: payload.into(),
        }
        .abi_encode();
        let log = AgendaCreated {
            from: self.creator(),
            id: U256::from(self.agenda_id),
            targets: self.targets.clone(),
            noticePeriodSeconds: 86_400,
            votingPeriodSeconds: 172_800,
            atomicExecute: false,
        }
        .encode_log_data();

        RawTransaction {
            hash: self.tx_hash,
            from: self.creator(),
            input_data: input.into(),
            logs: vec![TransactionLog {
                address: Address::repeat_byte(0xcc),
                topics: log.topics().to_vec(),
                data: log.data.clone(),
            }],
        }
    }

    pub fn transaction_json(&self) -> String {
        serde_json::to_string_pretty(&self.transaction()).expect("serializable transaction")
    }

    pub fn form(&self) -> AgendaForm {
        AgendaForm {
            title: "Rebalance treasury".into(),
            description: "Moves funds between two treasury accounts.".into(),
        }
    }

    pub fn unsigned(&self, created_at: &str) -> UnsignedAgenda {
        let draft = decode(&self.transaction()).expect("decodable fixture");
        let mut registry = AbiRegistry::new();
        registry.insert(transfer_fragment());
        UnsignedAgenda::from_draft(&draft, Network::Sepolia, self.form(), created_at, &registry)
            .expect("assembled record")
    }

    /// Wallet-style `personal_sign` signature.
    pub fn sign(&self, message: &str) -> String {
        let digest = eip191_hash_message(message);
        let (signature, recovery_id) =
            self.key.sign_prehash_recoverable(digest.as_slice()).expect("signable");
        let mut bytes = signature.to_bytes().to_vec();
        bytes.push(27 + recovery_id.to_byte());
        to_hex(&bytes)
    }

    pub fn signed_metadata(&self, created_at: DateTime<Utc>) -> AgendaMetadata {
        let unsigned = self.unsigned(&format_timestamp(created_at));
        let signature = self.sign(&unsigned.message());
        unsigned.attach_signature(signature)
    }
}

pub fn transfer_fragment() -> Function {
    serde_json::from_str(
        r#"{"type": "function", "name": "transfer", "stateMutability": "nonpayable",
            "inputs": [{"name": "to", "type": "address"}, {"name": "amount", "type": "uint256"}],
            "outputs": [{"name": "", "type": "bool"}]}"#,
    )
    .expect("transfer fragment")
}
