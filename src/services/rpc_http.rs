//! JSON-RPC transaction source over a single configured endpoint per network.

use std::time::Duration;

use alloy_primitives::{Address, B256, Bytes};
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::domain::{AppError, Network, RawTransaction, RpcConfig, TransactionLog};
use crate::ports::TransactionSource;

#[derive(Debug, Clone)]
pub struct HttpRpcTransactionSource {
    config: RpcConfig,
    client: Client,
}

impl HttpRpcTransactionSource {
    pub fn new(config: &RpcConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config: config.clone(), client })
    }

    fn endpoint(&self, network: Network) -> Result<&Url, AppError> {
        self.config.endpoint(network).ok_or_else(|| {
            AppError::config_error(format!(
                "No RPC endpoint configured for {network} (rpc.{network}_url)"
            ))
        })
    }

    fn call<T: DeserializeOwned>(
        &self,
        url: &Url,
        method: &str,
        hash: B256,
    ) -> Result<Option<T>, AppError> {
        log::debug!("{method} {hash} via {url}");
        let request = RpcRequest { jsonrpc: "2.0", id: 1, method, params: [hash] };
        let response = self
            .client
            .post(url.clone())
            .json(&request)
            .send()
            .map_err(|e| AppError::Rpc(format!("{method} request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Rpc(format!("{method} returned HTTP {}", status.as_u16())));
        }

        let body: RpcResponse = response
            .json()
            .map_err(|e| AppError::Rpc(format!("{method} returned invalid JSON: {e}")))?;
        if let Some(error) = body.error {
            return Err(AppError::Rpc(format!("{method} failed ({}): {}", error.code, error.message)));
        }
        match body.result {
            None | Some(Value::Null) => Ok(None),
            Some(result) => serde_json::from_value(result)
                .map(Some)
                .map_err(|e| AppError::Rpc(format!("{method} returned an unexpected shape: {e}"))),
        }
    }
}

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: [B256; 1],
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorBody>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct RpcTransaction {
    hash: B256,
    from: Address,
    input: Bytes,
}

#[derive(Debug, Deserialize)]
struct RpcReceipt {
    #[serde(default)]
    logs: Vec<TransactionLog>,
}

impl TransactionSource for HttpRpcTransactionSource {
    fn fetch(&self, hash: B256, network: Network) -> Result<RawTransaction, AppError> {
        let url = self.endpoint(network)?;
        let tx: RpcTransaction = self
            .call(url, "eth_getTransactionByHash", hash)?
            .ok_or_else(|| AppError::Rpc(format!("Transaction {hash} not found on {network}")))?;
        let receipt: RpcReceipt = self
            .call(url, "eth_getTransactionReceipt", hash)?
            .ok_or_else(|| AppError::Rpc(format!("Transaction {hash} has no receipt yet")))?;

        Ok(RawTransaction { hash: tx.hash, from: tx.from, input_data: tx.input, logs: receipt.logs })
    }
}
