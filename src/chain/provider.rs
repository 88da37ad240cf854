// JSON-RPC receipt polling
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::{ChainError, Confirmation, Result, TransactionHandle};

/// Waits until a submitted transaction is mined and classifies the result.
#[async_trait]
pub trait ReceiptProvider: Send + Sync {
    /// Suspend until a receipt is available. Receipt status 0 is a
    /// `TransactionReverted` error, not a submission failure.
    async fn wait_for_receipt(&self, handle: &TransactionHandle) -> Result<Confirmation>;
}

#[derive(Debug, Deserialize)]
struct RpcEnvelope {
    result: Option<RpcReceipt>,
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct RpcReceipt {
    status: String,
    #[serde(rename = "blockNumber")]
    block_number: Option<String>,
}

/// Polling client for an Ethereum-style JSON-RPC endpoint.
pub struct JsonRpcProvider {
    client: reqwest::Client,
    url: String,
    poll_interval: Duration,
    max_attempts: u32,
}

impl JsonRpcProvider {
    pub fn new(url: impl Into<String>, poll_interval: Duration, max_attempts: u32) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
            poll_interval,
            max_attempts,
        }
    }

    async fn fetch_receipt(&self, hash: &str) -> Result<Option<RpcReceipt>> {
        let payload = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "eth_getTransactionReceipt",
            "params": [hash],
        });

        let response = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| ChainError::BadResponse(e.to_string()))?;

        let envelope: RpcEnvelope = response
            .json()
            .await
            .map_err(|e| ChainError::BadResponse(e.to_string()))?;

        if let Some(error) = envelope.error {
            return Err(ChainError::BadResponse(error.message));
        }
        Ok(envelope.result)
    }
}

#[async_trait]
impl ReceiptProvider for JsonRpcProvider {
    async fn wait_for_receipt(&self, handle: &TransactionHandle) -> Result<Confirmation> {
        poll_for_receipt(
            &handle.0,
            || self.fetch_receipt(&handle.0),
            self.poll_interval,
            self.max_attempts,
        )
        .await
    }
}

/// Poll `fetch` until a receipt arrives or the attempt cap is reached.
/// An isolated fetch error is treated like a missing receipt so a single
/// transient transport failure does not abort the wait; only when every
/// attempt errored is the last error surfaced instead of a timeout. No
/// sleep follows the final attempt.
async fn poll_for_receipt<F, Fut>(
    hash: &str,
    mut fetch: F,
    poll_interval: Duration,
    max_attempts: u32,
) -> Result<Confirmation>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<RpcReceipt>>>,
{
    let mut last_error = None;
    let mut errors = 0u32;

    for attempt in 1..=max_attempts {
        match fetch().await {
            Ok(Some(receipt)) => {
                return classify_receipt(hash, &receipt.status, receipt.block_number);
            }
            Ok(None) => {
                debug!(
                    "Receipt for {} not available yet (poll {}/{})",
                    hash, attempt, max_attempts
                );
            }
            Err(e) => {
                warn!(
                    "⚠️ Receipt poll {}/{} for {} failed: {}",
                    attempt, max_attempts, hash, e
                );
                errors += 1;
                last_error = Some(e);
            }
        }

        if attempt < max_attempts {
            tokio::time::sleep(poll_interval).await;
        }
    }

    if errors == max_attempts {
        if let Some(e) = last_error {
            return Err(e);
        }
    }

    Err(ChainError::ConfirmationTimeout {
        hash: hash.to_string(),
        attempts: max_attempts,
    })
}

/// Map a receipt status field to the confirmation outcome. Accepts the hex
/// quantities JSON-RPC uses ("0x0"/"0x1").
fn classify_receipt(
    hash: &str,
    status: &str,
    block_number: Option<String>,
) -> Result<Confirmation> {
    let block_number = block_number.and_then(|b| {
        u64::from_str_radix(b.trim_start_matches("0x"), 16).ok()
    });

    match status {
        "0x1" | "1" => {
            info!("✅ Transaction {} confirmed", hash);
            Ok(Confirmation {
                hash: hash.to_string(),
                block_number,
            })
        }
        "0x0" | "0" => Err(ChainError::TransactionReverted {
            hash: hash.to_string(),
        }),
        other => Err(ChainError::BadResponse(format!(
            "unknown receipt status {other:?}"
        ))),
    }
}
