//! Claim submission: dry run, broadcast, and receipt polling.

use super::calldata::ClaimRequest;
use crate::error::{ClaimError, ClaimResult};
use crate::wallet::rpc::{self, TxParams};
use crate::wallet::{WalletError, WalletProvider};

use ethers::types::{TransactionReceipt, TxHash};
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::{debug, info, warn};

/// How often a pending transaction is polled for its receipt.
pub const RECEIPT_POLL_INTERVAL: Duration = Duration::from_secs(2);
/// How long to wait for a receipt before giving up.
pub const RECEIPT_DEADLINE: Duration = Duration::from_secs(300);

/// Dry-run the claim against the chain, then hand it to the wallet for
/// signing and broadcast. Returns as soon as the wallet reports the hash;
/// confirmation is a separate step.
pub async fn submit<W>(wallet: &W, endpoint: &str, request: &ClaimRequest) -> ClaimResult<TxHash>
where
    W: WalletProvider + ?Sized,
{
    let accounts = rpc::request_accounts(wallet)
        .await
        .map_err(|e| ClaimError::at_first_request(e, endpoint))?;
    let from = accounts
        .first()
        .copied()
        .ok_or_else(|| ClaimError::Internal("wallet returned no accounts".into()))?;

    let tx = TxParams {
        from,
        to: request.vault,
        data: request.calldata(),
    };

    // Dry run before the wallet prompts for a signature.
    let gas = rpc::estimate_gas(wallet, &tx)
        .await
        .map_err(classify_dry_run)?;
    debug!("Dry run passed, estimated gas: {}", gas);

    let hash = rpc::send_transaction(wallet, &tx).await?;
    info!("Claim submitted: {:#x}", hash);

    Ok(hash)
}

/// Poll for the receipt until the transaction lands or the deadline passes.
pub async fn confirm<W>(wallet: &W, hash: TxHash) -> ClaimResult<TransactionReceipt>
where
    W: WalletProvider + ?Sized,
{
    let started = Instant::now();
    loop {
        if let Some(receipt) = rpc::transaction_receipt(wallet, hash).await? {
            return match receipt.status {
                Some(status) if status.is_zero() => {
                    warn!("Claim {:#x} reverted on-chain", hash);
                    Err(ClaimError::Reverted { tx_hash: hash })
                }
                _ => {
                    info!(
                        "Claim confirmed in block {}",
                        receipt.block_number.unwrap_or_default()
                    );
                    Ok(receipt)
                }
            };
        }

        if started.elapsed() >= RECEIPT_DEADLINE {
            return Err(ClaimError::Timeout {
                operation: format!("receipt for {:#x}", hash),
            });
        }
        sleep(RECEIPT_POLL_INTERVAL).await;
    }
}

/// Split a failed dry run into a contract revert and everything else.
fn classify_dry_run(err: WalletError) -> ClaimError {
    match err.revert_data() {
        Some(data) => ClaimError::ContractRevert {
            data: data.to_string(),
        },
        None => ClaimError::Provider(err),
    }
}
