//! Error types for the claim console.

use crate::wallet::WalletError;

use ethers::types::TxHash;
use thiserror::Error;

/// Everything that can go wrong between pressing a button and a confirmed
/// transaction. Display strings are shown to the user verbatim.
#[derive(Error, Debug)]
pub enum ClaimError {
    #[error("No wallet provider responded at {endpoint}. Install or unlock a web3 wallet and try again")]
    MissingWallet { endpoint: String },

    #[error("{0}")]
    InvalidInput(String),

    #[error("Could not switch the wallet to {network}: {source}")]
    ChainSwitch {
        network: &'static str,
        #[source]
        source: WalletError,
    },

    #[error("Contract error: {data}")]
    ContractRevert { data: String },

    #[error("Transaction {tx_hash:#x} reverted on-chain")]
    Reverted { tx_hash: TxHash },

    #[error("Timed out waiting for {operation}")]
    Timeout { operation: String },

    #[error("Wallet request failed: {0}")]
    Provider(#[from] WalletError),

    #[error("Terminal write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ClaimError {
    /// Classify a failure of the first wallet request of a user action.
    /// Transport failure there means no wallet is listening at all.
    pub fn at_first_request(err: WalletError, endpoint: &str) -> Self {
        if err.is_transport() {
            ClaimError::MissingWallet {
                endpoint: endpoint.to_string(),
            }
        } else {
            ClaimError::Provider(err)
        }
    }

    /// Provider error code, when the failure carries one.
    pub fn provider_code(&self) -> Option<i64> {
        match self {
            ClaimError::ChainSwitch { source, .. } | ClaimError::Provider(source) => source.code(),
            _ => None,
        }
    }
}

/// Result type for claim operations.
pub type ClaimResult<T> = Result<T, ClaimError>;
