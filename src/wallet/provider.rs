//! Wallet provider boundary.
//!
//! Every interaction with the wallet goes through a single `request` call,
//! mirroring the EIP-1193 surface desktop wallets expose over local HTTP.

use async_trait::async_trait;
use ethers::providers::{Http, Provider, ProviderError, RpcError};
use serde_json::Value;
use thiserror::Error;

/// Provider error code wallets return for a chain they do not know about.
pub const UNRECOGNIZED_CHAIN_CODE: i64 = 4902;

/// A failed wallet request, split by whether the wallet answered at all.
#[derive(Error, Debug, Clone)]
pub enum WalletError {
    /// The wallet answered with a JSON-RPC error object.
    #[error("Wallet returned error {code}: {message}")]
    Rpc {
        code: i64,
        message: String,
        data: Option<String>,
    },

    /// The wallet endpoint could not be reached.
    #[error("Wallet endpoint unreachable: {0}")]
    Transport(String),

    /// The wallet answered with JSON the client could not interpret.
    #[error("Unexpected wallet response: {0}")]
    Decode(String),
}

impl WalletError {
    /// Error code, when the wallet produced one.
    pub fn code(&self) -> Option<i64> {
        match self {
            WalletError::Rpc { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Whether the wallet rejected a chain switch because the chain is not
    /// registered with it yet.
    pub fn is_unrecognized_chain(&self) -> bool {
        self.code() == Some(UNRECOGNIZED_CHAIN_CODE)
    }

    /// Revert payload attached to the error, if any.
    pub fn revert_data(&self) -> Option<&str> {
        match self {
            WalletError::Rpc { data: Some(d), .. } => Some(d),
            _ => None,
        }
    }

    /// Whether the failure happened before the wallet answered.
    pub fn is_transport(&self) -> bool {
        matches!(self, WalletError::Transport(_))
    }

    fn from_provider(err: ProviderError) -> Self {
        match err.as_error_response() {
            Some(rpc) => WalletError::Rpc {
                code: rpc.code,
                message: rpc.message.clone(),
                data: rpc.data.as_ref().map(|v| match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                }),
            },
            None => WalletError::Transport(err.to_string()),
        }
    }
}

/// The one seam between the claim logic and a wallet.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Submit one JSON-RPC request to the wallet and return its raw result.
    async fn request(&self, method: &str, params: Value) -> Result<Value, WalletError>;
}

/// Wallet reachable over a local HTTP JSON-RPC endpoint, e.g. Frame.
#[derive(Debug, Clone)]
pub struct HttpWallet {
    inner: Provider<Http>,
}

impl HttpWallet {
    /// Connect to the wallet's JSON-RPC listener.
    pub fn new(endpoint: &str) -> Result<Self, WalletError> {
        let inner = Provider::<Http>::try_from(endpoint)
            .map_err(|e| WalletError::Transport(e.to_string()))?;
        Ok(Self { inner })
    }
}

#[async_trait]
impl WalletProvider for HttpWallet {
    async fn request(&self, method: &str, params: Value) -> Result<Value, WalletError> {
        self.inner
            .request(method, params)
            .await
            .map_err(WalletError::from_provider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_4902_is_unrecognized_chain() {
        let err = WalletError::Rpc {
            code: 4902,
            message: "Unrecognized chain ID".into(),
            data: None,
        };
        assert!(err.is_unrecognized_chain());
        assert_eq!(err.code(), Some(4902));

        let rejected = WalletError::Rpc {
            code: 4001,
            message: "User rejected the request".into(),
            data: None,
        };
        assert!(!rejected.is_unrecognized_chain());
    }

    #[test]
    fn revert_data_only_on_rpc_errors_that_carry_it() {
        let revert = WalletError::Rpc {
            code: 3,
            message: "execution reverted".into(),
            data: Some("0x08c379a0".into()),
        };
        assert_eq!(revert.revert_data(), Some("0x08c379a0"));

        let plain = WalletError::Rpc {
            code: -32000,
            message: "out of gas".into(),
            data: None,
        };
        assert_eq!(plain.revert_data(), None);
        assert!(WalletError::Transport("connection refused".into())
            .revert_data()
            .is_none());
    }

    #[test]
    fn transport_errors_have_no_code() {
        let err = WalletError::Transport("connection refused".into());
        assert!(err.is_transport());
        assert_eq!(err.code(), None);
    }

    #[test]
    fn errors_render_capitalized_messages() {
        let rpc = WalletError::Rpc {
            code: 4001,
            message: "User rejected the request".into(),
            data: None,
        };
        assert_eq!(
            rpc.to_string(),
            "Wallet returned error 4001: User rejected the request"
        );
        assert_eq!(
            WalletError::Transport("connection refused".into()).to_string(),
            "Wallet endpoint unreachable: connection refused"
        );
        assert_eq!(
            WalletError::Decode("invalid type: map".into()).to_string(),
            "Unexpected wallet response: invalid type: map"
        );
    }
}
